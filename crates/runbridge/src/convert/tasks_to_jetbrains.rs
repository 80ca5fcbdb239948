//! VSCode tasks to JetBrains run configuration files, one file per task.

use std::path::PathBuf;

use crate::classify;
use crate::model::{naming, ConvertReport, SkipReason, Task, TaskKind};
use crate::schema::jetbrains::{self, RunConfigurationFile};
use crate::variables::VariableTable;

use super::{build_jetbrains_configuration, write_output, ConvertOptions};

pub struct TasksToJetBrains {
    project_root: PathBuf,
    options: ConvertOptions,
}

impl TasksToJetBrains {
    pub fn new(project_root: impl Into<PathBuf>, options: ConvertOptions) -> Self {
        TasksToJetBrains {
            project_root: project_root.into(),
            options,
        }
    }

    fn output_dir(&self) -> PathBuf {
        self.options
            .output
            .clone()
            .unwrap_or_else(|| self.project_root.join(".idea").join("runConfigurations"))
    }

    /// Convert a batch of tasks; every convertible task becomes one
    /// `<sanitized name>.xml` under the output directory.
    pub fn convert(&self, tasks: &[Task]) -> anyhow::Result<ConvertReport> {
        let table = VariableTable::default();
        let out_dir = self.output_dir();
        let mut report = ConvertReport::default();

        for task in tasks {
            if task.kind != TaskKind::VscodeTask {
                report.skip(
                    &task.name,
                    SkipReason::KindMismatch,
                    format!("expected vscode-task input, got {}", task.kind.as_str()),
                );
                continue;
            }
            let flavor = classify::classify(&task.command, task.hint);
            let cfg = match build_jetbrains_configuration(&table, task, flavor) {
                Ok(cfg) => cfg,
                Err(detail) => {
                    report.skip(&task.name, SkipReason::Unconvertible, detail);
                    continue;
                }
            };

            let xml = jetbrains::to_xml(&RunConfigurationFile::new(cfg))?;
            let file = out_dir.join(format!("{}.xml", naming::sanitize_file_name(&task.name)));
            write_output(&file, &xml, self.options.dry_run)?;
            report.converted += 1;
        }

        tracing::info!(
            "converted {} task(s) to {}, skipped {}",
            report.converted,
            out_dir.display(),
            report.skipped
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn task(name: &str, kind: TaskKind, command: &str, args: &[&str]) -> Task {
        let mut t = Task::new(name, kind, Path::new("tasks.json"));
        t.command = command.to_string();
        t.args = args.iter().map(|s| s.to_string()).collect();
        t
    }

    #[test]
    fn shell_task_becomes_shell_script_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let mut build = task("build", TaskKind::VscodeTask, "go", &["build", "-o", "bin/app"]);
        build.cwd = root.clone();
        build.env.insert("CGO_ENABLED".into(), "0".into());

        let conv = TasksToJetBrains::new(dir.path(), ConvertOptions::default());
        let report = conv.convert(&[build]).unwrap();
        assert_eq!(report.converted, 1);
        assert_eq!(report.skipped, 0);

        let out = dir.path().join(".idea/runConfigurations/build.xml");
        let content = fs::read_to_string(&out).unwrap();
        let file = jetbrains::from_xml(&content).unwrap();
        let cfg = &file.configuration;
        // A bare "go" command is not a recognized flavor; it stays generic.
        assert_eq!(cfg.kind, "ShellScript");
        assert_eq!(cfg.option_value("SCRIPT_TEXT"), Some("go build -o bin/app"));
        // The resolved working directory stays a literal path.
        assert_eq!(cfg.option_value("WORKING_DIRECTORY"), Some(root.as_str()));
        let env = cfg.option("ENV_VARIABLES").unwrap().map.as_ref().unwrap();
        assert_eq!(env.entries[0].key, "CGO_ENABLED");
    }

    #[test]
    fn gradle_task_gets_external_system_settings() {
        let dir = tempfile::tempdir().unwrap();
        let t = task(
            "Gradle Build",
            TaskKind::VscodeTask,
            "gradle",
            &["clean", "build", "--info"],
        );
        let conv = TasksToJetBrains::new(dir.path(), ConvertOptions::default());
        conv.convert(&[t]).unwrap();

        // Space in the task name is sanitized out of the file name.
        let out = dir.path().join(".idea/runConfigurations/Gradle_Build.xml");
        let file = jetbrains::from_xml(&fs::read_to_string(&out).unwrap()).unwrap();
        let cfg = &file.configuration;
        assert_eq!(cfg.kind, "GradleRunConfiguration");
        let ess = cfg.external_system_settings.as_ref().unwrap();
        let names: Vec<&str> = ess
            .option("taskNames")
            .and_then(|o| o.list.as_ref())
            .map(|l| l.options.iter().map(|v| v.value.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(names, vec!["clean", "build"]);
        assert_eq!(ess.option_value("scriptParameters"), Some("--info"));
    }

    #[test]
    fn java_task_splits_vm_and_program_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let t = task(
            "Run App",
            TaskKind::VscodeTask,
            "java",
            &["-Xmx1024m", "com.example.Main", "--port", "8080"],
        );
        let conv = TasksToJetBrains::new(dir.path(), ConvertOptions::default());
        conv.convert(&[t]).unwrap();

        let out = dir.path().join(".idea/runConfigurations/Run_App.xml");
        let file = jetbrains::from_xml(&fs::read_to_string(&out).unwrap()).unwrap();
        let cfg = &file.configuration;
        assert_eq!(cfg.kind, "Application");
        assert_eq!(cfg.option_value("MAIN_CLASS_NAME"), Some("com.example.Main"));
        assert_eq!(cfg.option_value("VM_PARAMETERS"), Some("-Xmx1024m"));
        assert_eq!(cfg.option_value("PROGRAM_PARAMETERS"), Some("--port 8080"));
    }

    #[test]
    fn wrong_kind_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = vec![
            task("ok", TaskKind::VscodeTask, "make", &[]),
            task("launch", TaskKind::VscodeLaunch, "node", &["index.js"]),
        ];
        let conv = TasksToJetBrains::new(dir.path(), ConvertOptions::default());
        let report = conv.convert(&tasks).unwrap();
        assert_eq!(report.converted, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.diagnostics[0].reason, SkipReason::KindMismatch);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let t = task("build", TaskKind::VscodeTask, "make", &["all"]);
        let conv = TasksToJetBrains::new(
            dir.path(),
            ConvertOptions {
                dry_run: true,
                ..Default::default()
            },
        );
        let report = conv.convert(&[t]).unwrap();
        assert_eq!(report.converted, 1);
        assert!(!dir.path().join(".idea").exists());
    }

    #[test]
    fn output_directory_override_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("configs");
        let t = task("deploy", TaskKind::VscodeTask, "sh", &["deploy.sh"]);
        let conv = TasksToJetBrains::new(
            dir.path(),
            ConvertOptions {
                output: Some(custom.clone()),
                ..Default::default()
            },
        );
        conv.convert(&[t]).unwrap();
        assert!(custom.join("deploy.xml").exists());
        assert!(!dir.path().join(".idea").exists());
    }

    #[test]
    fn one_file_per_task() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = vec![
            task("a", TaskKind::VscodeTask, "make", &["a"]),
            task("b", TaskKind::VscodeTask, "make", &["b"]),
            task("c", TaskKind::VscodeTask, "make", &["c"]),
        ];
        let conv = TasksToJetBrains::new(dir.path(), ConvertOptions::default());
        let report = conv.convert(&tasks).unwrap();
        assert_eq!(report.converted, 3);
        let out = dir.path().join(".idea/runConfigurations");
        assert_eq!(fs::read_dir(&out).unwrap().count(), 3);
    }
}
