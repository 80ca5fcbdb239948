//! JetBrains run configurations to one merged VSCode `launch.json`.
//!
//! Only flavors that map onto a VSCode debugger type convert; build-tool and
//! shell configurations have no launch equivalent and are skipped with a
//! diagnostic instead of being forced into a debugger shape they do not fit.

use std::path::PathBuf;

use crate::classify::{self, Flavor};
use crate::model::{ConvertReport, SkipReason, Task, TaskKind};
use crate::schema::vscode::{LaunchEntry, LaunchFile, LAUNCH_VERSION};
use crate::variables::VariableTable;

use super::{write_output, ConvertOptions};

pub struct JetBrainsToLaunch {
    project_root: PathBuf,
    options: ConvertOptions,
}

impl JetBrainsToLaunch {
    pub fn new(project_root: impl Into<PathBuf>, options: ConvertOptions) -> Self {
        JetBrainsToLaunch {
            project_root: project_root.into(),
            options,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.options
            .output
            .clone()
            .unwrap_or_else(|| self.project_root.join(".vscode").join("launch.json"))
    }

    pub fn convert(&self, tasks: &[Task]) -> anyhow::Result<ConvertReport> {
        let table = VariableTable::default();
        let mut report = ConvertReport::default();
        let mut configurations = Vec::new();

        for task in tasks {
            if task.kind != TaskKind::JetBrains {
                report.skip(
                    &task.name,
                    SkipReason::KindMismatch,
                    format!("expected jetbrains input, got {}", task.kind.as_str()),
                );
                continue;
            }
            match self.build_entry(task, &table) {
                Ok(entry) => {
                    configurations.push(entry);
                    report.converted += 1;
                }
                Err(detail) => report.skip(&task.name, SkipReason::Unconvertible, detail),
            }
        }

        let path = self.output_path();
        if !configurations.is_empty() {
            let file = LaunchFile {
                version: LAUNCH_VERSION.to_string(),
                configurations,
            };
            let json = serde_json::to_string_pretty(&file)?;
            write_output(&path, &format!("{json}\n"), self.options.dry_run)?;
        }

        tracing::info!(
            "converted {} configuration(s) to {}, skipped {}",
            report.converted,
            path.display(),
            report.skipped
        );
        Ok(report)
    }

    fn build_entry(&self, task: &Task, table: &VariableTable) -> Result<LaunchEntry, String> {
        let mut entry = LaunchEntry {
            name: task.name.clone(),
            request: "launch".to_string(),
            ..Default::default()
        };

        let retokenize = |a: &String| table.to_vscode(a);
        match classify::classify(&task.command, task.hint) {
            Flavor::Go => {
                entry.kind = "go".to_string();
                entry.mode = Some("auto".to_string());
                // Canonical go tasks look like `go run <package> [args...]`.
                let mut rest = task.args.as_slice();
                if rest.first().map(String::as_str) == Some("run") {
                    rest = &rest[1..];
                }
                entry.program = Some(
                    rest.first()
                        .map(retokenize)
                        .unwrap_or_else(|| ".".to_string()),
                );
                if rest.len() > 1 {
                    entry.args = rest[1..].iter().map(retokenize).collect();
                }
            }
            Flavor::Node => {
                entry.kind = "node".to_string();
                let script = task
                    .args
                    .first()
                    .ok_or("node configuration has no script to launch")?;
                entry.program = Some(retokenize(script));
                entry.args = task.args[1..].iter().map(retokenize).collect();
            }
            Flavor::Python => {
                entry.kind = "python".to_string();
                let script = task
                    .args
                    .first()
                    .ok_or("python configuration has no script to launch")?;
                entry.program = Some(retokenize(script));
                entry.args = task.args[1..].iter().map(retokenize).collect();
            }
            Flavor::Java => {
                entry.kind = "java".to_string();
                let class_pos = task
                    .args
                    .iter()
                    .position(|a| !a.starts_with('-'))
                    .ok_or("java configuration has no main class")?;
                entry.main_class = Some(task.args[class_pos].clone());
                entry.args = task.args[class_pos + 1..].iter().map(retokenize).collect();
            }
            Flavor::Gradle | Flavor::Maven => {
                return Err("build tool configuration has no launch equivalent".to_string());
            }
            Flavor::Shell => {
                return Err("shell configuration has no launch equivalent".to_string());
            }
        }

        // Project-root cwd is the launch.json default and stays implicit.
        let root = self.project_root.to_string_lossy();
        if !task.cwd.is_empty() && task.cwd != root {
            entry.cwd = table.to_vscode(&task.cwd);
        }
        entry.env = task
            .env
            .iter()
            .map(|(k, v)| (k.clone(), table.to_vscode(v)))
            .collect();
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn jb_task(name: &str, hint: Flavor, command: &str, args: &[&str]) -> Task {
        let mut t = Task::new(name, TaskKind::JetBrains, Path::new("cfg.xml"));
        t.hint = Some(hint);
        t.command = command.to_string();
        t.args = args.iter().map(|s| s.to_string()).collect();
        t
    }

    #[test]
    fn go_configuration_becomes_go_launch_entry() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_string_lossy().into_owned();
        let t = jb_task(
            "Server",
            Flavor::Go,
            "go",
            &["run", &format!("{root}/cmd/server"), "--port", "8080"],
        );

        let conv = JetBrainsToLaunch::new(dir.path(), ConvertOptions::default());
        let report = conv.convert(&[t]).unwrap();
        assert_eq!(report.converted, 1);

        let out = dir.path().join(".vscode/launch.json");
        let file: LaunchFile = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let entry = &file.configurations[0];
        assert_eq!(entry.kind, "go");
        assert_eq!(entry.request, "launch");
        assert_eq!(entry.mode.as_deref(), Some("auto"));
        // Resolved program path passes through literally.
        assert_eq!(
            entry.program.as_deref(),
            Some(format!("{root}/cmd/server").as_str())
        );
        assert_eq!(entry.args, vec!["--port", "8080"]);
    }

    #[test]
    fn shell_configurations_are_skipped_with_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = vec![
            jb_task("build", Flavor::Shell, "go build -o bin/app", &[]),
            jb_task("script", Flavor::Python, "python", &["main.py"]),
            jb_task("assemble", Flavor::Gradle, "gradle", &["assemble"]),
        ];
        let conv = JetBrainsToLaunch::new(dir.path(), ConvertOptions::default());
        let report = conv.convert(&tasks).unwrap();
        assert_eq!(report.converted, 1);
        assert_eq!(report.skipped, 2);
        assert!(report
            .diagnostics
            .iter()
            .all(|d| d.reason == SkipReason::Unconvertible));

        let out = dir.path().join(".vscode/launch.json");
        let file: LaunchFile = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(file.configurations.len(), 1);
        assert_eq!(file.configurations[0].kind, "python");
    }

    #[test]
    fn java_configuration_maps_main_class() {
        let dir = tempfile::tempdir().unwrap();
        let t = jb_task(
            "App",
            Flavor::Java,
            "java",
            &["-Xmx1024m", "com.example.Main", "--verbose"],
        );
        let conv = JetBrainsToLaunch::new(dir.path(), ConvertOptions::default());
        conv.convert(&[t]).unwrap();

        let out = dir.path().join(".vscode/launch.json");
        let file: LaunchFile = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let entry = &file.configurations[0];
        assert_eq!(entry.kind, "java");
        assert_eq!(entry.main_class.as_deref(), Some("com.example.Main"));
        assert_eq!(entry.args, vec!["--verbose"]);
    }

    #[test]
    fn dry_run_reports_counts_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let t = jb_task("script", Flavor::Node, "node", &["index.js"]);
        let conv = JetBrainsToLaunch::new(
            dir.path(),
            ConvertOptions {
                dry_run: true,
                ..Default::default()
            },
        );
        let report = conv.convert(&[t]).unwrap();
        assert_eq!(report.converted, 1);
        assert!(!dir.path().join(".vscode").exists());
    }
}
