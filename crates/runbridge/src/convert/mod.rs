//! Converters between canonical tasks and the on-disk target schemas.
//!
//! Each converter accepts exactly one source [`TaskKind`](crate::model::TaskKind)
//! and skips everything else with a diagnostic. A batch never aborts because
//! one task cannot be expressed in the target schema; only an unwritable
//! output location is a hard error. Dry runs go through the full pipeline and
//! report the same counts without touching the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::classify::Flavor;
use crate::model::Task;
use crate::schema::jetbrains::{Configuration, OptionElement};
use crate::variables::VariableTable;

pub mod jetbrains_to_launch;
pub mod jetbrains_to_tasks;
pub mod launch_to_jetbrains;
pub mod tasks_to_jetbrains;

pub use jetbrains_to_launch::JetBrainsToLaunch;
pub use jetbrains_to_tasks::JetBrainsToTasks;
pub use launch_to_jetbrains::LaunchToJetBrains;
pub use tasks_to_jetbrains::TasksToJetBrains;

/// Knobs shared by every converter.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Override for the default output location. A directory for converters
    /// that write one file per task, a file path for merged outputs.
    pub output: Option<PathBuf>,
    /// Report what would be written without writing anything.
    pub dry_run: bool,
}

/// Create parent directories and (over)write one output file, unless this is
/// a dry run.
pub(crate) fn write_output(path: &Path, content: &str, dry_run: bool) -> anyhow::Result<()> {
    if dry_run {
        tracing::info!("dry run: would write {}", path.display());
        tracing::debug!("preview of {}:\n{}", path.display(), content);
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

/// Join argument tokens back into one parameter string, quoting tokens that
/// contain spaces. Inverse enough of the quote-aware split used when parsing.
pub(crate) fn join_parameters<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(|a| {
            let a = a.as_ref();
            if a.contains(' ') {
                format!("\"{a}\"")
            } else {
                a.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the JetBrains configuration body for one task, dispatching on its
/// classified flavor. Shared by both converters that target run
/// configuration files; an `Err` is the per-task "cannot be expressed"
/// detail, never a batch failure.
///
/// Only placeholder tokens are translated. Paths the parsers already
/// resolved to literal locations are emitted literally.
pub(crate) fn build_jetbrains_configuration(
    table: &VariableTable,
    task: &Task,
    flavor: Flavor,
) -> Result<Configuration, String> {
    let args: Vec<String> = task.args.iter().map(|a| table.to_jetbrains(a)).collect();

    let mut cfg = match flavor {
        Flavor::Java => {
            let mut cfg = Configuration::new(&task.name, "Application");
            cfg.factory_name = Some("Application".to_string());
            // Leading dash arguments are VM parameters, the first bare
            // argument is the main class, the rest are program parameters.
            let class_pos = args
                .iter()
                .position(|a| !a.starts_with('-'))
                .ok_or("java command has no main class argument")?;
            if class_pos > 0 {
                cfg.push_value("VM_PARAMETERS", join_parameters(&args[..class_pos]));
            }
            cfg.push_value("MAIN_CLASS_NAME", args[class_pos].clone());
            if args.len() > class_pos + 1 {
                cfg.push_value("PROGRAM_PARAMETERS", join_parameters(&args[class_pos + 1..]));
            }
            cfg
        }
        Flavor::Go => {
            let mut cfg = Configuration::new(&task.name, "GoApplicationRunConfiguration");
            cfg.factory_name = Some("Go Application".to_string());
            // A canonical go task looks like `go run <package> [params...]`.
            let mut rest = args.as_slice();
            if rest.first().map(String::as_str) == Some("run") {
                rest = &rest[1..];
            }
            let package = rest.first().map(String::as_str).unwrap_or(".");
            cfg.push_value("PACKAGE", package);
            if rest.len() > 1 {
                cfg.push_value("PROGRAM_PARAMETERS", join_parameters(&rest[1..]));
            }
            cfg
        }
        Flavor::Gradle | Flavor::Maven => {
            let mut cfg = Configuration::new(&task.name, "GradleRunConfiguration");
            cfg.factory_name = Some("Gradle".to_string());
            let (flags, names): (Vec<&String>, Vec<&String>) =
                args.iter().partition(|a| a.starts_with('-'));
            let mut settings = crate::schema::jetbrains::ExternalSystemSettings::default();
            settings
                .options
                .push(OptionElement::list("taskNames", names.iter().map(|n| n.as_str())));
            if !flags.is_empty() {
                settings
                    .options
                    .push(OptionElement::value("scriptParameters", join_parameters(&flags)));
            }
            cfg.external_system_settings = Some(settings);
            cfg
        }
        Flavor::Node => {
            let mut cfg = Configuration::new(&task.name, "NodeJSConfigurationType");
            cfg.factory_name = Some("Node.js".to_string());
            let script_pos = args
                .iter()
                .position(|a| !a.starts_with('-'))
                .ok_or("node command has no script argument")?;
            cfg.push_value("PATH_TO_JS_FILE", args[script_pos].clone());
            let params: Vec<&String> = args
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != script_pos)
                .map(|(_, a)| a)
                .collect();
            if !params.is_empty() {
                cfg.push_value("APPLICATION_PARAMETERS", join_parameters(&params));
            }
            cfg
        }
        Flavor::Python => {
            let mut cfg = Configuration::new(&task.name, "PythonConfigurationType");
            cfg.factory_name = Some("Python".to_string());
            let script_pos = args
                .iter()
                .position(|a| !a.starts_with('-'))
                .ok_or("python command has no script argument")?;
            cfg.push_value("SCRIPT_NAME", args[script_pos].clone());
            let params: Vec<&String> = args
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != script_pos)
                .map(|(_, a)| a)
                .collect();
            if !params.is_empty() {
                cfg.push_value("PARAMETERS", join_parameters(&params));
            }
            cfg
        }
        Flavor::Shell => {
            let mut cfg = Configuration::new(&task.name, "ShellScript");
            let command = table.to_jetbrains(&task.command);
            let script = if args.is_empty() {
                command
            } else {
                format!("{command} {}", join_parameters(&args))
            };
            if script.trim().is_empty() {
                return Err("task has no command".to_string());
            }
            cfg.push_value("SCRIPT_TEXT", script);
            cfg.push_value("INDEPENDENT_SCRIPT_PATH", "true");
            cfg.push_value("EXECUTE_IN_TERMINAL", "true");
            cfg
        }
    };

    if !task.cwd.is_empty() {
        cfg.push_value("WORKING_DIRECTORY", table.to_jetbrains(&task.cwd));
    }
    if !task.env.is_empty() {
        cfg.options.push(OptionElement::map(
            "ENV_VARIABLES",
            task.env
                .iter()
                .map(|(k, v)| (k.clone(), table.to_jetbrains(v))),
        ));
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_and_quotes_parameters() {
        assert_eq!(join_parameters(&["--port", "8080"]), "--port 8080");
        assert_eq!(
            join_parameters(&["--name", "My App"]),
            "--name \"My App\""
        );
        assert_eq!(join_parameters::<&str>(&[]), "");
    }

    #[test]
    fn resolved_paths_are_emitted_literally() {
        use crate::model::{Task, TaskKind};

        let mut task = Task::new("build", TaskKind::VscodeTask, "tasks.json");
        task.command = "go build -o bin/app".to_string();
        task.cwd = "/test/project".to_string();

        let table = VariableTable::default();
        let cfg = build_jetbrains_configuration(&table, &task, Flavor::Shell).unwrap();
        // Parse-time resolution already produced a literal location; it must
        // not be rewritten back into a placeholder.
        assert_eq!(cfg.option_value("WORKING_DIRECTORY"), Some("/test/project"));
        assert_eq!(cfg.option_value("SCRIPT_TEXT"), Some("go build -o bin/app"));

        let mut node = Task::new("script", TaskKind::VscodeTask, "tasks.json");
        node.command = "node".to_string();
        node.args = vec!["/test/project/index.js".to_string()];
        let cfg = build_jetbrains_configuration(&table, &node, Flavor::Node).unwrap();
        assert_eq!(
            cfg.option_value("PATH_TO_JS_FILE"),
            Some("/test/project/index.js")
        );
    }

    #[test]
    fn round_trip_keeps_the_classified_category() {
        use crate::classify::classify;
        use crate::model::{Task, TaskKind};
        use crate::parser::RunConfigurationParser;

        let dir = tempfile::tempdir().unwrap();
        let samples = [
            ("java", vec!["com.example.Main"]),
            ("gradle", vec!["build"]),
            ("python", vec!["main.py"]),
        ];
        let tasks: Vec<Task> = samples
            .iter()
            .map(|(cmd, args)| {
                let mut t = Task::new(*cmd, TaskKind::VscodeTask, "tasks.json");
                t.command = cmd.to_string();
                t.args = args.iter().map(|a| a.to_string()).collect();
                t
            })
            .collect();

        let conv = TasksToJetBrains::new(dir.path(), ConvertOptions::default());
        assert_eq!(conv.convert(&tasks).unwrap().converted, 3);

        let out_dir = dir.path().join(".idea/runConfigurations");
        let parsed = RunConfigurationParser::new(dir.path())
            .parse_dir(&out_dir)
            .unwrap();
        assert_eq!(parsed.tasks.len(), 3);
        for original in &tasks {
            let before = classify(&original.command, original.hint).category();
            let back = parsed.tasks.iter().find(|t| t.name == original.name).unwrap();
            let after = classify(&back.command, back.hint).category();
            assert_eq!(before, after, "category drifted for '{}'", original.name);
        }
    }

    #[test]
    fn go_configuration_survives_a_tasks_round_trip() {
        use crate::parser::{RunConfigurationParser, TasksParser};

        let dir = tempfile::tempdir().unwrap();
        let rc_dir = dir.path().join(".idea/runConfigurations");
        fs::create_dir_all(&rc_dir).unwrap();
        fs::write(
            rc_dir.join("Server.xml"),
            r#"<component name="ProjectRunConfigurationManager">
  <configuration name="Server" type="GoApplicationRunConfiguration">
    <option name="PACKAGE" value="./cmd/server"/>
  </configuration>
</component>"#,
        )
        .unwrap();

        // Run configurations out to tasks.json.
        let parsed = RunConfigurationParser::new(dir.path())
            .parse_dir(&rc_dir)
            .unwrap();
        let to_tasks = JetBrainsToTasks::new(dir.path(), ConvertOptions::default());
        assert_eq!(to_tasks.convert(&parsed.tasks).unwrap().converted, 1);

        // And back. The "go" command alone would classify as generic; the
        // detail-carried hint must keep the Go configuration type.
        let tasks_file = dir.path().join(".vscode/tasks.json");
        let reparsed = TasksParser::new(dir.path()).parse_file(&tasks_file).unwrap();
        let back_dir = dir.path().join("roundtrip");
        let to_jetbrains = TasksToJetBrains::new(
            dir.path(),
            ConvertOptions {
                output: Some(back_dir.clone()),
                ..Default::default()
            },
        );
        assert_eq!(to_jetbrains.convert(&reparsed.tasks).unwrap().converted, 1);

        let xml = fs::read_to_string(back_dir.join("Server.xml")).unwrap();
        let file = crate::schema::jetbrains::from_xml(&xml).unwrap();
        assert_eq!(file.configuration.kind, "GoApplicationRunConfiguration");
    }

    #[test]
    fn leftover_placeholders_are_translated() {
        use crate::model::{Task, TaskKind};

        let mut task = Task::new("run", TaskKind::VscodeTask, "tasks.json");
        task.command = "make".to_string();
        task.cwd = "${workspaceFolder}/sub".to_string();
        let table = VariableTable::default();
        let cfg = build_jetbrains_configuration(&table, &task, Flavor::Shell).unwrap();
        assert_eq!(
            cfg.option_value("WORKING_DIRECTORY"),
            Some("$PROJECT_DIR$/sub")
        );
    }
}
