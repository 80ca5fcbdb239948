//! JetBrains run configurations to one merged VSCode `tasks.json`.
//!
//! Opposite cardinality to the JetBrains-bound converters: the whole batch
//! lands in a single file, entries in input order. The output file is
//! rewritten whole; nothing is merged with pre-existing content.

use std::path::PathBuf;

use crate::model::{ConvertReport, SkipReason, Task, TaskKind};
use crate::schema::vscode::{TaskEntry, TaskGroup, TaskOptions, TasksFile, TASKS_VERSION};
use crate::variables::VariableTable;

use super::{write_output, ConvertOptions};

pub struct JetBrainsToTasks {
    project_root: PathBuf,
    options: ConvertOptions,
}

impl JetBrainsToTasks {
    pub fn new(project_root: impl Into<PathBuf>, options: ConvertOptions) -> Self {
        JetBrainsToTasks {
            project_root: project_root.into(),
            options,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.options
            .output
            .clone()
            .unwrap_or_else(|| self.project_root.join(".vscode").join("tasks.json"))
    }

    pub fn convert(&self, tasks: &[Task]) -> anyhow::Result<ConvertReport> {
        let table = VariableTable::default();
        let mut report = ConvertReport::default();
        let mut entries = Vec::new();

        for task in tasks {
            if task.kind != TaskKind::JetBrains {
                report.skip(
                    &task.name,
                    SkipReason::KindMismatch,
                    format!("expected jetbrains input, got {}", task.kind.as_str()),
                );
                continue;
            }
            if task.command.trim().is_empty() {
                report.skip(&task.name, SkipReason::Unconvertible, "task has no command");
                continue;
            }
            entries.push(self.build_entry(task, &table));
            report.converted += 1;
        }

        let path = self.output_path();
        if !entries.is_empty() {
            let file = TasksFile {
                version: TASKS_VERSION.to_string(),
                tasks: entries,
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

    fn build_entry(&self, task: &Task, table: &VariableTable) -> TaskEntry {
        let mut entry = TaskEntry {
            label: task.name.clone(),
            kind: "shell".to_string(),
            command: table.to_vscode(&task.command),
            args: task.args.iter().map(|a| table.to_vscode(a)).collect(),
            detail: task.description.clone(),
            ..Default::default()
        };

        // Only the group kinds tasks.json understands survive; "run" and
        // friends have no equivalent there.
        entry.group = task
            .group
            .as_deref()
            .filter(|g| *g == "build" || *g == "test")
            .map(|g| TaskGroup::Name(g.to_string()));

        // A working directory equal to the project root is the tasks.json
        // default and stays implicit; anything else is carried literally.
        let root = self.project_root.to_string_lossy();
        let mut options = TaskOptions::default();
        if !task.cwd.is_empty() && task.cwd != root {
            options.cwd = table.to_vscode(&task.cwd);
        }
        options.env = task
            .env
            .iter()
            .map(|(k, v)| (k.clone(), table.to_vscode(v)))
            .collect();
        if !options.cwd.is_empty() || !options.env.is_empty() {
            entry.options = Some(options);
        }
        entry
    }
}
