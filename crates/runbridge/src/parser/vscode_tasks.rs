//! Parser for VSCode `tasks.json` files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::classify::Flavor;
use crate::jsonc;
use crate::model::{ParseOutcome, Task, TaskKind};
use crate::schema::vscode::{TaskEntry, TasksFile};

use super::resolve_vscode_path;

pub struct TasksParser {
    project_root: PathBuf,
}

impl TasksParser {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        TasksParser {
            project_root: project_root.into(),
        }
    }

    /// Parse a tasks.json file into canonical tasks. Fails only on unreadable
    /// files or invalid JSON; a bad entry is skipped with a warning.
    pub fn parse_file(&self, path: &Path) -> anyhow::Result<ParseOutcome> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read tasks file {}", path.display()))?;
        let file: TasksFile = jsonc::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        tracing::debug!(
            "parsing {} ({} entries, version {})",
            path.display(),
            file.tasks.len(),
            file.version
        );

        let mut outcome = ParseOutcome::default();
        for entry in file.tasks {
            if entry.label.trim().is_empty() {
                outcome.warn("<unnamed>", "task entry has no label");
                continue;
            }
            outcome.tasks.push(self.convert_entry(entry, path));
        }
        Ok(outcome)
    }

    fn convert_entry(&self, entry: TaskEntry, source: &Path) -> Task {
        let mut task = Task::new(entry.label, TaskKind::VscodeTask, source);
        task.command = entry.command;
        task.args = entry.args;
        task.group = entry.group.map(|g| g.kind().to_string());
        task.description = entry.detail.filter(|d| !d.is_empty());
        // A detail written by the opposite-direction converter names the
        // originating configuration type; recover it as the flavor hint so
        // the task does not reclassify on its way back.
        task.hint = task.description.as_deref().and_then(hint_from_detail);

        if let Some(options) = entry.options {
            if !options.cwd.is_empty() {
                task.cwd = resolve_vscode_path(&self.project_root, &options.cwd);
            }
            task.env = options.env;
        }
        if task.cwd.is_empty() {
            task.cwd = self.project_root.to_string_lossy().into_owned();
        }
        task
    }
}

/// Match the `JetBrains <type> configuration` detail text emitted when a run
/// configuration was converted into a task entry.
fn hint_from_detail(detail: &str) -> Option<Flavor> {
    let tag = detail
        .strip_prefix("JetBrains ")?
        .strip_suffix(" configuration")?;
    Flavor::from_configuration_type(tag)
}
