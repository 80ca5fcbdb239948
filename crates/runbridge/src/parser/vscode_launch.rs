//! Parser for VSCode `launch.json` files.
//!
//! Recognizes go, node, and python launch entries; everything else (and any
//! attach request) is skipped with a per-entry warning.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::classify::Flavor;
use crate::jsonc;
use crate::model::{ParseOutcome, Task, TaskKind};
use crate::schema::vscode::{LaunchEntry, LaunchFile};

use super::resolve_vscode_path;

pub struct LaunchParser {
    project_root: PathBuf,
}

impl LaunchParser {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        LaunchParser {
            project_root: project_root.into(),
        }
    }

    pub fn parse_file(&self, path: &Path) -> anyhow::Result<ParseOutcome> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read launch file {}", path.display()))?;
        let file: LaunchFile = jsonc::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        tracing::debug!(
            "parsing {} ({} configurations)",
            path.display(),
            file.configurations.len()
        );

        let mut outcome = ParseOutcome::default();
        for entry in file.configurations {
            let name = entry.name.clone();
            match self.convert_entry(entry, path) {
                Ok(task) => outcome.tasks.push(task),
                Err(reason) => outcome.warn(name, reason),
            }
        }
        Ok(outcome)
    }

    /// Look up the `preLaunchTask` reference of a named configuration.
    pub fn pre_launch_task(&self, path: &Path, config_name: &str) -> anyhow::Result<Option<String>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read launch file {}", path.display()))?;
        let file: LaunchFile = jsonc::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        file.configurations
            .into_iter()
            .find(|c| c.name == config_name)
            .map(|c| c.pre_launch_task)
            .ok_or_else(|| anyhow::anyhow!("launch configuration '{config_name}' not found"))
    }

    fn convert_entry(&self, entry: LaunchEntry, source: &Path) -> Result<Task, String> {
        if entry.name.trim().is_empty() {
            return Err("launch configuration has no name".to_string());
        }
        if entry.request == "attach" {
            return Err(format!("{} attach mode not supported", entry.kind));
        }
        if entry.request != "launch" {
            return Err(format!("unsupported request type: {}", entry.request));
        }

        let mut task = Task::new(&entry.name, TaskKind::VscodeLaunch, source);
        task.description = Some(format!("{} {} configuration", entry.kind, entry.request));
        task.group = Some("launch".to_string());

        match entry.kind.as_str() {
            "go" => {
                task.hint = Some(Flavor::Go);
                task.command = "go".to_string();
                task.args.push("run".to_string());
                match entry.program.as_deref() {
                    Some(program) if !program.is_empty() => task
                        .args
                        .push(resolve_vscode_path(&self.project_root, program)),
                    _ => task.args.push(".".to_string()),
                }
                task.args.extend(entry.args.iter().cloned());
            }
            "node" => {
                task.hint = Some(Flavor::Node);
                task.command = "node".to_string();
                let program = entry
                    .program
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| "node launch config requires a program path".to_string())?;
                task.args
                    .push(resolve_vscode_path(&self.project_root, program));
                task.args.extend(entry.args.iter().cloned());
            }
            "python" => {
                task.hint = Some(Flavor::Python);
                task.command = "python".to_string();
                let program = entry
                    .program
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| "python launch config requires a program path".to_string())?;
                task.args
                    .push(resolve_vscode_path(&self.project_root, program));
                task.args.extend(entry.args.iter().cloned());
            }
            other => return Err(format!("unsupported launch type: {other}")),
        }

        if !entry.cwd.is_empty() {
            task.cwd = resolve_vscode_path(&self.project_root, &entry.cwd);
        } else {
            task.cwd = self.project_root.to_string_lossy().into_owned();
        }

        for (key, value) in entry.env {
            // Resolve only workspace markers; other values may reference
            // runtime state and stay verbatim for later resolution.
            let value = if value.contains("${workspace") {
                resolve_vscode_path(&self.project_root, &value)
            } else {
                value
            };
            task.env.insert(key, value);
        }

        Ok(task)
    }
}
