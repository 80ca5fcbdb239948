use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::classify::Flavor;

/// Schema family a task was parsed from. Converters filter on this: a
/// converter that targets JetBrains run configurations only accepts
/// `VscodeTask` or `VscodeLaunch` input, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    VscodeTask,
    VscodeLaunch,
    JetBrains,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::VscodeTask => "vscode-task",
            TaskKind::VscodeLaunch => "vscode-launch",
            TaskKind::JetBrains => "jetbrains",
        }
    }
}

/// A unified task or launch configuration, produced by one parser and
/// consumed read-only by converters.
///
/// `command` may still hold a multi-token string for shapes where the source
/// schema stores a whole script line (JetBrains `ShellScript`); converters
/// that need a clean executable re-split it on whitespace.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub name: String,
    pub kind: TaskKind,
    pub command: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cwd: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Runtime flavor recorded by the parser when the source schema declares
    /// it (a launch entry's `type`, a run configuration's type attribute).
    /// Takes precedence over command sniffing during classification.
    #[serde(skip)]
    pub hint: Option<Flavor>,
    /// File this task was parsed from. Diagnostics only.
    pub source: PathBuf,
}

impl Task {
    pub fn new(name: impl Into<String>, kind: TaskKind, source: impl Into<PathBuf>) -> Self {
        Task {
            name: name.into(),
            kind,
            command: String::new(),
            args: Vec::new(),
            cwd: String::new(),
            env: BTreeMap::new(),
            group: None,
            description: None,
            hint: None,
            source: source.into(),
        }
    }
}
