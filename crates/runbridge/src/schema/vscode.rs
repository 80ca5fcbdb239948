//! Serde types for `.vscode/tasks.json` and `.vscode/launch.json`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema version emitted into generated tasks.json files.
pub const TASKS_VERSION: &str = "2.0.0";
/// Schema version emitted into generated launch.json files.
pub const LAUNCH_VERSION: &str = "0.2.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct TasksFile {
    pub version: String,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskEntry {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<TaskGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TaskOptions>,
    #[serde(
        default,
        rename = "problemMatcher",
        skip_serializing_if = "Option::is_none"
    )]
    pub problem_matcher: Option<serde_json::Value>,
    #[serde(default, rename = "dependsOn", skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// The `group` field is either a bare string ("build") or an object with a
/// kind and a default flag. Parsers normalize it to the kind string once;
/// converters pick whichever shape the output calls for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskGroup {
    Name(String),
    Spec {
        kind: String,
        #[serde(default, rename = "isDefault")]
        is_default: bool,
    },
}

impl TaskGroup {
    pub fn kind(&self) -> &str {
        match self {
            TaskGroup::Name(name) => name,
            TaskGroup::Spec { kind, .. } => kind,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cwd: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LaunchFile {
    pub version: String,
    #[serde(default)]
    pub configurations: Vec<LaunchEntry>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LaunchEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub request: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, rename = "mainClass", skip_serializing_if = "Option::is_none")]
    pub main_class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cwd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console: Option<String>,
    #[serde(
        default,
        rename = "stopOnEntry",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub stop_on_entry: bool,
    #[serde(
        default,
        rename = "preLaunchTask",
        skip_serializing_if = "Option::is_none"
    )]
    pub pre_launch_task: Option<String>,
    #[serde(default, rename = "processId", skip_serializing_if = "Option::is_none")]
    pub process_id: Option<ProcessId>,
}

/// `processId` appears as a number, a string, or a picker object depending on
/// the debugger. It only matters for attach requests, which are rejected, so
/// the union is carried opaquely rather than normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessId {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}
