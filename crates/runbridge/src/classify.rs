//! Runtime flavor classification for free-form command strings.
//!
//! Pure and deterministic. A hint recorded by a parser always wins, so a task
//! that already declares its runtime never gets reclassified on a round trip.
//! Without a hint the command string is matched case-insensitively against a
//! fixed priority list; ties resolve by list order, not specificity.

use serde::{Deserialize, Serialize};

/// Broad category used to pick target-schema fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    CompiledApplication,
    BuildTool,
    ScriptedLanguage,
    Generic,
}

/// Concrete runtime/tool flavor inferred from a command or declared by the
/// source schema. `Go` is only ever produced from a hint: a bare "go" command
/// is too short to substring-match safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    Java,
    Go,
    Gradle,
    Maven,
    Node,
    Python,
    Shell,
}

impl Flavor {
    /// Flavor declared by a JetBrains configuration type tag, for sources
    /// that carry the tag instead of a usable command string.
    pub fn from_configuration_type(tag: &str) -> Option<Flavor> {
        match tag {
            "Application" => Some(Flavor::Java),
            "GradleRunConfiguration" => Some(Flavor::Gradle),
            "GoApplicationRunConfiguration" => Some(Flavor::Go),
            "NodeJSConfigurationType" => Some(Flavor::Node),
            "PythonConfigurationType" => Some(Flavor::Python),
            "ShellScript" => Some(Flavor::Shell),
            _ => None,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Flavor::Java | Flavor::Go => Category::CompiledApplication,
            Flavor::Gradle | Flavor::Maven => Category::BuildTool,
            Flavor::Node | Flavor::Python => Category::ScriptedLanguage,
            Flavor::Shell => Category::Generic,
        }
    }
}

/// Infer the flavor for a command string, honoring an explicit hint first.
pub fn classify(command: &str, hint: Option<Flavor>) -> Flavor {
    if let Some(flavor) = hint {
        return flavor;
    }
    let command = command.to_ascii_lowercase();
    if command.contains("java") {
        Flavor::Java
    } else if command.contains("gradle") {
        Flavor::Gradle
    } else if command.contains("maven") || command.contains("mvn") {
        Flavor::Maven
    } else if command.contains("npm") || command.contains("node") {
        Flavor::Node
    } else if command.contains("python") || command.contains("py") {
        Flavor::Python
    } else {
        Flavor::Shell
    }
}
