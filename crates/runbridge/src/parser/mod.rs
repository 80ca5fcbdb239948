//! Format parsers normalizing each on-disk schema into canonical tasks.
//!
//! Parsing only fails outright when a file cannot be read or is not
//! well-formed JSON/XML; a malformed entry inside a well-formed file becomes
//! a warning in the returned [`ParseOutcome`](crate::model::ParseOutcome).

use std::path::Path;

pub mod jetbrains;
pub mod vscode_launch;
pub mod vscode_tasks;

pub use jetbrains::RunConfigurationParser;
pub use vscode_launch::LaunchParser;
pub use vscode_tasks::TasksParser;

/// Resolve VSCode workspace placeholders and relative paths against the
/// project root. Values are stored resolved on the canonical task so no raw
/// placeholder leaks past a parser.
pub(crate) fn resolve_vscode_path(project_root: &Path, raw: &str) -> String {
    let root = project_root.to_string_lossy();
    let resolved = raw
        .replace("${workspaceFolder}", &root)
        .replace("${workspaceRoot}", &root);
    if Path::new(&resolved).is_absolute() {
        resolved
    } else {
        project_root.join(&resolved).to_string_lossy().into_owned()
    }
}

/// JetBrains counterpart of [`resolve_vscode_path`].
pub(crate) fn resolve_jetbrains_path(project_root: &Path, raw: &str) -> String {
    let root = project_root.to_string_lossy();
    let resolved = raw
        .replace("$PROJECT_DIR$", &root)
        .replace("$MODULE_DIR$", &root);
    if Path::new(&resolved).is_absolute() {
        resolved
    } else {
        project_root.join(&resolved).to_string_lossy().into_owned()
    }
}
