//! Placeholder translation between the VSCode and JetBrains variable alphabets.
//!
//! Two fixed, ordered substitution lists applied as literal whole-string
//! replacement passes. The alphabets are not isomorphic: `${workspaceRoot}`
//! and `$MODULE_DIR$` both collapse onto the canonical workspace token of the
//! other side, and back-translation cannot recover the original spelling.
//! That asymmetry mirrors a real capability gap between the two schemas and
//! is kept as-is.

/// Substitution tables, constructed per use and passed by value so nothing
/// shares mutable state.
#[derive(Debug, Clone)]
pub struct VariableTable {
    to_jetbrains: Vec<(&'static str, &'static str)>,
    to_vscode: Vec<(&'static str, &'static str)>,
}

impl Default for VariableTable {
    fn default() -> Self {
        VariableTable {
            to_jetbrains: vec![
                ("${workspaceFolder}", "$PROJECT_DIR$"),
                ("${workspaceRoot}", "$PROJECT_DIR$"),
                ("${fileDirname}", "$FileDir$"),
                ("${fileBasename}", "$FileName$"),
                ("${fileExtname}", "$FileExt$"),
                ("${relativeFile}", "$FilePathRelativeToProjectRoot$"),
                ("${file}", "$FilePath$"),
            ],
            to_vscode: vec![
                ("$PROJECT_DIR$", "${workspaceFolder}"),
                ("$MODULE_DIR$", "${workspaceFolder}"),
                ("$FileDir$", "${fileDirname}"),
                ("$FileName$", "${fileBasename}"),
                ("$FilePath$", "${file}"),
            ],
        }
    }
}

impl VariableTable {
    /// Rewrite VSCode placeholders into their JetBrains equivalents.
    pub fn to_jetbrains(&self, text: &str) -> String {
        apply(&self.to_jetbrains, text)
    }

    /// Rewrite JetBrains placeholders into their VSCode equivalents.
    pub fn to_vscode(&self, text: &str) -> String {
        apply(&self.to_vscode, text)
    }
}

fn apply(pairs: &[(&str, &str)], text: &str) -> String {
    let mut out = text.to_string();
    for (from, to) in pairs {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}
