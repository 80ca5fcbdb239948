//! On-disk schema types for both ecosystems, shared by parsers and converters.

pub mod jetbrains;
pub mod vscode;
