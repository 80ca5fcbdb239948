//! Translate task and launch configurations between VSCode and JetBrains
//! projects.
//!
//! Parsers normalize `.vscode/tasks.json`, `.vscode/launch.json` and
//! `.idea/runConfigurations/*.xml` into one canonical [`model::Task`];
//! converters re-emit a task batch in the other editor's schema. The crate
//! never executes anything and installs no tracing subscriber; it is the
//! translation engine consumed by a CLI or runner.

pub mod classify;
pub mod convert;
pub mod jsonc;
pub mod model;
pub mod parser;
pub mod project;
pub mod resolve;
pub mod schema;
pub mod variables;

pub use classify::{classify, Category, Flavor};
pub use convert::{
    ConvertOptions, JetBrainsToLaunch, JetBrainsToTasks, LaunchToJetBrains, TasksToJetBrains,
};
pub use model::{ConvertReport, ParseOutcome, ParseWarning, Task, TaskKind};
pub use parser::{LaunchParser, RunConfigurationParser, TasksParser};
pub use project::ProjectLayout;
pub use resolve::{resolve_name, resolve_task, Resolution};
pub use variables::VariableTable;
