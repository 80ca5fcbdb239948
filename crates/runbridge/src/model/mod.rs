//! Canonical task model shared by every parser and converter.

pub mod naming;
pub mod report;
pub mod types;

pub use naming::*;
pub use report::*;
pub use types::*;
