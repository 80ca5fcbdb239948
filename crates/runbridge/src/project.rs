//! Conventional configuration locations inside a project checkout.
//!
//! Pure filesystem metadata: existence probes and path derivation only, no
//! parsing. Callers hand the interesting paths to the parsers themselves.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Where each editor keeps its configuration under one project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when a `.vscode` directory exists.
    pub fn has_vscode(&self) -> bool {
        self.root.join(".vscode").is_dir()
    }

    /// True when an `.idea/runConfigurations` directory exists.
    pub fn has_jetbrains(&self) -> bool {
        self.run_configurations_dir().is_dir()
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.root.join(".vscode").join("tasks.json")
    }

    pub fn launch_path(&self) -> PathBuf {
        self.root.join(".vscode").join("launch.json")
    }

    pub fn run_configurations_dir(&self) -> PathBuf {
        self.root.join(".idea").join("runConfigurations")
    }

    /// Existing run configuration files, sorted by file name.
    pub fn run_configuration_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        let dir = self.run_configurations_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
            .with_context(|| format!("failed to read {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("xml"))
            .collect();
        paths.sort();
        Ok(paths)
    }
}
