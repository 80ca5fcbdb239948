//! VSCode launch configurations to JetBrains run configuration files.
//!
//! Same output shape and cardinality as the tasks converter: one XML file per
//! convertible configuration. Launch tasks carry a flavor hint from their
//! `type` field, so classification here never falls back to command sniffing.

use std::path::PathBuf;

use crate::classify;
use crate::model::{naming, ConvertReport, SkipReason, Task, TaskKind};
use crate::schema::jetbrains::{self, RunConfigurationFile};
use crate::variables::VariableTable;

use super::{build_jetbrains_configuration, write_output, ConvertOptions};

pub struct LaunchToJetBrains {
    project_root: PathBuf,
    options: ConvertOptions,
}

impl LaunchToJetBrains {
    pub fn new(project_root: impl Into<PathBuf>, options: ConvertOptions) -> Self {
        LaunchToJetBrains {
            project_root: project_root.into(),
            options,
        }
    }

    fn output_dir(&self) -> PathBuf {
        self.options
            .output
            .clone()
            .unwrap_or_else(|| self.project_root.join(".idea").join("runConfigurations"))
    }

    pub fn convert(&self, tasks: &[Task]) -> anyhow::Result<ConvertReport> {
        let table = VariableTable::default();
        let out_dir = self.output_dir();
        let mut report = ConvertReport::default();

        for task in tasks {
            if task.kind != TaskKind::VscodeLaunch {
                report.skip(
                    &task.name,
                    SkipReason::KindMismatch,
                    format!("expected vscode-launch input, got {}", task.kind.as_str()),
                );
                continue;
            }
            let flavor = classify::classify(&task.command, task.hint);
            let cfg = match build_jetbrains_configuration(&table, task, flavor) {
                Ok(cfg) => cfg,
                Err(detail) => {
                    report.skip(&task.name, SkipReason::Unconvertible, detail);
                    continue;
                }
            };

            let xml = jetbrains::to_xml(&RunConfigurationFile::new(cfg))?;
            let file = out_dir.join(format!("{}.xml", naming::sanitize_file_name(&task.name)));
            write_output(&file, &xml, self.options.dry_run)?;
            report.converted += 1;
        }

        tracing::info!(
            "converted {} launch configuration(s) to {}, skipped {}",
            report.converted,
            out_dir.display(),
            report.skipped
        );
        Ok(report)
    }
}
