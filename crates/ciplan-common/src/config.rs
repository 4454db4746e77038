//! Configuration model for graph planning runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings that control how a planned step graph is checked and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Directory the step graph snapshot is written into.
    pub artifact_dir: PathBuf,
    /// Whether to compute an execution order and reject cyclic graphs.
    pub verify_acyclic: bool,
    /// Base URL of the job, used to report where the snapshot is published.
    pub base_job_url: Option<String>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from(crate::constants::DEFAULT_ARTIFACT_DIR),
            verify_acyclic: true,
            base_job_url: None,
        }
    }
}
