//! JSON snapshot of a computed step graph for external inspection.
//!
//! The document is a flat list of `{"StepName", "Dependencies"}` records,
//! one per step, published as an artifact of the job.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use ciplan_common::constants::{ARTIFACTS_DIR, STEP_GRAPH_JSON_FILENAME};
use ciplan_common::error::{CiplanError, Result};

use crate::graph::StepGraph;
use crate::step::Step;

/// One step and the names of the steps it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepWithDependencies {
    /// Name of the step.
    #[serde(rename = "StepName")]
    pub step_name: String,
    /// Names of the steps that must run before it.
    #[serde(rename = "Dependencies", default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<String>,
}

/// A serialized step graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepGraphSnapshot(pub Vec<StepWithDependencies>);

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StepGraphSnapshot {
    /// Projects a graph into records, one per step in input order.
    #[must_use]
    pub fn from_graph<S: Step + ?Sized>(graph: &StepGraph<'_, S>) -> Self {
        let records = graph
            .nodes()
            .map(|(index, node)| StepWithDependencies {
                step_name: node.step().name().to_string(),
                dependencies: graph
                    .parents_of(index)
                    .into_iter()
                    .filter_map(|parent| graph.name_of(parent))
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        Self(records)
    }

    /// Returns the records.
    #[must_use]
    pub fn steps(&self) -> &[StepWithDependencies] {
        &self.0
    }

    /// Writes the snapshot as `ci-operator-step-graph.json` inside `dir`,
    /// creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| CiplanError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = dir.join(STEP_GRAPH_JSON_FILENAME);
        self.write_to_path(&path)?;
        Ok(path)
    }

    /// Writes the snapshot to an exact file path.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json).map_err(|e| CiplanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), steps = self.0.len(), "wrote step graph snapshot");
        Ok(())
    }

    /// Reads a snapshot previously written to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a snapshot.
    pub fn read_from(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|e| CiplanError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_slice(&content)?)
    }

    /// Returns `true` if both snapshots hold the same steps with the same
    /// dependencies, ignoring record and dependency order.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }

    /// Names of steps present in only one snapshot or whose dependencies
    /// differ, sorted.
    #[must_use]
    pub fn differences(&self, other: &Self) -> Vec<String> {
        let left = self.by_name();
        let right = other.by_name();
        let mut names: Vec<&str> = left.keys().chain(right.keys()).copied().collect();
        names.sort_unstable();
        names.dedup();
        names
            .into_iter()
            .filter(|name| left.get(name) != right.get(name))
            .map(str::to_string)
            .collect()
    }

    fn normalized(&self) -> Vec<(&str, Vec<&str>)> {
        let mut records: Vec<(&str, Vec<&str>)> = self
            .0
            .iter()
            .map(|record| (record.step_name.as_str(), sorted_dependencies(record)))
            .collect();
        records.sort();
        records
    }

    fn by_name(&self) -> BTreeMap<&str, Vec<&str>> {
        self.0
            .iter()
            .map(|record| (record.step_name.as_str(), sorted_dependencies(record)))
            .collect()
    }
}

fn sorted_dependencies(record: &StepWithDependencies) -> Vec<&str> {
    let mut dependencies: Vec<&str> = record.dependencies.iter().map(String::as_str).collect();
    dependencies.sort_unstable();
    dependencies
}

impl<S: Step + ?Sized> StepGraph<'_, S> {
    /// Projects this graph into a serializable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StepGraphSnapshot {
        StepGraphSnapshot::from_graph(self)
    }
}

/// Returns the URL of the step graph document for a job, given its base
/// URL such as `https://storage.example.com/logs/job/1283812971092381696`.
#[must_use]
pub fn step_graph_json_url(base_job_url: &str) -> String {
    [base_job_url, ARTIFACTS_DIR, STEP_GRAPH_JSON_FILENAME].join("/")
}
