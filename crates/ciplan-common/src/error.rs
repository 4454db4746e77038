//! Unified error types for the ciplan workspace.
//!
//! Unresolvable links are not errors: a step whose requirement nothing
//! creates simply becomes a root of the graph.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum CiplanError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Targeted step names did not match exactly one step each.
    #[error(
        "the following names were not found in the config or were duplicates: {} (from {})",
        .missing.join(", "),
        .available.join(", ")
    )]
    StepsNotFound {
        /// Requested names left unmatched, in request order.
        missing: Vec<String>,
        /// Names of every step that was supplied, in input order.
        available: Vec<String>,
    },

    /// The step graph cannot be ordered because of a dependency cycle.
    #[error("cyclic dependency detected in step graph at step \"{step}\"")]
    CyclicDependency {
        /// A step that participates in the cycle.
        step: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, CiplanError>;
