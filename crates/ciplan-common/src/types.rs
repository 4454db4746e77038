//! Domain primitive types used across the ciplan workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CiplanError;

/// Fully-qualified reference to a tag in an image stream outside the
/// pipeline's namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageStreamTagReference {
    /// Namespace holding the image stream.
    pub namespace: String,
    /// Image stream name.
    pub name: String,
    /// Tag within the image stream.
    pub tag: String,
}

impl ImageStreamTagReference {
    /// Creates a reference from its three components.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for ImageStreamTagReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.namespace, self.name, self.tag)
    }
}

impl FromStr for ImageStreamTagReference {
    type Err = CiplanError;

    /// Parses `namespace/name:tag`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CiplanError::Config {
            message: format!("invalid image reference \"{s}\", expected namespace/name:tag"),
        };
        let (namespace, rest) = s.split_once('/').ok_or_else(invalid)?;
        let (name, tag) = rest.split_once(':').ok_or_else(invalid)?;
        if [namespace, name, tag].iter().any(|part| part.is_empty()) || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self::new(namespace, name, tag))
    }
}

/// A tag in the pipeline's own image stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineImageStreamTagReference(String);

impl PipelineImageStreamTagReference {
    /// Creates a pipeline tag reference.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PipelineImageStreamTagReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PipelineImageStreamTagReference {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}
