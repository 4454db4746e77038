//! Step manifest files declaring steps and the links between them.
//!
//! Each link entry is either an explicit link (`kind: rpm_repo`), an image
//! dependency resolved through the stream naming conventions
//! (`{ stream: stable, tag: cli }`), or an external image
//! (`{ external: ocp/builder:golang }`).

use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

use ciplan_common::types::ImageStreamTagReference;
use ciplan_graph::link::external_image_link;
use ciplan_graph::naming::link_for_image;
use ciplan_graph::{DeclaredStep, StepLink};

/// Top-level manifest document.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Declared steps, in pipeline order.
    pub steps: Vec<StepDecl>,
}

/// A step as written in the manifest.
#[derive(Debug, Deserialize)]
pub struct StepDecl {
    /// Step name. Unnamed steps cannot be targeted.
    #[serde(default)]
    pub name: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Links the step requires.
    #[serde(default)]
    pub requires: Vec<LinkDecl>,
    /// Links the step creates.
    #[serde(default)]
    pub creates: Vec<LinkDecl>,
}

/// A link entry in the manifest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LinkDecl {
    /// A link spelled out by kind.
    Link(StepLink),
    /// An image dependency on a stream in the test namespace.
    Image {
        /// Image stream name.
        stream: String,
        /// Tag within the stream.
        tag: String,
    },
    /// An image outside the test namespace, as `namespace/name:tag`.
    External {
        /// Image reference.
        external: String,
    },
}

impl LinkDecl {
    fn resolve(self, step: &str) -> anyhow::Result<StepLink> {
        match self {
            Self::Link(link) => Ok(link),
            Self::Image { stream, tag } => match link_for_image(&stream, &tag) {
                Some(link) => Ok(link),
                None => {
                    tracing::warn!(step, stream = %stream, tag = %tag, "unrecognized image stream");
                    bail!("step \"{step}\" depends on {stream}:{tag}, which is in no known image stream")
                }
            },
            Self::External { external } => {
                let reference: ImageStreamTagReference = external
                    .parse()
                    .with_context(|| format!("step \"{step}\" has an invalid external image"))?;
                Ok(external_image_link(&reference))
            }
        }
    }
}

impl Manifest {
    /// Parses a manifest from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("failed to parse step manifest")
    }

    /// Reads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::info!(path = %path.display(), "loading step manifest");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display()))?;
        Self::parse(&content)
    }

    /// Resolves every link and returns the declared steps.
    ///
    /// # Errors
    ///
    /// Returns an error if a link refers to an unrecognized image.
    pub fn into_steps(self) -> anyhow::Result<Vec<DeclaredStep>> {
        self.steps
            .into_iter()
            .map(|decl| {
                let requires = decl
                    .requires
                    .into_iter()
                    .map(|link| link.resolve(&decl.name))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                let creates = decl
                    .creates
                    .into_iter()
                    .map(|link| link.resolve(&decl.name))
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(DeclaredStep {
                    name: decl.name,
                    description: decl.description,
                    requires,
                    creates,
                })
            })
            .collect()
    }
}

/// Loads a manifest file and resolves it into steps.
///
/// # Errors
///
/// Returns an error if loading or link resolution fails.
pub fn load_steps(path: &Path) -> anyhow::Result<Vec<DeclaredStep>> {
    Manifest::load(path)?.into_steps()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciplan_graph::link::{release_images_link, rpm_repo_link};

    const MANIFEST: &str = r"
steps:
  - name: src
    description: Clone the repository
    creates:
      - kind: internal_image_stream_tag
        name: pipeline
        tag: src
  - name: rpms
    creates:
      - kind: rpm_repo
  - name: e2e
    requires:
      - stream: stable
        tag: cli
      - kind: rpm_repo
      - external: ocp/builder:golang-1.22
";

    #[test]
    fn manifest_resolves_every_link_form() {
        let steps = Manifest::parse(MANIFEST)
            .expect("parse")
            .into_steps()
            .expect("resolve");
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].description, "Clone the repository");
        assert_eq!(
            steps[2].requires,
            vec![
                release_images_link("latest"),
                rpm_repo_link(),
                external_image_link(&ImageStreamTagReference::new(
                    "ocp",
                    "builder",
                    "golang-1.22"
                )),
            ]
        );
    }

    #[test]
    fn unknown_image_stream_is_a_configuration_error() {
        let manifest = Manifest::parse(
            "steps:\n  - name: e2e\n    requires:\n      - stream: origin\n        tag: base\n",
        )
        .expect("parse");
        let err = manifest.into_steps().expect_err("origin is not a known stream");
        assert!(err.to_string().contains("no known image stream"), "got: {err}");
    }

    #[test]
    fn malformed_external_image_is_rejected() {
        let manifest =
            Manifest::parse("steps:\n  - name: e2e\n    creates:\n      - external: builder\n")
                .expect("parse");
        assert!(manifest.into_steps().is_err());
    }

    #[test]
    fn step_without_name_is_accepted_as_unnamed() {
        let steps = Manifest::parse("steps:\n  - creates:\n      - kind: rpm_repo\n")
            .expect("parse")
            .into_steps()
            .expect("resolve");
        assert_eq!(steps.len(), 1);
        assert!(steps[0].name.is_empty());
        assert_eq!(steps[0].creates, vec![rpm_repo_link()]);
    }

    #[test]
    fn load_reads_manifest_file() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("steps.yaml");
        std::fs::write(&path, MANIFEST).expect("write");
        let steps = load_steps(&path).expect("load");
        assert_eq!(steps[1].name, "rpms");
    }
}
