//! Typed references to the resources steps require and create.
//!
//! A [`StepLink`] on the requiring side is compared against links on the
//! creating side with [`StepLink::satisfied_by`]. The relation is
//! directional and only partially matches: a producer of a whole stream
//! satisfies a consumer of one of its tags, but not the other way around.

use serde::{Deserialize, Serialize};

use ciplan_common::constants::{PIPELINE_IMAGE_STREAM, RELEASE_IMAGE_STREAM};
use ciplan_common::types::{ImageStreamTagReference, PipelineImageStreamTagReference};

use crate::naming::release_stream_for;

/// A reference to a resource that a step requires or creates.
///
/// Links compare by value, so two links built independently for the
/// same resource are equal and satisfy each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepLink {
    /// Every tag of an image stream in the pipeline's namespace.
    InternalImageStream {
        /// Image stream name.
        name: String,
    },
    /// One tag of an image stream in the pipeline's namespace.
    InternalImageStreamTag {
        /// Image stream name.
        name: String,
        /// Tag within the stream.
        tag: String,
    },
    /// An image outside the pipeline's namespace.
    ExternalImage {
        /// Namespace holding the stream.
        namespace: String,
        /// Image stream name.
        name: String,
        /// Tag within the stream.
        tag: String,
    },
    /// Wildcard satisfied by any link.
    AllSteps,
    /// Marker for "every image build has finished".
    ImagesReady,
    /// Marker for "the RPM repository is being served".
    RpmRepo,
}

impl StepLink {
    /// Returns `true` if creating `other` satisfies the need expressed by
    /// `self`, either partially or fully.
    ///
    /// When it does, the step creating `other` runs first.
    #[must_use]
    pub fn satisfied_by(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AllSteps, _) => true,
            // a whole stream is only proven by a producer of the whole stream
            (Self::InternalImageStream { name }, Self::InternalImageStream { name: other }) => {
                name == other
            }
            (
                Self::InternalImageStreamTag { name, tag },
                Self::InternalImageStreamTag {
                    name: other_name,
                    tag: other_tag,
                },
            ) => name == other_name && tag == other_tag,
            (
                Self::InternalImageStreamTag { name, .. },
                Self::InternalImageStream { name: other },
            ) => name == other,
            (
                Self::ExternalImage {
                    namespace,
                    name,
                    tag,
                },
                Self::ExternalImage {
                    namespace: other_namespace,
                    name: other_name,
                    tag: other_tag,
                },
            ) => namespace == other_namespace && name == other_name && tag == other_tag,
            (Self::ImagesReady, Self::ImagesReady) | (Self::RpmRepo, Self::RpmRepo) => true,
            _ => false,
        }
    }
}

/// Link to a tag in the pipeline's own image stream.
#[must_use]
pub fn internal_image_link(tag: &PipelineImageStreamTagReference) -> StepLink {
    StepLink::InternalImageStreamTag {
        name: PIPELINE_IMAGE_STREAM.to_string(),
        tag: tag.as_str().to_string(),
    }
}

/// Link to a tag in the release payload stream.
#[must_use]
pub fn release_payload_image_link(tag: impl Into<String>) -> StepLink {
    StepLink::InternalImageStreamTag {
        name: RELEASE_IMAGE_STREAM.to_string(),
        tag: tag.into(),
    }
}

/// Link to the whole `stable(-name)?` stream holding a release's images.
#[must_use]
pub fn release_images_link(name: &str) -> StepLink {
    StepLink::InternalImageStream {
        name: release_stream_for(name),
    }
}

/// Link to one tag in the `stable(-name)?` stream of a release.
#[must_use]
pub fn release_image_tag_link(name: &str, tag: impl Into<String>) -> StepLink {
    StepLink::InternalImageStreamTag {
        name: release_stream_for(name),
        tag: tag.into(),
    }
}

/// Link to an image outside the pipeline's namespace.
#[must_use]
pub fn external_image_link(reference: &ImageStreamTagReference) -> StepLink {
    StepLink::ExternalImage {
        namespace: reference.namespace.clone(),
        name: reference.name.clone(),
        tag: reference.tag.clone(),
    }
}

/// Wildcard link satisfied by every other link.
#[must_use]
pub const fn all_steps_link() -> StepLink {
    StepLink::AllSteps
}

/// Marker link for completion of all image builds.
#[must_use]
pub const fn images_ready_link() -> StepLink {
    StepLink::ImagesReady
}

/// Marker link for the RPM repository.
#[must_use]
pub const fn rpm_repo_link() -> StepLink {
    StepLink::RpmRepo
}

/// Returns `true` if any candidate satisfies any of the required links.
#[must_use]
pub fn has_any_links(required: &[StepLink], candidates: &[StepLink]) -> bool {
    candidates
        .iter()
        .any(|candidate| required.iter().any(|link| link.satisfied_by(candidate)))
}

/// Returns `true` if every needle is satisfied by some link in the haystack.
///
/// The haystack link is the requiring side of each comparison.
#[must_use]
pub fn has_all_links(needles: &[StepLink], haystack: &[StepLink]) -> bool {
    needles
        .iter()
        .all(|needle| haystack.iter().any(|hay| hay.satisfied_by(needle)))
}
