//! Naming conventions between releases and the image streams holding them.

use ciplan_common::constants::{
    LATEST_RELEASE_NAME, PIPELINE_IMAGE_STREAM, RELEASE_IMAGE_STREAM, STABLE_IMAGE_STREAM,
};
use ciplan_common::types::PipelineImageStreamTagReference;

use crate::link::{StepLink, internal_image_link, release_images_link, release_payload_image_link};

/// Determines the image stream into which a named release is imported
/// or assembled.
#[must_use]
pub fn release_stream_for(name: &str) -> String {
    if name == LATEST_RELEASE_NAME {
        return STABLE_IMAGE_STREAM.to_string();
    }
    format!("{STABLE_IMAGE_STREAM}-{name}")
}

/// Determines the named release that was imported or assembled into an
/// image stream.
#[must_use]
pub fn release_name_from(stream: &str) -> String {
    if stream == STABLE_IMAGE_STREAM {
        return LATEST_RELEASE_NAME.to_string();
    }
    let prefix = format!("{STABLE_IMAGE_STREAM}-");
    stream.strip_prefix(&prefix).unwrap_or(stream).to_string()
}

/// Returns `true` if the stream was created from an import or assembly
/// of a release.
#[must_use]
pub fn is_release_stream(stream: &str) -> bool {
    stream.starts_with(STABLE_IMAGE_STREAM)
}

/// Returns `true` if the stream holds release payload images.
#[must_use]
pub fn is_release_payload_stream(stream: &str) -> bool {
    stream == RELEASE_IMAGE_STREAM
}

/// Determines the link a user's image dependency requires.
///
/// Returns `None` when the stream belongs to none of the known
/// categories; callers treat that as a configuration error.
#[must_use]
pub fn link_for_image(image_stream: &str, tag: &str) -> Option<StepLink> {
    if image_stream == PIPELINE_IMAGE_STREAM {
        // an image this pipeline builds
        return Some(internal_image_link(&PipelineImageStreamTagReference::new(tag)));
    }
    if is_release_stream(image_stream) {
        // component tags are implicit in the release import and never
        // appear in the graph, so wait for the whole stream
        return Some(release_images_link(&release_name_from(image_stream)));
    }
    if is_release_payload_stream(image_stream) {
        return Some(release_payload_image_link(tag));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_release_uses_base_stream() {
        assert_eq!(release_stream_for("latest"), "stable");
        assert_eq!(release_name_from("stable"), "latest");
    }

    #[test]
    fn named_release_uses_suffixed_stream() {
        assert_eq!(release_stream_for("initial"), "stable-initial");
        assert_eq!(release_name_from("stable-initial"), "initial");
    }

    #[test]
    fn release_names_round_trip() {
        for name in ["latest", "initial", "previous", "4.16"] {
            assert_eq!(release_name_from(&release_stream_for(name)), name);
        }
    }

    #[test]
    fn release_stream_prefix_has_no_separator() {
        assert!(is_release_stream("stable"));
        assert!(is_release_stream("stable-initial"));
        assert!(is_release_stream("stablefoo"));
        assert!(!is_release_stream("release"));
        assert!(!is_release_stream("pipeline"));
    }

    #[test]
    fn payload_stream_is_exact_match() {
        assert!(is_release_payload_stream("release"));
        assert!(!is_release_payload_stream("release-initial"));
        assert!(!is_release_payload_stream("stable"));
    }

    #[test]
    fn pipeline_image_maps_to_internal_tag() {
        assert_eq!(
            link_for_image("pipeline", "src"),
            Some(StepLink::InternalImageStreamTag {
                name: "pipeline".into(),
                tag: "src".into(),
            })
        );
    }

    #[test]
    fn release_component_maps_to_whole_stream() {
        assert_eq!(
            link_for_image("stable-initial", "cli"),
            Some(StepLink::InternalImageStream {
                name: "stable-initial".into(),
            })
        );
        assert_eq!(
            link_for_image("stable", "cli"),
            Some(StepLink::InternalImageStream {
                name: "stable".into(),
            })
        );
    }

    #[test]
    fn payload_maps_to_release_tag() {
        assert_eq!(
            link_for_image("release", "latest"),
            Some(StepLink::InternalImageStreamTag {
                name: "release".into(),
                tag: "latest".into(),
            })
        );
    }

    #[test]
    fn unknown_stream_has_no_link() {
        assert_eq!(link_for_image("origin", "base"), None);
        assert_eq!(link_for_image("", "base"), None);
    }
}
