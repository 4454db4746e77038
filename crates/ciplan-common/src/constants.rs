//! Process-wide naming conventions for image streams and artifacts.

/// Image stream holding the images built by the pipeline itself.
pub const PIPELINE_IMAGE_STREAM: &str = "pipeline";

/// Image stream holding release payload images.
///
/// Payload images live apart from the `stable` component streams.
pub const RELEASE_IMAGE_STREAM: &str = "release";

/// Base image stream into which the default release is imported.
///
/// Other named releases use `stable-<name>`.
pub const STABLE_IMAGE_STREAM: &str = "stable";

/// Name of the default (latest) release.
pub const LATEST_RELEASE_NAME: &str = "latest";

/// File name of the JSON step graph snapshot.
pub const STEP_GRAPH_JSON_FILENAME: &str = "ci-operator-step-graph.json";

/// Directory under a job URL where artifacts are published.
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Default local directory for written artifacts.
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Default manifest file read by the CLI.
pub const DEFAULT_MANIFEST_FILE: &str = "steps.yaml";
