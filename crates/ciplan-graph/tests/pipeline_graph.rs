//! Graph resolution over a pipeline shaped like a typical CI job.

use std::collections::HashSet;

use ciplan_common::error::CiplanError;
use ciplan_common::types::ImageStreamTagReference;
use ciplan_graph::link::{
    all_steps_link, external_image_link, images_ready_link, internal_image_link,
    release_images_link, rpm_repo_link,
};
use ciplan_graph::naming::link_for_image;
use ciplan_graph::{
    DeclaredStep, Step, StepGraph, StepLink, build_graph, build_partial_graph, has_any_links,
};

fn pipeline(tag: &str) -> StepLink {
    internal_image_link(&tag.into())
}

fn image_dependency(stream: &str, tag: &str) -> StepLink {
    link_for_image(stream, tag).expect("known image stream")
}

fn job() -> Vec<DeclaredStep> {
    let base = ImageStreamTagReference::new("ocp", "builder", "rhel-9-golang-1.22");
    vec![
        DeclaredStep::new("[input:root]")
            .requiring(external_image_link(&base))
            .creating(pipeline("root")),
        DeclaredStep::new("import-base").creating(external_image_link(&base)),
        DeclaredStep::new("src")
            .requiring(pipeline("root"))
            .creating(pipeline("src")),
        DeclaredStep::new("bin")
            .requiring(pipeline("src"))
            .creating(pipeline("bin")),
        DeclaredStep::new("rpms")
            .requiring(pipeline("bin"))
            .creating(pipeline("rpms")),
        DeclaredStep::new("serve-rpms")
            .requiring(pipeline("rpms"))
            .creating(rpm_repo_link()),
        DeclaredStep::new("release:latest").creating(release_images_link("latest")),
        DeclaredStep::new("operator")
            .requiring(pipeline("bin"))
            .requiring(rpm_repo_link())
            .creating(pipeline("operator")),
        DeclaredStep::new("images-ready")
            .requiring(pipeline("operator"))
            .creating(images_ready_link()),
        DeclaredStep::new("unit").requiring(pipeline("src")),
        DeclaredStep::new("e2e")
            .requiring(images_ready_link())
            .requiring(image_dependency("stable", "cli")),
        DeclaredStep::new("lint"),
        DeclaredStep::new("gather").requiring(all_steps_link()),
    ]
}

fn names<'a>(graph: &StepGraph<'a, DeclaredStep>) -> HashSet<&'a str> {
    graph.step_names().into_iter().collect()
}

#[test]
fn steps_without_requirements_are_always_roots() {
    let steps = job();
    let graph = build_graph(&steps);
    let roots: HashSet<&str> = graph.root_names().into_iter().collect();
    for step in steps.iter().filter(|step| step.requires().is_empty()) {
        assert!(roots.contains(step.name()), "{} should be a root", step.name());
    }
}

#[test]
fn no_parent_has_duplicate_children() {
    let steps = job();
    let graph = build_graph(&steps);
    for (_, node) in graph.nodes() {
        let unique: HashSet<_> = node.children().iter().collect();
        assert_eq!(unique.len(), node.children().len(), "{}", node.step().name());
    }
}

#[test]
fn full_graph_is_acyclic() {
    let steps = job();
    let graph = build_graph(&steps);
    let order = graph.execution_order().expect("job graph has no cycles");
    assert_eq!(order.len(), steps.len());
}

#[test]
fn partial_graph_is_subset_closed_under_requirements() {
    let steps = job();
    let full = names(&build_graph(&steps));

    for target in ["e2e", "unit", "operator", "lint", "serve-rpms", "gather"] {
        let partial = build_partial_graph(&steps, &[target]).expect("target exists");
        let selected = names(&partial);
        assert!(selected.is_subset(&full), "{target}: not a subset");
        assert!(selected.contains(target), "{target}: target missing");

        let required: Vec<StepLink> = steps
            .iter()
            .filter(|step| selected.contains(step.name()))
            .flat_map(Step::requires)
            .collect();
        for step in &steps {
            if has_any_links(&required, &step.creates()) {
                assert!(
                    selected.contains(step.name()),
                    "{target}: creator {} left out",
                    step.name()
                );
            }
        }
    }
}

#[test]
fn partial_graph_for_e2e_contains_exactly_its_dependencies() {
    let steps = job();
    let graph = build_partial_graph(&steps, &["e2e"]).expect("e2e exists");
    assert_eq!(
        graph.step_names(),
        vec![
            "[input:root]",
            "import-base",
            "src",
            "bin",
            "rpms",
            "serve-rpms",
            "release:latest",
            "operator",
            "images-ready",
            "e2e",
        ]
    );
    assert_eq!(graph.root_names(), vec!["import-base", "release:latest"]);
}

#[test]
fn partial_graph_for_lint_is_lint_alone() {
    let steps = job();
    let graph = build_partial_graph(&steps, &["lint"]).expect("lint exists");
    assert_eq!(graph.step_names(), vec!["lint"]);
}

#[test]
fn multiple_targets_share_dependencies() {
    let steps = job();
    let graph = build_partial_graph(&steps, &["unit", "serve-rpms"]).expect("targets exist");
    assert_eq!(
        graph.step_names(),
        vec!["[input:root]", "import-base", "src", "bin", "rpms", "serve-rpms", "unit"]
    );
}

#[test]
fn unknown_target_fails_without_a_graph() {
    let steps = job();
    let err = build_partial_graph(&steps, &["unit", "verify"]).expect_err("verify is unknown");
    let CiplanError::StepsNotFound { missing, available } = err else {
        panic!("expected StepsNotFound");
    };
    assert_eq!(missing, vec!["verify"]);
    assert_eq!(available.len(), steps.len());
    assert!(available.iter().any(|name| name == "unit"));
}
