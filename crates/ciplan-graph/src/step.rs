//! The capability contract a pipeline step exposes to graph resolution.
//!
//! Execution of the step's work belongs to the executor consuming the
//! graph and is not part of this trait.

use std::rc::Rc;
use std::sync::Arc;

use crate::link::StepLink;

/// A self-contained unit of work the build pipeline needs to do.
pub trait Step {
    /// Name used to target the step. An empty name cannot be targeted.
    fn name(&self) -> &str;

    /// Short, human readable description of the step.
    fn description(&self) -> &str {
        ""
    }

    /// Resources that must exist before the step runs.
    fn requires(&self) -> Vec<StepLink>;

    /// Resources the step produces.
    fn creates(&self) -> Vec<StepLink>;
}

macro_rules! forward_step {
    ($wrapper:ident) => {
        impl<T: Step + ?Sized> Step for $wrapper<T> {
            fn name(&self) -> &str {
                (**self).name()
            }

            fn description(&self) -> &str {
                (**self).description()
            }

            fn requires(&self) -> Vec<StepLink> {
                (**self).requires()
            }

            fn creates(&self) -> Vec<StepLink> {
                (**self).creates()
            }
        }
    };
}

forward_step!(Box);
forward_step!(Rc);
forward_step!(Arc);

impl<T: Step + ?Sized> Step for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn description(&self) -> &str {
        (**self).description()
    }

    fn requires(&self) -> Vec<StepLink> {
        (**self).requires()
    }

    fn creates(&self) -> Vec<StepLink> {
        (**self).creates()
    }
}

/// A step defined entirely by data, for callers that only need to
/// describe links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredStep {
    /// Step name.
    pub name: String,
    /// Human readable description.
    pub description: String,
    /// Links the step requires.
    pub requires: Vec<StepLink>,
    /// Links the step creates.
    pub creates: Vec<StepLink>,
}

impl DeclaredStep {
    /// Creates a named step with no links.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a required link.
    #[must_use]
    pub fn requiring(mut self, link: StepLink) -> Self {
        self.requires.push(link);
        self
    }

    /// Adds a created link.
    #[must_use]
    pub fn creating(mut self, link: StepLink) -> Self {
        self.creates.push(link);
        self
    }
}

impl Step for DeclaredStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn requires(&self) -> Vec<StepLink> {
        self.requires.clone()
    }

    fn creates(&self) -> Vec<StepLink> {
        self.creates.clone()
    }
}
