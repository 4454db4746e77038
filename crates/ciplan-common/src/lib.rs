//! # ciplan-common
//!
//! Shared types, error definitions, configuration models, and naming
//! constants used across the ciplan workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and provides the primitives the graph resolver and the
//! CLI build upon.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
