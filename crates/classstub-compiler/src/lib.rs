//! classstub compiler: name resolution, model building and class file emission.
//!
//! This crate provides the pipeline from class descriptions to class files:
//! - `decl` - declaration tree handed over by a front end
//! - `java` - Java source front end (feature `lang-java`)
//! - `outline` - the line-oriented outline format
//! - `resolve` - simple name → qualified name resolution
//! - `build` - declaration tree → class model
//! - `stub` - generated method bodies
//! - `emit` - class model → class file bytes
//! - `pipeline` - artifacts and writing them out
//! - `diagnostics` - error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod build;
pub mod config;
pub mod context;
pub mod decl;
pub mod diagnostics;
pub mod emit;
#[cfg(feature = "lang-java")]
pub mod java;
pub mod outline;
pub mod pipeline;
pub mod resolve;
pub mod stub;

#[cfg(test)]
mod build_tests;
#[cfg(test)]
mod resolve_tests;

pub use config::EmitConfig;
pub use context::UnitContext;
pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity, Span};
pub use emit::{EmitError, emit_class};
pub use outline::OutlineError;
pub use pipeline::{Artifact, InputFormat, compile_source, emit_artifacts, write_artifacts};
pub use stub::BodyMode;

#[cfg(feature = "lang-java")]
pub use java::FrontendError;

/// Errors that stop a unit before any class is modeled.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Outline(#[from] OutlineError),

    #[cfg(feature = "lang-java")]
    #[error(transparent)]
    Frontend(#[from] FrontendError),

    #[cfg(not(feature = "lang-java"))]
    #[error("Java sources need the `lang-java` feature")]
    JavaUnavailable,

    #[error("invalid declaration tree: {0}")]
    DeclJson(#[from] serde_json::Error),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
