//! Class file emission from the class model.
//!
//! Converts one modeled class into the bytes of a class file. This module handles:
//! - Access word computation for the class entry
//! - Field entries with ConstantValue attributes
//! - InnerClasses records for linked nested classes
//! - Method entries with stub bodies and Exceptions attributes
//!
//! Entry points:
//! - [`emit_class`]: Emit one class of an arena
//! - [`ClassFileEmitter`]: Drive emission step by step

mod emitter;


use std::fmt;

use classstub_bytecode::{PoolError, WriteError};
use classstub_core::{ClassArena, ClassId};

use crate::config::EmitConfig;

pub use emitter::ClassFileEmitter;

/// Emission steps, in the only order they may happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Begun,
    Fields,
    Nested,
    Methods,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Begun => "class header",
            Phase::Fields => "fields",
            Phase::Nested => "nested classes",
            Phase::Methods => "methods",
        };
        f.write_str(name)
    }
}

/// Error during class file emission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("malformed method descriptor `{0}`")]
    BadDescriptor(String),
    #[error("{attempted} cannot be emitted after {current}")]
    OutOfOrder { current: Phase, attempted: Phase },
}

/// Emit the class `id` of `arena` as class file bytes.
pub fn emit_class(
    config: &EmitConfig,
    arena: &ClassArena,
    id: ClassId,
) -> Result<Vec<u8>, EmitError> {
    let class = &arena[id];
    let mut emitter = ClassFileEmitter::begin(config, class)?;

    for field in class.fields() {
        emitter.field(field)?;
    }
    for &nested in class.nested() {
        emitter.nested(&arena[nested])?;
    }
    for method in class.methods() {
        emitter.method(method)?;
    }

    emitter.finish()
}
