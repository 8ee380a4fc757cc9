//! JVM class file container format for classstub.
//!
//! This crate contains:
//! - Format constants, version tiers and opcodes (`constants`)
//! - The deduplicating constant pool builder (`pool`)
//! - Instruction encoding with automatic max-stack/max-locals (`code`)
//! - Class file serialization (`writer`)
//! - Class file parsing and a human-readable dump (`reader`, `dump`)

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod code;
pub mod constants;
pub mod dump;
mod error;
pub mod pool;
pub mod reader;
mod utf8;
pub mod writer;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod writer_tests;

pub use code::{Code, CodeBuilder, Insn, method_slots};
pub use constants::{ClassVersion, MAGIC};
pub use dump::dump;
pub use error::{PoolError, ReadError, WriteError};
pub use pool::{Constant, ConstantPool};
pub use reader::{ParsedClass, ParsedCode, ParsedInnerClass, ParsedMember, PoolEntry, parse};
pub use writer::{Attribute, ClassFile, FieldInfo, InnerClassEntry, MethodInfo};
