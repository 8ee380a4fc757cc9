//! Core data structures for classstub.
//!
//! This crate contains:
//! - Access flag words and the visibility/modifier model (`access`)
//! - Source type spelling → JVM descriptor encoding (`descriptor`)
//! - The symbolic class model and its arena (`model`)

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod access;
pub mod descriptor;
pub mod model;


pub use access::{Access, AccessFlags, ClassModifier, MethodModifier, Visibility};
pub use descriptor::{
    OBJECT, binary_name, encode_type, is_field_descriptor, is_primitive, method_descriptor,
    primitive_code, split_array_suffix,
};
pub use model::{
    CONSTRUCTOR_NAME, Class, ClassArena, ClassBuilder, ClassId, ConstantValue, Field,
    FieldBuilder, Method, MethodBuilder, NESTED_SEPARATOR, TypeKind, split_nested_name,
};
