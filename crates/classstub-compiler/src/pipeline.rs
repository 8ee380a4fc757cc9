//! End-to-end driver: input text → class model → class file artifacts.
//!
//! Each input is one unit with its own [`UnitContext`]. Emission and writing
//! keep going after a failed class; failures land in the unit's diagnostics.

use std::fs;
use std::path::{Path, PathBuf};

use crate::build::build_unit;
use crate::config::EmitConfig;
use crate::context::UnitContext;
use crate::decl::CompilationUnit;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::emit::emit_class;
use crate::outline::parse_outline;
use crate::Result;

/// Artifact file extension, without the dot.
pub const CLASS_EXTENSION: &str = "class";

/// How an input file is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Java source, through the tree-sitter front end.
    Java,
    /// A declaration tree serialized as JSON.
    Decl,
    /// The line-oriented outline format.
    Outline,
}

impl InputFormat {
    /// Pick the format from the file extension; unknown extensions are outlines.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("java") => InputFormat::Java,
            Some("json") => InputFormat::Decl,
            _ => InputFormat::Outline,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InputFormat::Java => "java",
            InputFormat::Decl => "decl",
            InputFormat::Outline => "outline",
        }
    }
}

/// One emitted class file, not yet written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Binary name, e.g. `p/Outer$Inner`.
    pub class_name: String,
    /// File name inside the output directory, e.g. `Outer$Inner.class`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Parse and model one input.
pub fn compile_source(source: &str, format: InputFormat) -> Result<UnitContext> {
    tracing::info!(format = format.as_str(), bytes = source.len(), "compiling unit");

    let cx = match format {
        InputFormat::Java => build_unit(&parse_java(source)?),
        InputFormat::Decl => build_unit(&CompilationUnit::from_json(source)?),
        InputFormat::Outline => parse_outline(source)?,
    };

    tracing::debug!(
        classes = cx.arena.len(),
        diagnostics = cx.diagnostics.len(),
        "unit modeled"
    );
    Ok(cx)
}

#[cfg(feature = "lang-java")]
fn parse_java(source: &str) -> Result<CompilationUnit> {
    Ok(crate::java::parse(source)?)
}

#[cfg(not(feature = "lang-java"))]
fn parse_java(_source: &str) -> Result<CompilationUnit> {
    Err(crate::Error::JavaUnavailable)
}

/// Emit every class of the unit in arena order.
///
/// A class that fails to emit is reported as [`DiagnosticKind::EmitFailed`]
/// and left out; the others are still emitted.
pub fn emit_artifacts(cx: &mut UnitContext, config: &EmitConfig) -> Vec<Artifact> {
    let mut artifacts = Vec::with_capacity(cx.arena.len());

    for (id, class) in cx.arena.iter() {
        match emit_class(config, &cx.arena, id) {
            Ok(bytes) => {
                tracing::debug!(class = class.name(), bytes = bytes.len(), "class emitted");
                artifacts.push(Artifact {
                    class_name: class.name().to_owned(),
                    file_name: format!("{}.{CLASS_EXTENSION}", class.simple_name()),
                    bytes,
                });
            }
            Err(err) => {
                cx.diagnostics
                    .report(DiagnosticKind::EmitFailed, None)
                    .message(format!("{}: {err}", class.name()))
                    .emit();
            }
        }
    }

    artifacts
}

/// Write artifacts into `dir`, overwriting existing files.
///
/// Returns how many were written. A failed write is reported as
/// [`DiagnosticKind::WriteFailed`] and does not stop the rest.
pub fn write_artifacts(dir: &Path, artifacts: &[Artifact], diagnostics: &mut Diagnostics) -> usize {
    let mut written = 0;

    for artifact in artifacts {
        let path = dir.join(&artifact.file_name);
        match fs::write(&path, &artifact.bytes) {
            Ok(()) => {
                tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "artifact written");
                written += 1;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "artifact write failed");
                diagnostics
                    .report(DiagnosticKind::WriteFailed, None)
                    .message(format!("{}: {err}", path.display()))
                    .emit();
            }
        }
    }

    written
}

/// Default output directory: the directory holding the input.
pub fn default_out_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
