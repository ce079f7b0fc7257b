//! gen-enumtype: closed-set dispatch helpers for annotated Rust structs.
//!
//! Structs whose doc comment carries
//!
//! ```text
//! /// @gen-enumtype <Family> <Variant> <Id>
//! ```
//!
//! are grouped into families. For every family `F` the generated file
//! provides a discriminant enum `FType`, name/id lookups, a capability
//! trait `FVariant`, a tagged union `F` over the record types and
//! exhaustive dispatchers (`switch`, `produce_switch`, `produce`, `handle`).
//!
//! The pipeline for one file is
//! scan → build families → validate → assemble → render → write.

pub mod annotation;
pub mod error;
pub mod model;
pub mod render;
pub mod scanner;
pub mod validate;
pub mod writer;

pub use error::{Error, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// Pipeline configuration for [`generate_source`] and [`generate_file`].
#[derive(Debug, Clone)]
pub struct Options {
    /// Token that opens an annotation in a doc comment.
    pub marker: String,
    /// Appended to the input file stem to name the output file.
    pub suffix: String,
    /// Overrides the package name derived from the file path.
    pub package: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            marker: annotation::DEFAULT_MARKER.to_string(),
            suffix: writer::DEFAULT_SUFFIX.to_string(),
            package: None,
        }
    }
}

/// Generated code for one input, before it touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub output: PathBuf,
    pub code: String,
    pub families: usize,
}

/// Run the pipeline on in-memory `source` read from `path`.
///
/// Returns `Ok(None)` when the file carries no annotations.
pub fn generate_source(source: &str, path: &Path, options: &Options) -> Result<Option<Generated>> {
    let scanned = scanner::scan(source, path, &options.marker)?;
    if scanned.declarations.is_empty() {
        return Ok(None);
    }

    let families = model::build_families(
        scanned
            .declarations
            .iter()
            .map(|(decl, text)| (decl.as_str(), text.as_str())),
        &options.marker,
    )?;
    let families = validate::validate(families)?;

    let package = options.package.as_deref().unwrap_or(&scanned.package);
    let model = model::assemble(package, &scanned.file_name, families)?;
    for family in &model.families {
        tracing::debug!(
            family = %family.name,
            variants = family.variants.len(),
            "rendering family"
        );
    }

    Ok(Some(Generated {
        output: writer::output_path(path, &options.suffix),
        code: render::render(&model),
        families: model.families.len(),
    }))
}

/// Read `path`, generate, and atomically write the output next to it.
///
/// Returns the output path, or `None` when the file has no annotations.
pub fn generate_file(path: &Path, options: &Options) -> Result<Option<PathBuf>> {
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let Some(generated) = generate_source(&source, path, options)? else {
        return Ok(None);
    };
    if writer::write_atomic(&generated.output, &generated.code)? {
        tracing::info!(
            output = %generated.output.display(),
            families = generated.families,
            "wrote generated file"
        );
    } else {
        tracing::debug!(output = %generated.output.display(), "output unchanged");
    }
    Ok(Some(generated.output))
}
