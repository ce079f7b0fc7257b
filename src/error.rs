//! Error taxonomy for the generation pipeline.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Wrong field count, wrong marker, bad identifier or non-numeric id.
    #[error("malformed annotation {annotation:?}: {reason}")]
    MalformedAnnotation { annotation: String, reason: String },

    /// A marker whose doc block is followed by something other than an item.
    #[error("annotation on line {line} is not attached to a declaration: {annotation:?}")]
    UnattachedAnnotation { line: usize, annotation: String },

    /// An annotated declaration that is not a plain struct.
    #[error("expected a struct for annotated declaration {declaration}, found {found}")]
    ExpectedRecordType { declaration: String, found: String },

    /// Two variants of one family share a name, id or declaration.
    #[error("duplicate variant data in family {family}: {field} {value:?} appears more than once")]
    DuplicateVariantData {
        family: String,
        field: &'static str,
        value: String,
    },

    #[error("family {family} has no variants")]
    EmptyFamily { family: String },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `--check` found an output file that differs from what would be generated.
    #[error("{} is out of date", .path.display())]
    Stale { path: PathBuf },
}

impl Error {
    pub(crate) fn malformed(annotation: &str, reason: impl Into<String>) -> Self {
        Error::MalformedAnnotation {
            annotation: annotation.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
