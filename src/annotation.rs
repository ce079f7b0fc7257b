//! Annotation parser.
//!
//! An annotation is the text of one doc-comment line:
//!
//! ```text
//! @gen-enumtype CheckoutOptions git 0
//! ```
//!
//! i.e. the marker token followed by exactly three fields: family name,
//! variant name and a base-10 variant id.

use crate::error::{Error, Result};
use crate::render::ident;
use regex::Regex;
use std::sync::LazyLock;

/// Default marker token recognized in doc comments.
pub const DEFAULT_MARKER: &str = "@gen-enumtype";

static RE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap());

/// One parsed annotation paired with the declaration it decorates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub family: String,
    pub variant: String,
    pub id: u32,
    pub declaration: String,
}

/// Parse raw annotation text for `declaration`.
pub fn parse(text: &str, marker: &str, declaration: &str) -> Result<AnnotationRecord> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(Error::malformed(
            text,
            format!(
                "expected `{} <Family> <Variant> <Id>`, got {} field(s)",
                marker,
                fields.len()
            ),
        ));
    }
    if fields[0] != marker {
        return Err(Error::malformed(
            text,
            format!("expected marker {}, got {}", marker, fields[0]),
        ));
    }

    let family = fields[1];
    let variant = fields[2];
    for (what, value) in [("family", family), ("variant", variant)] {
        if !RE_IDENT.is_match(value) {
            return Err(Error::malformed(
                text,
                format!("{} name {:?} is not a valid identifier", what, value),
            ));
        }
    }
    let variant_ident = ident::variant_ident(variant);
    for (what, value) in [("family", family), ("variant", variant_ident.as_str())] {
        if ident::is_keyword(value) {
            return Err(Error::malformed(
                text,
                format!("{} name {:?} is a reserved word", what, value),
            ));
        }
    }

    // u32::from_str accepts a leading '+', which is not a plain base-10 literal.
    let raw_id = fields[3];
    let id = if raw_id.bytes().all(|b| b.is_ascii_digit()) {
        raw_id.parse::<u32>().ok()
    } else {
        None
    }
    .ok_or_else(|| {
        Error::malformed(
            text,
            format!("variant id {:?} is not a non-negative integer", raw_id),
        )
    })?;

    Ok(AnnotationRecord {
        family: family.to_string(),
        variant: variant.to_string(),
        id,
        declaration: declaration.to_string(),
    })
}
