//! Per-family uniqueness checks.

use crate::error::{Error, Result};
use crate::model::FamilyMap;
use crate::render::ident;
use std::collections::HashSet;

/// Reject any family in which two variants share a name, an id or a
/// declaration. Families are checked independently; the map is returned
/// untouched.
pub fn validate(families: FamilyMap) -> Result<FamilyMap> {
    for (family, variants) in &families {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        let mut declarations = HashSet::new();
        // "git" and "Git" both become `Git` in the discriminant enum.
        let mut idents = HashSet::new();
        // `HTTPServer` and `HttpServer` share the parameter `http_server_fn`.
        let mut handlers = HashSet::new();

        for variant in variants {
            let duplicate = |field: &'static str, value: String| Error::DuplicateVariantData {
                family: family.clone(),
                field,
                value,
            };
            if !names.insert(variant.name.as_str()) {
                return Err(duplicate("name", variant.name.clone()));
            }
            if !ids.insert(variant.id) {
                return Err(duplicate("id", variant.id.to_string()));
            }
            if !declarations.insert(variant.declaration.as_str()) {
                return Err(duplicate("declaration", variant.declaration.clone()));
            }
            if !idents.insert(ident::variant_ident(&variant.name)) {
                return Err(duplicate("variant identifier", variant.name.clone()));
            }
            if !handlers.insert(ident::handler_ident(&variant.declaration)) {
                return Err(duplicate("handler identifier", variant.declaration.clone()));
            }
        }
        tracing::debug!(family = %family, variants = variants.len(), "family validated");
    }
    Ok(families)
}
