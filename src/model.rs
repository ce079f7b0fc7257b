//! Family model: grouping annotations into families and assembling the
//! ordered model handed to the renderer.

use crate::annotation;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// One validated member of a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub name: String,
    pub id: u32,
    /// Name of the struct the annotation decorates.
    pub declaration: String,
}

/// Unordered grouping of variants by family name.
pub type FamilyMap = HashMap<String, Vec<VariantRecord>>;

/// A family whose variants are sorted ascending by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFamily {
    pub name: String,
    pub variants: Vec<VariantRecord>,
}

/// Everything the renderer needs for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationModel {
    /// Prefix used in generated error messages.
    pub package: String,
    /// File name the model was scanned from, quoted in the generated header.
    pub source_file: String,
    pub families: Vec<VariantFamily>,
}

/// Parse every `(declaration, annotation)` pair and group the results by
/// family. Stops at the first malformed annotation.
pub fn build_families<'a, I>(declarations: I, marker: &str) -> Result<FamilyMap>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut families = FamilyMap::new();
    for (declaration, text) in declarations {
        let record = annotation::parse(text, marker, declaration)?;
        families
            .entry(record.family)
            .or_default()
            .push(VariantRecord {
                name: record.variant,
                id: record.id,
                declaration: record.declaration,
            });
    }
    Ok(families)
}

/// Fix the output order: variants by id, families by name.
pub fn assemble(package: &str, source_file: &str, families: FamilyMap) -> Result<GenerationModel> {
    let mut out: Vec<VariantFamily> = families
        .into_iter()
        .map(|(name, variants)| VariantFamily { name, variants })
        .collect();
    out.sort_by(|a, b| a.name.cmp(&b.name));
    for family in &mut out {
        if family.variants.is_empty() {
            return Err(Error::EmptyFamily {
                family: family.name.clone(),
            });
        }
        family.variants.sort_by_key(|v| v.id);
    }

    Ok(GenerationModel {
        package: package.to_string(),
        source_file: source_file.to_string(),
        families: out,
    })
}
