//! Emission engine: turns a [`GenerationModel`] into Rust source.
//!
//! The output is meant to be pulled into the scanned module with
//! `include!`, so it refers to record types by their bare names, never
//! emits `use` items and spells every std path out in full.

mod family;
pub mod ident;

use crate::model::GenerationModel;
use std::collections::HashSet;

/// Render the complete generated file for `model`.
pub fn render(model: &GenerationModel) -> String {
    let mut lines: Vec<String> = vec![
        format!(
            "// Code generated by gen-enumtype from {}. DO NOT EDIT.",
            model.source_file
        ),
        String::new(),
    ];

    // A record type may belong to several families but only gets one Display impl.
    let mut displayed: HashSet<&str> = HashSet::new();

    for family in &model.families {
        family::render(&mut lines, &model.package, family, &mut displayed);
    }

    // Drop the trailing blank line left by the last section.
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
