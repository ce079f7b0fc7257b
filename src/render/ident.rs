//! Identifier derivation for generated items.

use convert_case::{Case, Casing};

const KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Strict and reserved keywords, which cannot name a generated item.
pub fn is_keyword(ident: &str) -> bool {
    KEYWORDS.contains(&ident)
}

/// Variant of the discriminant enum: `git` → `Git`, `bitbucketHg` → `BitbucketHg`.
pub fn variant_ident(name: &str) -> String {
    name.to_case(Case::Pascal)
}

/// Handler parameter for a record type: `GitCheckoutOptions` → `git_checkout_options_fn`.
pub fn handler_ident(declaration: &str) -> String {
    format!("{}_fn", declaration.to_case(Case::Snake))
}

pub fn type_ident(family: &str) -> String {
    format!("{}Type", family)
}

pub fn trait_ident(family: &str) -> String {
    format!("{}Variant", family)
}

pub fn error_ident(family: &str) -> String {
    format!("Unknown{}Type", family)
}
