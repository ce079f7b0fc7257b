//! Per-family sections of the generated file.

use super::ident;
use crate::model::{VariantFamily, VariantRecord};
use std::collections::HashSet;

const RESULT: &str = "::std::result::Result";
const FMT_SIGNATURE: &str =
    "fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {";

/// Names shared by every section of one family.
struct Names<'a> {
    package: &'a str,
    family: &'a str,
    ty: String,
    variant_trait: String,
    error: String,
}

/// Append the whole API of `family` to `lines`.
pub fn render<'m>(
    lines: &mut Vec<String>,
    package: &str,
    family: &'m VariantFamily,
    displayed: &mut HashSet<&'m str>,
) {
    let names = Names {
        package,
        family: &family.name,
        ty: ident::type_ident(&family.name),
        variant_trait: ident::trait_ident(&family.name),
        error: ident::error_ident(&family.name),
    };
    let variants = &family.variants;

    render_discriminant(lines, &names, variants);
    render_discriminant_impl(lines, &names, variants);
    render_discriminant_traits(lines, &names, variants);
    render_error(lines, &names);
    render_contract(lines, &names, variants, displayed);
    render_family_enum(lines, &names, variants);
}

fn render_discriminant(lines: &mut Vec<String>, n: &Names, variants: &[VariantRecord]) {
    lines.push(format!("/// Discriminant of [`{}`].", n.family));
    lines.push("#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]".into());
    lines.push("#[repr(u32)]".into());
    lines.push(format!("pub enum {} {{", n.ty));
    for v in variants {
        lines.push(format!("    {} = {},", ident::variant_ident(&v.name), v.id));
    }
    lines.push("}".into());
    lines.push(String::new());
}

fn render_discriminant_impl(lines: &mut Vec<String>, n: &Names, variants: &[VariantRecord]) {
    lines.push(format!("impl {} {{", n.ty));

    lines.push(format!("    const ALL: &'static [{}] = &[", n.ty));
    for v in variants {
        lines.push(format!("        {}::{},", n.ty, ident::variant_ident(&v.name)));
    }
    lines.push("    ];".into());
    lines.push(String::new());

    lines.push(format!("    /// Every `{}`, in ascending id order.", n.ty));
    lines.push(format!("    pub fn all() -> &'static [{}] {{", n.ty));
    lines.push("        Self::ALL".into());
    lines.push("    }".into());
    lines.push(String::new());

    lines.push(format!("    /// Look up a `{}` by its declared name.", n.ty));
    lines.push(format!(
        "    pub fn of(name: &str) -> {}<{}, {}> {{",
        RESULT, n.ty, n.error
    ));
    lines.push("        match name {".into());
    for v in variants {
        lines.push(format!(
            "            {:?} => Ok({}::{}),",
            v.name,
            n.ty,
            ident::variant_ident(&v.name)
        ));
    }
    lines.push(format!("            _ => Err({}::new(name)),", n.error));
    lines.push("        }".into());
    lines.push("    }".into());
    lines.push(String::new());

    lines.push(format!("    /// The declared name of this `{}`.", n.ty));
    lines.push("    pub fn name(self) -> &'static str {".into());
    lines.push("        match self {".into());
    for v in variants {
        lines.push(format!(
            "            {}::{} => {:?},",
            n.ty,
            ident::variant_ident(&v.name),
            v.name
        ));
    }
    lines.push("        }".into());
    lines.push("    }".into());
    lines.push(String::new());

    // Constructor dispatcher: one thunk per record type.
    lines.push(format!(
        "    /// Build the [`{}`] value matching this discriminant.",
        n.family
    ));
    lines.push("    pub fn produce_switch<E>(".into());
    lines.push("        self,".into());
    for v in variants {
        lines.push(format!(
            "        {}: impl FnOnce() -> {}<{}, E>,",
            ident::handler_ident(&v.declaration),
            RESULT,
            v.declaration
        ));
    }
    lines.push(format!("    ) -> {}<{}, E> {{", RESULT, n.family));
    lines.push("        match self {".into());
    for v in variants {
        let variant = ident::variant_ident(&v.name);
        lines.push(format!(
            "            {}::{} => {}().map({}::{}),",
            n.ty,
            variant,
            ident::handler_ident(&v.declaration),
            n.family,
            variant
        ));
    }
    lines.push("        }".into());
    lines.push("    }".into());
    lines.push(String::new());

    render_thunk_dispatch(
        lines,
        n,
        variants,
        "Run the thunk matching this discriminant and return its result.",
        "produce<T, E>",
        "T",
    );
    lines.push(String::new());
    render_thunk_dispatch(
        lines,
        n,
        variants,
        "Run the thunk matching this discriminant for its side effects.",
        "handle<E>",
        "()",
    );

    lines.push("}".into());
    lines.push(String::new());
}

/// `produce` and `handle` only differ in their signature.
fn render_thunk_dispatch(
    lines: &mut Vec<String>,
    n: &Names,
    variants: &[VariantRecord],
    doc: &str,
    signature: &str,
    ok: &str,
) {
    lines.push(format!("    /// {}", doc));
    lines.push(format!("    pub fn {}(", signature));
    lines.push("        self,".into());
    for v in variants {
        lines.push(format!(
            "        {}: impl FnOnce() -> {}<{}, E>,",
            ident::handler_ident(&v.declaration),
            RESULT,
            ok
        ));
    }
    lines.push(format!("    ) -> {}<{}, E> {{", RESULT, ok));
    lines.push("        match self {".into());
    for v in variants {
        lines.push(format!(
            "            {}::{} => {}(),",
            n.ty,
            ident::variant_ident(&v.name),
            ident::handler_ident(&v.declaration)
        ));
    }
    lines.push("        }".into());
    lines.push("    }".into());
}

fn render_discriminant_traits(lines: &mut Vec<String>, n: &Names, variants: &[VariantRecord]) {
    lines.push(format!("impl ::std::fmt::Display for {} {{", n.ty));
    lines.push(format!("    {}", FMT_SIGNATURE));
    lines.push("        f.write_str(self.name())".into());
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());

    lines.push(format!("impl ::std::str::FromStr for {} {{", n.ty));
    lines.push(format!("    type Err = {};", n.error));
    lines.push(String::new());
    lines.push(format!(
        "    fn from_str(s: &str) -> {}<Self, Self::Err> {{",
        RESULT
    ));
    lines.push(format!("        {}::of(s)", n.ty));
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());

    lines.push(format!("impl ::std::convert::TryFrom<u32> for {} {{", n.ty));
    lines.push(format!("    type Error = {};", n.error));
    lines.push(String::new());
    lines.push(format!(
        "    fn try_from(value: u32) -> {}<Self, Self::Error> {{",
        RESULT
    ));
    lines.push("        match value {".into());
    for v in variants {
        lines.push(format!(
            "            {} => Ok({}::{}),",
            v.id,
            n.ty,
            ident::variant_ident(&v.name)
        ));
    }
    lines.push(format!("            _ => Err({}::new(value)),", n.error));
    lines.push("        }".into());
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());

    lines.push(format!("impl ::std::convert::From<{}> for u32 {{", n.ty));
    lines.push(format!("    fn from(value: {}) -> u32 {{", n.ty));
    lines.push("        value as u32".into());
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());
}

fn render_error(lines: &mut Vec<String>, n: &Names) {
    lines.push(format!(
        "/// A name or id that does not belong to [`{}`].",
        n.family
    ));
    lines.push("#[derive(Debug, Clone, PartialEq, Eq)]".into());
    lines.push(format!("pub struct {}(pub String);", n.error));
    lines.push(String::new());
    lines.push(format!("impl {} {{", n.error));
    lines.push("    pub fn new(value: impl ::std::fmt::Display) -> Self {".into());
    lines.push(format!("        {}(value.to_string())", n.error));
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());

    lines.push(format!("impl ::std::fmt::Display for {} {{", n.error));
    lines.push(format!("    {}", FMT_SIGNATURE));
    lines.push(format!(
        "        write!(f, \"{}: {}: {{}}\", self.0)",
        n.package, n.error
    ));
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());

    lines.push(format!("impl ::std::error::Error for {} {{}}", n.error));
    lines.push(String::new());
}

fn render_contract<'m>(
    lines: &mut Vec<String>,
    n: &Names,
    variants: &'m [VariantRecord],
    displayed: &mut HashSet<&'m str>,
) {
    lines.push(format!(
        "/// Implemented by every record type of [`{}`].",
        n.family
    ));
    lines.push(format!(
        "pub trait {}: ::std::fmt::Display {{",
        n.variant_trait
    ));
    lines.push(format!("    fn variant_type(&self) -> {};", n.ty));
    lines.push("}".into());
    lines.push(String::new());

    for v in variants {
        lines.push(format!("impl {} for {} {{", n.variant_trait, v.declaration));
        lines.push(format!("    fn variant_type(&self) -> {} {{", n.ty));
        lines.push(format!("        {}::{}", n.ty, ident::variant_ident(&v.name)));
        lines.push("    }".into());
        lines.push("}".into());
        lines.push(String::new());
    }

    for v in variants {
        if !displayed.insert(v.declaration.as_str()) {
            continue;
        }
        lines.push(format!("impl ::std::fmt::Display for {} {{", v.declaration));
        lines.push(format!("    {}", FMT_SIGNATURE));
        lines.push("        write!(f, \"{:?}\", self)".into());
        lines.push("    }".into());
        lines.push("}".into());
        lines.push(String::new());
    }
}

fn render_family_enum(lines: &mut Vec<String>, n: &Names, variants: &[VariantRecord]) {
    lines.push(format!("/// One value of the `{}` family.", n.family));
    lines.push("#[derive(Debug)]".into());
    lines.push(format!("pub enum {} {{", n.family));
    for v in variants {
        lines.push(format!(
            "    {}({}),",
            ident::variant_ident(&v.name),
            v.declaration
        ));
    }
    lines.push("}".into());
    lines.push(String::new());

    lines.push(format!("impl {} {{", n.family));
    render_switch(lines, n, variants, "switch<T>(\n        self,", "");
    lines.push(String::new());
    render_switch(lines, n, variants, "switch_ref<T>(\n        &self,", "&");
    lines.push("}".into());
    lines.push(String::new());

    lines.push(format!("impl {} for {} {{", n.variant_trait, n.family));
    lines.push(format!("    fn variant_type(&self) -> {} {{", n.ty));
    lines.push("        match self {".into());
    for v in variants {
        let variant = ident::variant_ident(&v.name);
        lines.push(format!(
            "            {}::{}(_) => {}::{},",
            n.family, variant, n.ty, variant
        ));
    }
    lines.push("        }".into());
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());

    lines.push(format!("impl ::std::fmt::Display for {} {{", n.family));
    lines.push(format!("    {}", FMT_SIGNATURE));
    lines.push("        match self {".into());
    for v in variants {
        lines.push(format!(
            "            {}::{}(value) => ::std::fmt::Display::fmt(value, f),",
            n.family,
            ident::variant_ident(&v.name)
        ));
    }
    lines.push("        }".into());
    lines.push("    }".into());
    lines.push("}".into());
    lines.push(String::new());

    for v in variants {
        let variant = ident::variant_ident(&v.name);
        lines.push(format!(
            "impl ::std::convert::From<{}> for {} {{",
            v.declaration, n.family
        ));
        lines.push(format!("    fn from(value: {}) -> Self {{", v.declaration));
        lines.push(format!("        {}::{}(value)", n.family, variant));
        lines.push("    }".into());
        lines.push("}".into());
        lines.push(String::new());

        lines.push(format!(
            "impl ::std::convert::TryFrom<{}> for {} {{",
            n.family, v.declaration
        ));
        lines.push(format!("    type Error = {};", n.family));
        lines.push(String::new());
        lines.push("    #[allow(unreachable_patterns)]".into());
        lines.push(format!(
            "    fn try_from(value: {}) -> {}<Self, Self::Error> {{",
            n.family, RESULT
        ));
        lines.push("        match value {".into());
        lines.push(format!("            {}::{}(value) => Ok(value),", n.family, variant));
        lines.push("            other => Err(other),".into());
        lines.push("        }".into());
        lines.push("    }".into());
        lines.push("}".into());
        lines.push(String::new());
    }
}

/// Exhaustive dispatch over the family enum, by value or by reference.
fn render_switch(
    lines: &mut Vec<String>,
    n: &Names,
    variants: &[VariantRecord],
    head: &str,
    by_ref: &str,
) {
    lines.push("    /// Call the handler matching this value's variant and return its result.".into());
    lines.push(format!("    pub fn {}", head));
    for v in variants {
        lines.push(format!(
            "        {}: impl FnOnce({}{}) -> T,",
            ident::handler_ident(&v.declaration),
            by_ref,
            v.declaration
        ));
    }
    lines.push("    ) -> T {".into());
    lines.push("        match self {".into());
    for v in variants {
        lines.push(format!(
            "            {}::{}(value) => {}(value),",
            n.family,
            ident::variant_ident(&v.name),
            ident::handler_ident(&v.declaration)
        ));
    }
    lines.push("        }".into());
    lines.push("    }".into());
}
