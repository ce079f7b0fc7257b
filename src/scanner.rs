//! Declaration scanner for `.rs` files.
//!
//! Finds `///` doc blocks carrying the annotation marker and pairs each with
//! the item that follows it:
//!
//! ```text
//! /// Options for a plain git checkout.
//! /// @gen-enumtype CheckoutOptions git 0
//! #[derive(Debug)]
//! pub struct GitCheckoutOptions { .. }
//! ```
//!
//! Outer attributes (including ones spread over several lines), plain `//`
//! comments and blank lines between the doc block and the item are skipped.
//! Only non-generic structs may carry the marker, and a marker that never
//! reaches an item is an error.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RE_DOC_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^///($|[^/].*)$").unwrap());

static RE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:pub(?:\s*\([^)]*\))?\s+)?(?:(?:const|async|unsafe|extern\s+"[^"]*")\s+)*(struct|enum|union|type|trait|fn|const|static|mod|impl|use|macro_rules!)(?:\s+|\b)([A-Za-z_][A-Za-z0-9_]*)?(\s*<)?"#,
    )
    .unwrap()
});

/// Annotated declarations found in one source file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScannedFile {
    /// File stem, or the directory name for `mod.rs`/`lib.rs`/`main.rs`.
    pub package: String,
    pub file_name: String,
    /// `(declaration name, raw annotation text)` in source order.
    pub declarations: Vec<(String, String)>,
}

/// Scan `source` (the contents of `path`) for declarations annotated with `marker`.
pub fn scan(source: &str, path: &Path, marker: &str) -> Result<ScannedFile> {
    let mut declarations = Vec::new();
    // Marker line of the doc block currently being read, if any.
    let mut pending: Option<(usize, String)> = None;
    let mut in_doc = false;
    // Open `[` count of an attribute continued from a previous line.
    let mut attr_depth = 0;

    for (index, raw) in source.lines().enumerate() {
        let trimmed = raw.trim();

        if attr_depth == 0 {
            if let Some(caps) = RE_DOC_COMMENT.captures(trimmed) {
                if !in_doc {
                    pending = None;
                    in_doc = true;
                }
                let text = caps[1].trim();
                if text.split_whitespace().next() == Some(marker) {
                    if pending.is_none() {
                        pending = Some((index + 1, text.to_string()));
                    } else {
                        tracing::warn!(line = index + 1, "ignoring second marker in one doc block");
                    }
                }
                continue;
            }
        }

        let line = strip_attributes(trimmed, &mut attr_depth);
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        in_doc = false;

        let Some((marker_line, text)) = pending.take() else {
            continue;
        };

        let Some(caps) = RE_ITEM.captures(line) else {
            return Err(Error::UnattachedAnnotation {
                line: marker_line,
                annotation: text,
            });
        };
        let kind = caps[1].trim_end_matches('!');
        let name = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        if kind != "struct" || caps.get(3).is_some() {
            let declaration = if name.is_empty() { kind } else { name };
            let found = if kind == "struct" { "generic struct" } else { kind };
            return Err(Error::ExpectedRecordType {
                declaration: declaration.to_string(),
                found: found.to_string(),
            });
        }
        tracing::debug!(declaration = name, line = index + 1, "found annotated struct");
        declarations.push((name.to_string(), text));
    }

    if let Some((line, annotation)) = pending {
        return Err(Error::UnattachedAnnotation { line, annotation });
    }

    Ok(ScannedFile {
        package: derive_package(path),
        file_name: path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
        declarations,
    })
}

/// Skip outer attributes at the start of `line`, resuming one left open by
/// an earlier line when `depth > 0`. Returns what follows them, or `""` when
/// the line ends inside an attribute.
fn strip_attributes<'a>(line: &'a str, depth: &mut usize) -> &'a str {
    let mut rest = line;
    loop {
        if *depth == 0 {
            match rest.strip_prefix("#[") {
                Some(after) => {
                    *depth = 1;
                    rest = after;
                }
                None => return rest,
            }
        }

        let mut in_str = false;
        let mut escaped = false;
        let mut end = None;
        for (i, c) in rest.char_indices() {
            if in_str {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_str = false;
                }
                continue;
            }
            match c {
                '"' => in_str = true,
                '[' => *depth += 1,
                ']' => {
                    *depth -= 1;
                    if *depth == 0 {
                        end = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        match end {
            Some(end) => rest = rest[end..].trim_start(),
            None => return "",
        }
    }
}

/// Derive the package name used in generated error messages.
/// "src/scm.rs" → "scm", "src/scm/mod.rs" → "scm"
pub fn derive_package(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if matches!(stem.as_str(), "mod" | "lib" | "main") {
        if let Some(dir) = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().to_string())
        {
            return dir;
        }
    }
    stem
}
