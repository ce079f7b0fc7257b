//! Output placement and atomic writes.

use crate::error::{Error, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default suffix appended to the input file stem.
pub const DEFAULT_SUFFIX: &str = "_gen_enumtype";

/// Output path for `input`: "src/scm.rs" → "src/scm_gen_enumtype.rs".
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.rs", stem, suffix))
}

/// Write `contents` to `path` through a temp file in the same directory and
/// an atomic rename. Leaves an identical existing file untouched.
///
/// Returns whether the file was (re)written.
pub fn write_atomic(path: &Path, contents: &str) -> Result<bool> {
    if read_existing(path)?.as_deref() == Some(contents) {
        return Ok(false);
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::io(tmp.path(), e))?;
    // The temp file is deleted on drop if persisting fails.
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(true)
}

/// Fail with [`Error::Stale`] unless `path` already holds exactly `contents`.
pub fn check(path: &Path, contents: &str) -> Result<()> {
    match read_existing(path)? {
        Some(existing) if existing == contents => Ok(()),
        _ => Err(Error::Stale {
            path: path.to_path_buf(),
        }),
    }
}

fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
