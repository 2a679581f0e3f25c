//! Collision-free names for received files.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Find a free sibling of `path` named `<stem>_<n>.<ext>`, trying `n` from 1
/// up to `max_attempts`.
///
/// Existence is checked again for every candidate. Returns `None` when all
/// candidates are taken.
pub fn unique_file_name(path: &Path, max_attempts: u32) -> Option<PathBuf> {
    (1..=max_attempts)
        .map(|n| numbered(path, n))
        .find(|candidate| !candidate.exists())
}

/// `doc.pdf` -> `doc_<n>.pdf`, `README` -> `README_<n>`, `.bashrc` -> `.bashrc_<n>`.
fn numbered(path: &Path, n: u32) -> PathBuf {
    let mut name: OsString = path.file_stem().map(OsString::from).unwrap_or_default();
    name.push(format!("_{n}"));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
