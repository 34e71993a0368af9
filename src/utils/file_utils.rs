//! File system utilities

use std::path::{Path, PathBuf};

/// Swap the last extension of `path` for `ext`.
///
/// A path without an extension gets one; an existing extension is replaced,
/// never appended to.
pub fn replace_extension(path: &Path, ext: &str) -> PathBuf {
    path.with_extension(ext)
}
