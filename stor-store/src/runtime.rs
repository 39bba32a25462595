//! Runtime capability detection.

use std::path::{Path, PathBuf};

/// Directory name used for the home-derived default storage root.
const DEFAULT_ROOT_DIR: &str = ".stor";

/// Resolves the storage root for the ambient backends (local, indexed).
///
/// An explicit directory always wins. Otherwise the root is derived from the
/// user's home directory (`HOME`, then `USERPROFILE`). `None` means the
/// current runtime has no usable storage location at all, the structural
/// unavailability case, which callers answer with a no-op backend rather
/// than an error.
pub fn storage_root(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        if dir.as_os_str().is_empty() {
            return None;
        }
        return Some(dir.to_path_buf());
    }
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())?;
    Some(PathBuf::from(home).join(DEFAULT_ROOT_DIR))
}
