//! Filesystem locations used by the application.
//!
//! Data files (favorites, trace output) live in the platform data directory,
//! e.g. `~/.local/share/citysearch` on Linux.

use std::path::{Path, PathBuf};

/// Name of the application directory under the platform data dir.
const APP_DIR: &str = "citysearch";

/// Returns the data directory for citysearch storage.
///
/// Resolves to `<platform data dir>/citysearch`. Falls back to
/// `./.citysearch` when the platform exposes no data directory.
///
/// # Examples
///
/// ```
/// use citysearch::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert!(data_dir.ends_with("citysearch") || data_dir.ends_with(".citysearch"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".citysearch"), |dir| dir.join(APP_DIR))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and all paths when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use citysearch::infrastructure::expand_tilde;
/// use std::path::Path;
///
/// assert_eq!(expand_tilde("/absolute/path"), Path::new("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
