//! Request-target validation and resolution against the document root.

use std::path::{Path, PathBuf};

/// Returns `true` when `target` may be resolved against the filesystem.
///
/// A target is rejected if it contains `..` anywhere, or if it contains more
/// than one `/`. Only the leading slash is allowed, so nothing below the
/// document root's top level is ever reachable.
///
/// ```
/// # use staticd::http::path::is_safe;
/// assert!(is_safe("/index.html"));
/// assert!(!is_safe("/../etc/passwd"));
/// assert!(!is_safe("/assets/app.js"));
/// ```
pub fn is_safe(target: &str) -> bool {
    if target.contains("..") {
        return false;
    }

    target.bytes().filter(|&b| b == b'/').count() <= 1
}

/// Maps a request-target to a path under `root`.
///
/// `/` resolves to `index`; `/<name>` resolves to `<name>`. Returns `None`
/// for targets that are empty, relative, or fail [`is_safe`].
pub fn resolve(root: &Path, index: &str, target: &str) -> Option<PathBuf> {
    let name = target.strip_prefix('/')?;

    if !is_safe(target) {
        return None;
    }

    if name.is_empty() {
        Some(root.join(index))
    } else {
        Some(root.join(name))
    }
}
