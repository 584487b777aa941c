//! Path helpers
//!
//! Paths are `/`-delimited segment sequences walked from the root. `/` and
//! the empty string both name the root. Repeated or trailing separators
//! are tolerated; `/a//b/` names the same node as `/a/b`.

use crate::error::FsError;

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// True if the path names the root directory.
pub fn is_root(path: &str) -> bool {
    segments(path).next().is_none()
}

/// Join a directory path and a child name into a full path.
pub fn join(dir: &str, name: &str) -> String {
    if is_root(dir) {
        format!("/{}", name)
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    }
}

/// Parent path of a non-root path; the root itself has no parent.
pub fn parent(path: &str) -> Option<String> {
    let segs: Vec<&str> = segments(path).collect();
    match segs.len() {
        0 => None,
        1 => Some("/".to_string()),
        n => Some(format!("/{}", segs[..n - 1].join("/"))),
    }
}

/// Validate a single node name: non-empty and free of separators.
pub fn validate_name(name: &str) -> Result<(), FsError> {
    if name.is_empty() || name.contains('/') {
        return Err(FsError::InvalidName(name.to_string()));
    }
    Ok(())
}
