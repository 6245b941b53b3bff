use std::path::{Path, PathBuf};

use crate::entrypoint::INDEX_FILE;
use crate::slug::Slug;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ServeError {
    #[error("path escapes the artifact directory")]
    Denied,

    #[error("file not found")]
    NotFound,
}

/// Resolve a request path strictly inside `<root>/<slug>/`.
///
/// The safety kernel for the file-serving collaborator: traversal segments
/// and absolute components are denied, an empty path or a directory falls
/// back to `index.html`, and only an existing regular file resolves.
pub fn resolve_request_path(
    storage_root: &Path,
    slug: &str,
    request_path: &str,
) -> Result<PathBuf, ServeError> {
    let slug = Slug::parse(slug).map_err(|_| ServeError::NotFound)?;

    let mut resolved = storage_root.join(slug.as_str());
    for part in request_path.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => return Err(ServeError::Denied),
            _ if part.contains('\0') || has_drive_prefix(part) => {
                return Err(ServeError::Denied);
            }
            _ => resolved.push(part),
        }
    }

    if resolved.is_dir() {
        resolved.push(INDEX_FILE);
    }
    if !resolved.is_file() {
        return Err(ServeError::NotFound);
    }

    Ok(resolved)
}

fn has_drive_prefix(part: &str) -> bool {
    let bytes = part.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
