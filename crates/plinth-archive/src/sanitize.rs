use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Validate an archive entry's stored name and derive its extraction path,
/// relative to the extraction root.
///
/// The check runs against the raw, un-normalized name: an entry is unsafe
/// if the name is absolute (leading `/` or `\`, or a drive prefix) or
/// contains a `..` segment anywhere, split on either separator. Normalizing
/// before checking could mask an encoded traversal attempt.
///
/// Returns `None` for names that resolve to the extraction root itself
/// (`.`, `./`), which tar front-ends commonly emit as directory entries.
pub fn sanitize_entry_name(raw: &str) -> Result<Option<PathBuf>> {
    if raw.is_empty() || raw.contains('\0') {
        return Err(Error::InvalidPath);
    }

    if raw.starts_with('/') || raw.starts_with('\\') || has_drive_prefix(raw) {
        return Err(Error::UnsafeEntry { entry: raw.into() });
    }

    let mut relative = PathBuf::new();
    for part in raw.split(['/', '\\']) {
        if part == ".." {
            return Err(Error::UnsafeEntry { entry: raw.into() });
        }
        if part.is_empty() || part == "." {
            continue;
        }
        relative.push(part);
    }

    if relative.as_os_str().is_empty() {
        Ok(None)
    } else {
        Ok(Some(relative))
    }
}

/// Validate a symlink entry's target.
///
/// `entry_rel` is the link's already-sanitized location relative to the
/// extraction root. The target must be relative, and once resolved against
/// the link's parent directory it must stay inside the root: every `..`
/// pops one resolved component, and popping past the root rejects the
/// archive.
pub fn sanitize_link_target(target: &str, entry_rel: &Path, entry_raw: &str) -> Result<()> {
    if target.is_empty() || target.contains('\0') {
        return Err(Error::InvalidPath);
    }

    if target.starts_with('/') || target.starts_with('\\') || has_drive_prefix(target) {
        return Err(Error::AbsoluteSymlinkTarget {
            entry: entry_raw.into(),
            target: target.into(),
        });
    }

    let mut depth = entry_rel.parent().map_or(0, |p| {
        p.components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .count()
    });

    for part in target.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => {
                if depth == 0 {
                    return Err(Error::SymlinkEscape {
                        entry: entry_raw.into(),
                        target: target.into(),
                    });
                }
                depth -= 1;
            }
            _ => depth += 1,
        }
    }

    Ok(())
}

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
