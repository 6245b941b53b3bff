use std::path::Path;

use crate::{Error, Result};

/// Recursively copy a directory tree. Symlinks are not followed specially;
/// they are copied as whatever `std::fs::copy` resolves them to.
pub fn copy_dir_all(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    std::fs::create_dir_all(dest).map_err(|e| Error::CreateDir {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let entries = std::fs::read_dir(src).map_err(|e| Error::ReadDir {
        path: src.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| Error::ReadDir {
            path: src.to_path_buf(),
            source: e,
        })?;
        let ty = entry.file_type().map_err(|e| Error::ReadDir {
            path: entry.path(),
            source: e,
        })?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if ty.is_dir() {
            copy_dir_all(&src_path, &dest_path)?;
        } else {
            std::fs::copy(&src_path, &dest_path).map_err(|e| Error::Copy {
                from: src_path,
                to: dest_path,
                source: e,
            })?;
        }
    }

    Ok(())
}

/// Move a directory so that readers observe either the source fully in
/// place or the destination fully in place, never a half-emptied tree.
///
/// A native `rename` is attempted first. When the destination lives on a
/// different filesystem the kernel refuses with `CrossesDevices`; in that
/// case the tree is copied over and the source removed only once the copy
/// is complete. On any failure the half-written destination is deleted and
/// the source is left untouched.
pub fn move_dir(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    match std::fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            copy_then_remove(src, dest)
        }
        Err(e) => Err(Error::Rename {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
            source: e,
        }),
    }
}

fn copy_then_remove(src: &Path, dest: &Path) -> Result<()> {
    if let Err(err) = copy_dir_all(src, dest) {
        let _ = std::fs::remove_dir_all(dest);
        return Err(err);
    }

    if let Err(e) = std::fs::remove_dir_all(src) {
        let _ = std::fs::remove_dir_all(dest);
        return Err(Error::Remove {
            path: src.to_path_buf(),
            source: e,
        });
    }

    Ok(())
}
