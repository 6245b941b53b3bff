use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::slug::Slug;

pub(crate) fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Move the live artifact directory for `slug` to a fresh snapshot path
/// `<root>/<slug>_backup_<unix-seconds>`, appending `-<n>` when a rotation
/// already landed in the same second. Snapshots are write-once: the engine
/// never reads or prunes them.
///
/// Rotation is atomic from a reader's perspective (`plinth_fs::move_dir`);
/// on failure the live directory is untouched and no snapshot remains.
pub(crate) fn rotate(storage_root: &Path, slug: &Slug) -> plinth_fs::Result<PathBuf> {
    let live = storage_root.join(slug.as_str());
    let secs = unix_seconds();

    let mut snapshot = storage_root.join(format!("{slug}_backup_{secs}"));
    let mut attempt = 1u32;
    while snapshot.exists() {
        attempt += 1;
        snapshot = storage_root.join(format!("{slug}_backup_{secs}-{attempt}"));
    }

    plinth_fs::move_dir(&live, &snapshot)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rotation_preserves_contents() {
        let root = tempdir().unwrap();
        let slug = Slug::parse("demo").unwrap();
        let live = root.path().join("demo");
        std::fs::create_dir_all(live.join("assets")).unwrap();
        std::fs::write(live.join("index.html"), "v1").unwrap();
        std::fs::write(live.join("assets/app.js"), "js").unwrap();

        let snapshot = rotate(root.path(), &slug).unwrap();

        assert!(!live.exists());
        assert!(
            snapshot
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("demo_backup_")
        );
        assert_eq!(
            std::fs::read_to_string(snapshot.join("index.html")).unwrap(),
            "v1"
        );
        assert_eq!(
            std::fs::read_to_string(snapshot.join("assets/app.js")).unwrap(),
            "js"
        );
    }

    #[test]
    fn same_second_rotations_get_distinct_names() {
        let root = tempdir().unwrap();
        let slug = Slug::parse("demo").unwrap();

        // Occupy the plain timestamped name for the current second.
        let taken = root.path().join(format!("demo_backup_{}", unix_seconds()));
        std::fs::create_dir_all(&taken).unwrap();

        std::fs::create_dir_all(root.path().join("demo")).unwrap();
        let snapshot = rotate(root.path(), &slug).unwrap();

        assert_ne!(snapshot, taken);
        assert!(snapshot.exists());
    }

    #[test]
    fn missing_live_directory_fails_cleanly() {
        let root = tempdir().unwrap();
        let slug = Slug::parse("absent").unwrap();
        assert!(rotate(root.path(), &slug).is_err());
    }
}
