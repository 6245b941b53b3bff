use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A transactional staging directory.
///
/// Content is built up under a staging path; `commit` renames it onto the
/// destination in one step. A workspace that is dropped without committing
/// removes its staging directory, so failed builds leave nothing behind.
///
/// `commit` uses a plain `rename` with no copy fallback: callers place the
/// staging path on the same filesystem as the destination, which is what
/// makes the final transition atomic for concurrent readers.
pub struct Workspace {
    staging: PathBuf,
    destination: PathBuf,
    committed: bool,
}

impl Workspace {
    /// Create a workspace rooted at `staging`, targeting `destination`.
    /// A stale staging directory left behind by a crashed process is
    /// removed first.
    pub fn new(staging: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<Self> {
        let staging = staging.as_ref().to_path_buf();
        let destination = destination.as_ref().to_path_buf();

        if staging.exists() {
            std::fs::remove_dir_all(&staging).map_err(|e| Error::Remove {
                path: staging.clone(),
                source: e,
            })?;
        }
        std::fs::create_dir_all(&staging).map_err(|e| Error::CreateDir {
            path: staging.clone(),
            source: e,
        })?;

        Ok(Self {
            staging,
            destination,
            committed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.staging
    }

    pub fn commit(mut self) -> Result<()> {
        std::fs::rename(&self.staging, &self.destination).map_err(|e| Error::Rename {
            from: self.staging.clone(),
            to: self.destination.clone(),
            source: e,
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_dir_all(&self.staging);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn commit_moves_staging_to_destination() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("staging");
        let dest = dir.path().join("dest");

        let workspace = Workspace::new(&staging, &dest).unwrap();
        std::fs::write(workspace.path().join("file.txt"), "data").unwrap();
        workspace.commit().unwrap();

        assert!(!staging.exists());
        assert_eq!(std::fs::read_to_string(dest.join("file.txt")).unwrap(), "data");
    }

    #[test]
    fn drop_without_commit_cleans_up() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("staging");
        {
            let workspace = Workspace::new(&staging, dir.path().join("dest")).unwrap();
            std::fs::write(workspace.path().join("file.txt"), "data").unwrap();
            assert!(staging.exists());
        }
        assert!(!staging.exists());
    }

    #[test]
    fn stale_staging_is_replaced() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("staging");
        std::fs::create_dir_all(&staging).unwrap();
        std::fs::write(staging.join("leftover.txt"), "stale").unwrap();

        let workspace = Workspace::new(&staging, dir.path().join("dest")).unwrap();
        assert!(!workspace.path().join("leftover.txt").exists());
    }
}
