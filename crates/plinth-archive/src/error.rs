use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format")]
    UnsupportedFormat,

    #[error("archive entry escapes extraction root: '{entry}'")]
    UnsafeEntry { entry: String },

    #[error("symlink target escapes extraction root: '{target}' in '{entry}'")]
    SymlinkEscape { entry: String, target: String },

    #[error("symlink target is an absolute path: '{target}' in '{entry}'")]
    AbsoluteSymlinkTarget { entry: String, target: String },

    #[error("entry path is empty, non-UTF-8, or contains a null byte")]
    InvalidPath,

    #[error("archive is corrupted")]
    Corrupted,

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("failed to create symlink '{path}': {source}")]
    SymlinkCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error is a path-safety rejection, as opposed to a
    /// malformed or unreadable archive.
    pub fn is_unsafe_entry(&self) -> bool {
        matches!(
            self,
            Error::UnsafeEntry { .. }
                | Error::SymlinkEscape { .. }
                | Error::AbsoluteSymlinkTarget { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
