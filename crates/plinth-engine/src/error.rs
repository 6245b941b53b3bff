use std::io;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid slug '{slug}': {reason}")]
    InvalidSlug { slug: String, reason: &'static str },

    #[error("unsupported payload: {reason}")]
    UnsupportedPayload { reason: String },

    #[error("unsafe archive entry: {0}")]
    UnsafeArchiveEntry(#[source] plinth_archive::Error),

    #[error("no servable entry point in payload")]
    EntryPointNotFound,

    #[error("failed to back up previous artifact: {0}")]
    BackupFailure(#[source] plinth_fs::Error),

    #[error("no artifact published under this slug")]
    ArtifactNotFound,

    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    #[error("i/o failure: {0}")]
    Fs(#[from] plinth_fs::Error),

    #[error("archive extraction failed: {0}")]
    Extraction(#[source] plinth_archive::Error),
}

impl From<plinth_archive::Error> for IngestError {
    fn from(err: plinth_archive::Error) -> Self {
        use plinth_archive::Error as ArchiveError;

        if err.is_unsafe_entry() {
            return IngestError::UnsafeArchiveEntry(err);
        }
        match err {
            ArchiveError::UnsupportedFormat | ArchiveError::Corrupted | ArchiveError::InvalidPath => {
                IngestError::UnsupportedPayload {
                    reason: err.to_string(),
                }
            }
            other => IngestError::Extraction(other),
        }
    }
}
