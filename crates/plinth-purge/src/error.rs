#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("purge request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("purge endpoint returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("purge rejected by upstream: {errors}")]
    Rejected { errors: String },
}

pub type Result<T> = std::result::Result<T, Error>;
