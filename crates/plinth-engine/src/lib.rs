//! Artifact ingestion and versioning engine for slug-addressed static sites.
//!
//! An [`Engine`] owns a storage root under which each published artifact
//! lives at `<root>/<slug>/`, always with an `index.html` at its top level.
//! Ingestion builds the incoming payload in a staging directory, guarantees
//! an entry point exists, rotates any previous version into an immutable
//! snapshot, and promotes the staging directory with a single atomic rename,
//! so readers only ever observe a complete artifact.
//!
//! # Architecture
//!
//! - `slug.rs` - Identifier validation and random generation
//! - `payload.rs` - Upload classification
//! - `config.rs` - Immutable engine configuration
//! - `entrypoint.rs` - Deterministic `index.html` resolution
//! - `backup.rs` - Snapshot rotation
//! - `ingest.rs` - The upload coordinator
//! - `serve.rs` - Safe request-path resolution for the file server

pub use config::{Config, ConfigError};
pub use entrypoint::{EntryPointOutcome, INDEX_FILE};
pub use error::IngestError;
pub use ingest::Engine;
pub use payload::UploadPayload;
pub use serve::{ServeError, resolve_request_path};
pub use slug::Slug;

pub use plinth_purge::{CachePurger, Notifier, PurgeConfig};

mod backup;
mod config;
mod entrypoint;
mod error;
mod ingest;
mod payload;
mod serve;
mod slug;
