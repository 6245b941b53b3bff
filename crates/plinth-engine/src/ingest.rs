use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use plinth_fs::{AtomicWriteOptions, Workspace, atomic_write};
use plinth_purge::Notifier;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::backup;
use crate::config::Config;
use crate::entrypoint::{self, EntryPointOutcome, INDEX_FILE};
use crate::error::IngestError;
use crate::payload::UploadPayload;
use crate::slug::Slug;

/// The upload coordinator.
///
/// One engine instance serializes all mutations for a given slug on a keyed
/// lock, while different slugs proceed independently. Readers never take a
/// lock: the live directory only ever changes through whole-directory
/// renames, so any observed `<root>/<slug>/` is a complete artifact.
pub struct Engine<N: Notifier> {
    config: Config,
    notifier: N,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<N: Notifier> Engine<N> {
    pub fn new(config: Config, notifier: N) -> Self {
        Self {
            config,
            notifier,
            locks: DashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn slug_lock(&self, slug: &Slug) -> Arc<Mutex<()>> {
        self.locks
            .entry(slug.as_str().to_owned())
            .or_default()
            .clone()
    }

    fn live_dir(&self, slug: &Slug) -> PathBuf {
        self.config.storage_root.join(slug.as_str())
    }

    fn staging_dir(&self, slug: &Slug) -> PathBuf {
        // Dotted, so it can never collide with a live slug directory.
        self.config.storage_root.join(format!(".stage.{slug}"))
    }

    /// Ingest one payload for `slug`.
    ///
    /// The new artifact is built in a staging directory, checked for an
    /// entry point, and only then swapped into the live path — after the
    /// previous version, if any, has been rotated to a snapshot. Every
    /// failure before the swap leaves the previously live artifact intact
    /// and the staging directory removed.
    pub async fn ingest(&self, slug: &str, payload: UploadPayload) -> Result<(), IngestError> {
        let slug = Slug::parse(slug)?;
        let lock = self.slug_lock(&slug);
        let _guard = lock.lock().await;

        std::fs::create_dir_all(&self.config.storage_root)?;
        let live = self.live_dir(&slug);
        let workspace = Workspace::new(self.staging_dir(&slug), &live)?;

        match &payload {
            UploadPayload::RawMarkup(markup) => {
                atomic_write(
                    workspace.path().join(INDEX_FILE),
                    markup.as_bytes(),
                    AtomicWriteOptions::new(),
                )?;
            }
            UploadPayload::SingleMarkupFile(bytes) => {
                atomic_write(
                    workspace.path().join(INDEX_FILE),
                    bytes,
                    AtomicWriteOptions::new(),
                )?;
            }
            UploadPayload::Archive(bytes) => {
                let summary = plinth_archive::extract_archive(bytes, workspace.path())?;
                debug!(
                    slug = %slug,
                    entries = summary.entries,
                    bytes = summary.total_bytes,
                    "extracted archive payload"
                );
            }
        }

        match entrypoint::resolve(workspace.path())? {
            EntryPointOutcome::Satisfied => {}
            EntryPointOutcome::Unsatisfiable => return Err(IngestError::EntryPointNotFound),
        }

        if live.exists() {
            let snapshot =
                backup::rotate(&self.config.storage_root, &slug).map_err(IngestError::BackupFailure)?;
            info!(slug = %slug, snapshot = %snapshot.display(), "rotated previous artifact");
        }

        workspace.commit()?;
        info!(slug = %slug, "published artifact");

        // Best-effort, awaited before returning so failures land in this
        // request's logs. Never an ingestion error.
        self.notifier.purge(slug.as_str()).await;

        Ok(())
    }

    /// Read the live entry point for an already-published artifact.
    pub async fn entry_point_contents(&self, slug: &str) -> Result<String, IngestError> {
        let slug = Slug::parse(slug)?;
        let index = self.live_dir(&slug).join(INDEX_FILE);

        match tokio::fs::read_to_string(&index).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(IngestError::ArtifactNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the live entry point in place, keeping a timestamped sibling
    /// copy of the previous markup. The write itself is atomic, so the
    /// live-directory invariant holds throughout.
    pub async fn update_entry_point(&self, slug: &str, markup: &str) -> Result<(), IngestError> {
        let slug = Slug::parse(slug)?;
        let lock = self.slug_lock(&slug);
        let _guard = lock.lock().await;

        let live = self.live_dir(&slug);
        let index = live.join(INDEX_FILE);
        if !index.is_file() {
            return Err(IngestError::ArtifactNotFound);
        }

        let secs = backup::unix_seconds();
        let mut keep = live.join(format!("{INDEX_FILE}.bak.{secs}"));
        let mut attempt = 1u32;
        while keep.exists() {
            attempt += 1;
            keep = live.join(format!("{INDEX_FILE}.bak.{secs}-{attempt}"));
        }
        std::fs::copy(&index, &keep)?;

        atomic_write(&index, markup.as_bytes(), AtomicWriteOptions::new())?;
        info!(slug = %slug, "updated entry point");

        self.notifier.purge(slug.as_str()).await;

        Ok(())
    }
}
