//! Ledger persistence seam
//!
//! The ledger itself is storage-agnostic; anything that can round-trip a
//! [`LedgerSnapshot`] implements [`LedgerStore`]. The reference deployment
//! uses a flat JSON document on disk.

use crate::error::LedgerError;
use async_trait::async_trait;
use herald_core::{DestinationId, PrincipalId};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Full ledger contents: destination to already-welcomed principals
pub type LedgerSnapshot = HashMap<DestinationId, HashSet<PrincipalId>>;

/// Durable storage for the interaction ledger
///
/// `persist` always rewrites the whole snapshot: interaction volume is low
/// and full rewrites keep the store trivial. An incremental store can slot
/// in behind this trait if the scale assumption ever breaks.
#[async_trait]
pub trait LedgerStore: Send + Sync + std::fmt::Debug {
    /// Read the full snapshot
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError>;

    /// Overwrite storage with the full snapshot
    async fn persist(&self, snapshot: &LedgerSnapshot) -> Result<(), LedgerError>;
}

/// JSON document on disk
///
/// Writes go to a sibling temp file first, then rename over the target, so a
/// crash mid-write cannot corrupt the previous document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the given path
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn persist(&self, snapshot: &LedgerSnapshot) -> Result<(), LedgerError> {
        let raw = serde_json::to_string_pretty(snapshot)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, raw.as_bytes()).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: parking_lot::Mutex<LedgerSnapshot>,
}

impl MemoryStore {
    /// Empty in-memory store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a snapshot
    #[inline]
    #[must_use]
    pub fn with_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot: parking_lot::Mutex::new(snapshot),
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn load(&self) -> Result<LedgerSnapshot, LedgerError> {
        Ok(self.snapshot.lock().clone())
    }

    async fn persist(&self, snapshot: &LedgerSnapshot) -> Result<(), LedgerError> {
        *self.snapshot.lock() = snapshot.clone();
        Ok(())
    }
}
