//! Interaction ledger: who has already been welcomed where
//!
//! Durable record of first contact per (destination, principal) pair. Loaded
//! once at startup, flushed in full on every insertion (durability over
//! batching; interaction volume is low). A missing or corrupt document is
//! never fatal: the ledger starts empty and logs why.

use crate::error::LedgerError;
use crate::store::{LedgerSnapshot, LedgerStore};
use herald_core::{DestinationId, PrincipalId};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Durable first-contact memory
///
/// One async lock guards the whole mapping: check, insert, and flush happen
/// inside a single critical section, so concurrently dispatched events
/// cannot produce a duplicate welcome.
#[derive(Debug)]
pub struct InteractionLedger {
    state: Mutex<LedgerSnapshot>,
    store: Arc<dyn LedgerStore>,
}

impl InteractionLedger {
    /// Ledger populated from the store
    ///
    /// An unreadable or invalid document is logged and treated as "no prior
    /// interactions" — startup always succeeds.
    pub async fn load(store: Arc<dyn LedgerStore>) -> Self {
        let state = match store.load().await {
            Ok(snapshot) => {
                tracing::info!(
                    destinations = snapshot.len(),
                    "interaction ledger loaded"
                );
                snapshot
            }
            Err(e) => {
                tracing::warn!(error = %e, "ledger unavailable, starting empty");
                LedgerSnapshot::new()
            }
        };

        Self {
            state: Mutex::new(state),
            store,
        }
    }

    /// Empty ledger over the store, skipping the initial read
    #[inline]
    #[must_use]
    pub fn empty(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            state: Mutex::new(LedgerSnapshot::new()),
            store,
        }
    }

    /// Whether this principal was already welcomed in this destination
    pub async fn has_interacted(
        &self,
        destination: &DestinationId,
        principal: &PrincipalId,
    ) -> bool {
        self.state
            .lock()
            .await
            .get(destination)
            .is_some_and(|set| set.contains(principal))
    }

    /// Record first contact; returns `true` iff this call inserted a new pair
    ///
    /// A new insertion triggers an immediate flush while the lock is still
    /// held. Flush failure is logged and swallowed: in-memory state stays
    /// authoritative for the rest of the process.
    pub async fn record_interaction(
        &self,
        destination: &DestinationId,
        principal: &PrincipalId,
    ) -> bool {
        let mut state = self.state.lock().await;

        let inserted = state
            .entry(destination.clone())
            .or_default()
            .insert(principal.clone());

        if inserted {
            if let Err(e) = self.store.persist(&state).await {
                tracing::warn!(
                    destination = %destination,
                    principal = %principal,
                    error = %e,
                    "ledger flush failed, in-memory state remains authoritative"
                );
            }
        }

        inserted
    }

    /// Rewrite durable storage from the current in-memory state
    ///
    /// # Errors
    /// [`LedgerError`] from the underlying store. Callers on the event path
    /// log and continue; this surface exists for explicit host-driven saves.
    pub async fn flush(&self) -> Result<(), LedgerError> {
        let state = self.state.lock().await;
        self.store.persist(&state).await
    }

    /// Copy of the full mapping
    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.state.lock().await.clone()
    }

    /// Total recorded (destination, principal) pairs
    pub async fn interaction_count(&self) -> usize {
        self.state.lock().await.values().map(|s| s.len()).sum()
    }
}
