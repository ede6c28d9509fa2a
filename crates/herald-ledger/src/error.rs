//! Error types for the interaction ledger
//!
//! Persistence failures are never fatal to the relay: read failures degrade
//! to an empty ledger, write failures leave in-memory state authoritative.

/// Ledger persistence errors
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Underlying storage could not be read or written
    #[error("ledger storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document is not a valid ledger
    #[error("ledger document invalid: {0}")]
    Format(#[from] serde_json::Error),
}
