//! Herald Ledger - durable first-contact memory
//!
//! Records which principals have already been welcomed in which destination,
//! surviving process restarts:
//! - [`InteractionLedger`]: the in-memory mapping with idempotent recording
//! - [`LedgerStore`]: the persistence seam (JSON file or in-memory)
//!
//! # Example
//!
//! ```rust
//! use herald_ledger::{InteractionLedger, MemoryStore};
//! use herald_core::{DestinationId, PrincipalId};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let ledger = InteractionLedger::empty(Arc::new(MemoryStore::new()));
//!
//! let dest = DestinationId::new("g1");
//! let member = PrincipalId::new("p1");
//!
//! assert!(ledger.record_interaction(&dest, &member).await); // first contact
//! assert!(!ledger.record_interaction(&dest, &member).await); // already known
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod ledger;
pub mod store;

// Re-exports for convenience
pub use error::LedgerError;
pub use ledger::InteractionLedger;
pub use store::{JsonFileStore, LedgerSnapshot, LedgerStore, MemoryStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
