//! Herald Core - Broadcast relay domain
//!
//! The platform-agnostic heart of the relay engine:
//! - Destination/principal identifiers, events, and payload types
//! - Static relay configuration with a JSON loader
//! - Pure event classification into tagged actions
//! - The dedup window that suppresses repeated broadcast text
//! - The [`Transport`] seam the platform session implements
//!
//! # Example
//!
//! ```rust
//! use herald_core::{classify, DestinationId, EventAction, InboundEvent, PrincipalId, RelayConfig};
//!
//! let config = RelayConfig::new(
//!     vec![DestinationId::new("g1")],
//!     PrincipalId::new("boss"),
//! );
//!
//! let event = InboundEvent::new("g1", "boss", "!say hello");
//! let actions = classify(&event, &config);
//! assert!(actions.contains(&EventAction::BroadcastText("hello".to_string())));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod classify;
pub mod config;
pub mod dedup;
pub mod error;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use classify::{classify, EventAction, InfoCommand};
pub use config::{RelayConfig, DEFAULT_DEDUP_TTL_SECS};
pub use dedup::{DedupWindow, Fingerprint};
pub use error::ConfigError;
pub use transport::{SendError, Transport};
pub use types::{
    AccountIdentity, BroadcastRequest, DestinationId, DispatchOutcome, DispatchReport,
    InboundEvent, Media, MediaRef, OutboundMessage, PrincipalId,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Herald core
    pub use crate::{
        classify, DedupWindow, DestinationId, DispatchOutcome, DispatchReport, EventAction,
        Fingerprint, InboundEvent, OutboundMessage, PrincipalId, RelayConfig, SendError, Transport,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
