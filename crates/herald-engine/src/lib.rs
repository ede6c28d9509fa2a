//! Herald Engine - fan-out dispatch and command routing
//!
//! The executable half of the relay:
//! - [`FanoutDispatcher`]: one payload to N destinations, failures isolated
//! - [`RelayService`]: classifies inbound events and runs welcome checks,
//!   de-duplicated broadcasts, and canned replies
//! - [`replies`]: the fixed reply texts
//!
//! # Example
//!
//! ```rust,ignore
//! use herald_engine::RelayService;
//! use herald_core::{InboundEvent, RelayConfig};
//! use std::sync::Arc;
//!
//! # async fn example(config: RelayConfig, transport: Arc<dyn herald_core::Transport>) {
//! let service = RelayService::start(config, transport).await;
//!
//! let event = InboundEvent::new("g1", "boss", "!say launch at noon");
//! let report = service.handle_event(&event).await;
//! println!("delivered to {} destinations", report.broadcasts[0].success_count());
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod dispatch;
pub mod replies;
pub mod service;

// Re-exports for convenience
pub use dispatch::FanoutDispatcher;
pub use service::{EventReport, RelayService};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the Herald engine
    pub use crate::{EventReport, FanoutDispatcher, RelayService};
    pub use herald_core::prelude::*;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
