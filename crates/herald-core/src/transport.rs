//! Transport seam to the platform session
//!
//! The relay engine never talks to the messaging platform directly; it sends
//! through [`Transport`], the narrow interface the excluded session
//! collaborator implements. Login, session state, and the wire protocol all
//! live on the other side of this trait.

use crate::types::{DestinationId, Media, MediaRef, OutboundMessage};
use async_trait::async_trait;

/// Failure sending to (or fetching from) one destination
///
/// Cloneable so outcomes can be both reported and logged; detail is carried
/// as text because the underlying platform errors are opaque here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    /// Destination id could not be resolved to a sendable handle
    #[error("destination not resolvable: {0}")]
    DestinationUnresolvable(String),

    /// Delivery failed after the destination was resolved
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),

    /// Media handle could not be fetched
    #[error("media fetch failed: {0}")]
    MediaFetchFailed(String),
}

/// Sending side of the platform session
///
/// Implementations resolve destination ids internally; callers only see
/// send success or a [`SendError`]. Every method is expected to fail softly:
/// errors are values, never panics.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Deliver one message to one destination
    async fn send(
        &self,
        destination: &DestinationId,
        message: &OutboundMessage,
    ) -> Result<(), SendError>;

    /// Resolve a media handle into a sendable payload
    async fn fetch_media(&self, media: &MediaRef) -> Result<Media, SendError>;

    /// Display name for a destination, when the platform knows one
    ///
    /// Used for welcome text; callers fall back to the raw id.
    async fn destination_name(&self, destination: &DestinationId) -> Option<String>;
}
