//! Core types for Herald
//!
//! Defines the fundamental types for the relay engine:
//! - Destination and principal identifiers
//! - Inbound events from the platform session
//! - Outbound payloads and broadcast requests
//! - Per-destination dispatch outcomes

use crate::transport::SendError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier for a broadcast target (a group conversation)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(pub String);

impl DestinationId {
    /// Create destination id from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DestinationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DestinationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque identifier for a message sender
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub String);

impl PrincipalId {
    /// Create principal id from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare handle for mention text: the identifier up to the first `@`
    ///
    /// Platform ids carry a domain suffix (`1234@c.us`); mentions render
    /// only the local part.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque handle to media held by the platform
///
/// Resolved to a [`Media`] payload through the transport before fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(pub String);

impl MediaRef {
    /// Create media reference
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// A fetched media payload ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    /// MIME type as reported by the platform
    pub mime_type: String,
    /// Raw payload bytes
    pub data: Vec<u8>,
    /// Original filename, if the platform provided one
    pub filename: Option<String>,
}

impl Media {
    /// Create media payload
    #[inline]
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
            filename: None,
        }
    }

    /// Attach the original filename
    #[inline]
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// One inbound event delivered by the platform session
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Conversation the event originated from
    pub destination: DestinationId,
    /// Sender identity
    pub sender: PrincipalId,
    /// Message body (empty string when the platform omits it)
    pub body: String,
    /// Attached media, if any
    pub media: Option<MediaRef>,
    /// Sender display name, if the platform provided one
    pub sender_display_name: Option<String>,
}

impl InboundEvent {
    /// Create a text-only event
    #[must_use]
    pub fn new(
        destination: impl Into<DestinationId>,
        sender: impl Into<PrincipalId>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            sender: sender.into(),
            body: body.into(),
            media: None,
            sender_display_name: None,
        }
    }

    /// Attach media to the event
    #[inline]
    #[must_use]
    pub fn with_media(mut self, media: MediaRef) -> Self {
        self.media = Some(media);
        self
    }

    /// Attach the sender's display name
    #[inline]
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.sender_display_name = Some(name.into());
        self
    }

    /// Display name with the defensive fallback for absent names
    #[inline]
    #[must_use]
    pub fn display_name_or_default(&self) -> &str {
        self.sender_display_name.as_deref().unwrap_or("user")
    }
}

/// The unit of delivery: what fan-out and replies actually send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundMessage {
    /// Plain text, optionally mentioning principals
    Text {
        /// Message body
        body: String,
        /// Principals to mention (empty for ordinary text)
        mentions: Vec<PrincipalId>,
    },
    /// Media with an optional caption
    Media {
        /// Fetched media payload
        media: Media,
        /// Caption text (empty string for none)
        caption: String,
    },
}

impl OutboundMessage {
    /// Plain text message without mentions
    #[inline]
    #[must_use]
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text {
            body: body.into(),
            mentions: Vec::new(),
        }
    }

    /// Text message mentioning the given principals
    #[inline]
    #[must_use]
    pub fn text_with_mentions(body: impl Into<String>, mentions: Vec<PrincipalId>) -> Self {
        Self::Text {
            body: body.into(),
            mentions,
        }
    }

    /// Media message with caption
    #[inline]
    #[must_use]
    pub fn media(media: Media, caption: impl Into<String>) -> Self {
        Self::Media {
            media,
            caption: caption.into(),
        }
    }
}

/// A qualifying broadcast, built by the router and consumed immediately
///
/// Never persisted; `requested_at` exists for logging and telemetry.
#[derive(Debug, Clone)]
pub struct BroadcastRequest {
    /// Payload to fan out
    pub payload: OutboundMessage,
    /// Principal that requested the broadcast
    pub origin: PrincipalId,
    /// When the router accepted the request
    pub requested_at: DateTime<Utc>,
}

impl BroadcastRequest {
    /// Create a request stamped with the current time
    #[inline]
    #[must_use]
    pub fn new(payload: OutboundMessage, origin: PrincipalId) -> Self {
        Self {
            payload,
            origin,
            requested_at: Utc::now(),
        }
    }
}

/// Result of sending one payload to one destination
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// Destination this outcome refers to
    pub destination: DestinationId,
    /// Success, or the captured transport failure
    pub result: Result<(), SendError>,
}

impl DispatchOutcome {
    /// Successful outcome
    #[inline]
    #[must_use]
    pub fn success(destination: DestinationId) -> Self {
        Self {
            destination,
            result: Ok(()),
        }
    }

    /// Failed outcome with the captured error
    #[inline]
    #[must_use]
    pub fn failure(destination: DestinationId, error: SendError) -> Self {
        Self {
            destination,
            result: Err(error),
        }
    }

    /// Whether the send succeeded
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Captured error, if the send failed
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&SendError> {
        self.result.as_ref().err()
    }
}

/// Aggregate result of one fan-out pass
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    /// Per-destination outcomes, in configured destination order
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    /// Report over the given outcomes
    #[inline]
    #[must_use]
    pub fn new(outcomes: Vec<DispatchOutcome>) -> Self {
        Self { outcomes }
    }

    /// Number of successful sends
    #[inline]
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of failed sends
    #[inline]
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// Whether every destination received the payload
    #[inline]
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(DispatchOutcome::is_success)
    }

    /// Iterate the failed outcomes
    pub fn failures(&self) -> impl Iterator<Item = &DispatchOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Identity of the connected account, snapshotted when the session is ready
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    /// Own principal id
    pub principal: PrincipalId,
    /// Own display name
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_handle_strips_domain_suffix() {
        let p = PrincipalId::new("5522998680482@c.us");
        assert_eq!(p.handle(), "5522998680482");

        let bare = PrincipalId::new("operator");
        assert_eq!(bare.handle(), "operator");
    }

    #[test]
    fn event_display_name_fallback() {
        let event = InboundEvent::new("g1", "p1", "hi");
        assert_eq!(event.display_name_or_default(), "user");

        let named = event.with_display_name("Ana");
        assert_eq!(named.display_name_or_default(), "Ana");
    }

    #[test]
    fn dispatch_report_counts() {
        let report = DispatchReport::new(vec![
            DispatchOutcome::success(DestinationId::new("a")),
            DispatchOutcome::failure(
                DestinationId::new("b"),
                SendError::DeliveryFailed("timed out".to_string()),
            ),
            DispatchOutcome::success(DestinationId::new("c")),
        ]);

        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().count(), 1);
    }

    #[test]
    fn destination_id_serde_transparent() {
        let dest = DestinationId::new("120363368116021245@g.us");
        let json = serde_json::to_string(&dest).unwrap();
        assert_eq!(json, "\"120363368116021245@g.us\"");

        let back: DestinationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dest);
    }
}
