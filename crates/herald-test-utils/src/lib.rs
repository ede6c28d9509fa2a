//! Testing utilities for the Herald workspace
//!
//! Shared test helpers: a scriptable in-memory transport and event fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use herald_core::{
    DestinationId, InboundEvent, Media, MediaRef, OutboundMessage, PrincipalId, SendError,
    Transport,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// In-memory transport that records every send and fails on demand.
///
/// Destinations marked with [`MockTransport::fail_destination`] reject sends
/// with a delivery error; everything else succeeds and is recorded.
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Mutex<Vec<(DestinationId, OutboundMessage)>>,
    failing: Mutex<HashSet<DestinationId>>,
    names: Mutex<HashMap<DestinationId, String>>,
    fail_media_fetch: Mutex<bool>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script every future send to this destination to fail.
    pub fn fail_destination(&self, destination: impl Into<DestinationId>) {
        self.failing.lock().insert(destination.into());
    }

    /// Script media fetches to fail.
    pub fn fail_media_fetch(&self) {
        *self.fail_media_fetch.lock() = true;
    }

    /// Give a destination a display name.
    pub fn name_destination(&self, destination: impl Into<DestinationId>, name: impl Into<String>) {
        self.names.lock().insert(destination.into(), name.into());
    }

    /// Everything successfully sent, in send order.
    pub fn sent(&self) -> Vec<(DestinationId, OutboundMessage)> {
        self.sent.lock().clone()
    }

    /// Messages successfully sent to one destination.
    pub fn sent_to(&self, destination: &DestinationId) -> Vec<OutboundMessage> {
        self.sent
            .lock()
            .iter()
            .filter(|(d, _)| d == destination)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Total successful sends across all destinations.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Drop all recorded sends.
    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(
        &self,
        destination: &DestinationId,
        message: &OutboundMessage,
    ) -> Result<(), SendError> {
        if self.failing.lock().contains(destination) {
            return Err(SendError::DeliveryFailed(format!(
                "scripted failure for {destination}"
            )));
        }
        self.sent
            .lock()
            .push((destination.clone(), message.clone()));
        Ok(())
    }

    async fn fetch_media(&self, media: &MediaRef) -> Result<Media, SendError> {
        if *self.fail_media_fetch.lock() {
            return Err(SendError::MediaFetchFailed(format!(
                "scripted fetch failure for {}",
                media.0
            )));
        }
        Ok(Media::new("image/png", vec![0xde, 0xad, 0xbe, 0xef]).with_filename("fixture.png"))
    }

    async fn destination_name(&self, destination: &DestinationId) -> Option<String> {
        self.names.lock().get(destination).cloned()
    }
}

/// Plain member message in a group.
pub fn member_message(dest: &str, sender: &str, body: &str) -> InboundEvent {
    InboundEvent::new(dest, sender, body).with_display_name("Test Member")
}

/// Message with attached media.
pub fn media_message(dest: &str, sender: &str, caption: &str) -> InboundEvent {
    InboundEvent::new(dest, sender, caption).with_media(MediaRef::new("mock-media-1"))
}

/// Extract the text body of an outbound message, panicking on media.
pub fn text_body(message: &OutboundMessage) -> &str {
    match message {
        OutboundMessage::Text { body, .. } => body,
        OutboundMessage::Media { .. } => panic!("expected text message, got media"),
    }
}

/// Principal list from string ids.
pub fn principals(ids: &[&str]) -> Vec<PrincipalId> {
    ids.iter().map(|id| PrincipalId::new(*id)).collect()
}

/// Destination list from string ids.
pub fn destinations(ids: &[&str]) -> Vec<DestinationId> {
    ids.iter().map(|id| DestinationId::new(*id)).collect()
}
