//! Relay service: the command router and its host-facing surface
//!
//! Owns the configuration, dedup window, interaction ledger, and fan-out
//! dispatcher, all constructed at startup and passed by handle — no ambient
//! singletons. One entry point per inbound event plus two lifecycle hooks.
//! No failure inside one event's handling escapes to the host or affects the
//! next event.

use crate::dispatch::FanoutDispatcher;
use crate::replies;
use herald_core::{
    classify, AccountIdentity, BroadcastRequest, DedupWindow, DispatchReport, EventAction,
    Fingerprint, InboundEvent, InfoCommand, OutboundMessage, RelayConfig, Transport,
};
use herald_ledger::{InteractionLedger, JsonFileStore};
use std::sync::Arc;

/// What one event's handling actually did
///
/// Produced for observability and tests; the host may ignore it.
#[derive(Debug, Default)]
pub struct EventReport {
    /// Event originated outside the configured destinations
    pub ignored: bool,
    /// A first contact was recorded and a welcome attempted
    pub welcomed: bool,
    /// A text broadcast was suppressed as a duplicate
    pub suppressed_duplicate: bool,
    /// Fan-out reports, one per broadcast this event triggered
    pub broadcasts: Vec<DispatchReport>,
    /// Canned replies successfully sent
    pub replies_sent: usize,
}

/// The broadcast relay engine
#[derive(Debug)]
pub struct RelayService {
    config: RelayConfig,
    transport: Arc<dyn Transport>,
    dedup: DedupWindow,
    ledger: InteractionLedger,
    dispatcher: FanoutDispatcher,
}

impl RelayService {
    /// Service over an already-loaded ledger
    #[must_use]
    pub fn new(config: RelayConfig, transport: Arc<dyn Transport>, ledger: InteractionLedger) -> Self {
        let dedup = DedupWindow::new(config.dedup_ttl());
        let dispatcher = FanoutDispatcher::new(transport.clone());
        Self {
            config,
            transport,
            dedup,
            ledger,
            dispatcher,
        }
    }

    /// Service with the ledger loaded from the configured JSON document
    ///
    /// A missing or corrupt ledger document is logged and treated as empty;
    /// startup never fails here.
    pub async fn start(config: RelayConfig, transport: Arc<dyn Transport>) -> Self {
        let store = Arc::new(JsonFileStore::new(&config.ledger_path));
        let ledger = InteractionLedger::load(store).await;
        Self::new(config, transport, ledger)
    }

    /// Handle one inbound event
    ///
    /// Classifies the event once, then runs every triggered action. Each
    /// action's failure is logged with context and contained here; the host
    /// always gets a report back, never an error.
    pub async fn handle_event(&self, event: &InboundEvent) -> EventReport {
        let mut report = EventReport::default();

        let actions = classify(event, &self.config);
        if actions.is_empty() {
            tracing::debug!(
                destination = %event.destination,
                sender = %event.sender,
                "event outside configured destinations, ignoring"
            );
            report.ignored = true;
            return report;
        }

        for action in actions {
            match action {
                EventAction::WelcomeCheck => self.run_welcome_check(event, &mut report).await,
                EventAction::BroadcastText(text) => {
                    self.run_text_broadcast(event, text, &mut report).await;
                }
                EventAction::BroadcastMedia => {
                    self.run_media_broadcast(event, &mut report).await;
                }
                EventAction::Info(command) => self.run_info_command(event, command, &mut report).await,
            }
        }

        report
    }

    /// Session-ready hook: snapshot the connected account identity
    ///
    /// Peripheral bookkeeping; a failed snapshot is logged and swallowed.
    pub async fn on_session_ready(&self, identity: &AccountIdentity) {
        tracing::info!(principal = %identity.principal, "session ready");

        let Some(path) = &self.config.identity_path else {
            return;
        };

        let result = match serde_json::to_string_pretty(identity) {
            Ok(raw) => tokio::fs::write(path, raw.as_bytes())
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "identity snapshot failed");
        }
    }

    /// Disconnect hook: log-only
    pub fn on_disconnected(&self) {
        tracing::warn!("session disconnected, awaiting re-authentication");
    }

    /// Static configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// The interaction ledger
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &InteractionLedger {
        &self.ledger
    }

    /// The dedup window
    #[inline]
    #[must_use]
    pub fn dedup(&self) -> &DedupWindow {
        &self.dedup
    }

    async fn run_welcome_check(&self, event: &InboundEvent, report: &mut EventReport) {
        let first_contact = self
            .ledger
            .record_interaction(&event.destination, &event.sender)
            .await;
        if !first_contact {
            return;
        }
        report.welcomed = true;

        let destination_name = self
            .transport
            .destination_name(&event.destination)
            .await
            .unwrap_or_else(|| event.destination.to_string());
        let message = replies::welcome(event.display_name_or_default(), &destination_name);

        match self.transport.send(&event.destination, &message).await {
            Ok(()) => tracing::info!(
                destination = %event.destination,
                sender = %event.sender,
                "welcome sent"
            ),
            Err(e) => tracing::warn!(
                destination = %event.destination,
                sender = %event.sender,
                error = %e,
                "welcome send failed"
            ),
        }
    }

    async fn run_text_broadcast(&self, event: &InboundEvent, text: String, report: &mut EventReport) {
        let fingerprint = Fingerprint::of_text(text.clone());
        if self.dedup.suppress_or_record(fingerprint) {
            tracing::info!(sender = %event.sender, "duplicate broadcast suppressed");
            report.suppressed_duplicate = true;
            return;
        }

        let request = BroadcastRequest::new(OutboundMessage::text(text), event.sender.clone());
        tracing::info!(
            origin = %request.origin,
            requested_at = %request.requested_at,
            destinations = self.config.destinations.len(),
            "text broadcast accepted"
        );

        let dispatch = self
            .dispatcher
            .broadcast(&request.payload, &self.config.destinations)
            .await;
        report.broadcasts.push(dispatch);
    }

    async fn run_media_broadcast(&self, event: &InboundEvent, report: &mut EventReport) {
        // Classification only emits this action when media is attached.
        let Some(media_ref) = &event.media else {
            return;
        };

        let media = match self.transport.fetch_media(media_ref).await {
            Ok(media) => media,
            Err(e) => {
                tracing::warn!(sender = %event.sender, error = %e, "media fetch failed, broadcast dropped");
                return;
            }
        };

        let request = BroadcastRequest::new(
            OutboundMessage::media(media, event.body.clone()),
            event.sender.clone(),
        );
        tracing::info!(
            origin = %request.origin,
            destinations = self.config.destinations.len(),
            "media broadcast accepted"
        );

        let dispatch = self
            .dispatcher
            .broadcast(&request.payload, &self.config.destinations)
            .await;
        report.broadcasts.push(dispatch);
    }

    async fn run_info_command(
        &self,
        event: &InboundEvent,
        command: InfoCommand,
        report: &mut EventReport,
    ) {
        let message = match command {
            InfoCommand::Help => replies::help(&self.config.support_contacts),
            InfoCommand::Link => replies::links(),
            InfoCommand::Commands => replies::commands(),
        };

        match self.transport.send(&event.destination, &message).await {
            Ok(()) => {
                tracing::info!(destination = %event.destination, command = ?command, "reply sent");
                report.replies_sent += 1;
            }
            Err(e) => tracing::warn!(
                destination = %event.destination,
                command = ?command,
                error = %e,
                "reply send failed"
            ),
        }
    }
}
