//! Event classification
//!
//! Pure mapping from one inbound event plus static configuration to the set
//! of actions it triggers. The checks are independent, not mutually
//! exclusive: a single event can warrant a welcome check *and* a command.
//! Execution (ledger lookups, dedup, sends) happens in the engine; nothing
//! here touches state.

use crate::config::RelayConfig;
use crate::types::InboundEvent;

/// Broadcast command prefix
pub const SAY_PREFIX: &str = "!say ";
/// Help command literal
pub const HELP_COMMAND: &str = "!help";
/// Link command literal
pub const LINK_COMMAND: &str = "!link";
/// Command-list command literal
pub const COMMANDS_COMMAND: &str = "!comandos";

/// Informational commands answered with canned replies
///
/// Open to any sender in a configured destination; authorization applies
/// only to broadcasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoCommand {
    /// `!help`: support-contact mentions
    Help,
    /// `!link`: community links
    Link,
    /// `!comandos`: available commands
    Commands,
}

/// One action an inbound event triggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction {
    /// Consult the interaction ledger; welcome on first contact
    WelcomeCheck,
    /// Authorized text broadcast with the extracted payload
    BroadcastText(String),
    /// Authorized media broadcast (caption is the event body)
    BroadcastMedia,
    /// Canned informational reply
    Info(InfoCommand),
}

/// Classify one inbound event against the static configuration
///
/// Out-of-scope events (destination not configured) yield no actions at all.
/// In-scope events always include [`EventAction::WelcomeCheck`]; broadcast
/// actions additionally require the sender to be the authorized broadcaster.
#[must_use]
pub fn classify(event: &InboundEvent, config: &RelayConfig) -> Vec<EventAction> {
    if !config.is_configured_destination(&event.destination) {
        return Vec::new();
    }

    let mut actions = vec![EventAction::WelcomeCheck];
    let authorized = config.is_broadcaster(&event.sender);

    if authorized {
        if let Some(rest) = event.body.strip_prefix(SAY_PREFIX) {
            actions.push(EventAction::BroadcastText(rest.trim().to_string()));
        }
        if event.media.is_some() {
            actions.push(EventAction::BroadcastMedia);
        }
    }

    match event.body.as_str() {
        HELP_COMMAND => actions.push(EventAction::Info(InfoCommand::Help)),
        LINK_COMMAND => actions.push(EventAction::Info(InfoCommand::Link)),
        COMMANDS_COMMAND => actions.push(EventAction::Info(InfoCommand::Commands)),
        _ => {}
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DestinationId, MediaRef, PrincipalId};

    fn config() -> RelayConfig {
        RelayConfig::new(
            vec![DestinationId::new("g1"), DestinationId::new("g2")],
            PrincipalId::new("boss@c.us"),
        )
    }

    #[test]
    fn out_of_scope_event_yields_nothing() {
        let event = InboundEvent::new("elsewhere", "boss@c.us", "!say hello");
        assert!(classify(&event, &config()).is_empty());
    }

    #[test]
    fn plain_message_yields_welcome_check_only() {
        let event = InboundEvent::new("g1", "member@c.us", "good morning");
        assert_eq!(classify(&event, &config()), vec![EventAction::WelcomeCheck]);
    }

    #[test]
    fn authorized_say_extracts_trimmed_payload() {
        let event = InboundEvent::new("g1", "boss@c.us", "!say   hello world  ");
        let actions = classify(&event, &config());

        assert!(actions.contains(&EventAction::BroadcastText("hello world".to_string())));
    }

    #[test]
    fn say_without_trailing_space_is_not_a_broadcast() {
        let event = InboundEvent::new("g1", "boss@c.us", "!sayhello");
        let actions = classify(&event, &config());
        assert!(!actions
            .iter()
            .any(|a| matches!(a, EventAction::BroadcastText(_))));
    }

    #[test]
    fn unauthorized_say_is_ignored_but_event_still_evaluated() {
        let event = InboundEvent::new("g1", "member@c.us", "!say test");
        let actions = classify(&event, &config());

        assert_eq!(actions, vec![EventAction::WelcomeCheck]);
    }

    #[test]
    fn authorized_media_triggers_media_broadcast() {
        let event = InboundEvent::new("g1", "boss@c.us", "caption text")
            .with_media(MediaRef::new("media-1"));
        let actions = classify(&event, &config());

        assert!(actions.contains(&EventAction::BroadcastMedia));
    }

    #[test]
    fn unauthorized_media_is_ignored() {
        let event =
            InboundEvent::new("g1", "member@c.us", "look").with_media(MediaRef::new("media-1"));
        let actions = classify(&event, &config());

        assert!(!actions.contains(&EventAction::BroadcastMedia));
    }

    #[test]
    fn info_commands_match_exactly() {
        let cfg = config();

        let help = InboundEvent::new("g1", "member@c.us", "!help");
        assert!(classify(&help, &cfg).contains(&EventAction::Info(InfoCommand::Help)));

        let link = InboundEvent::new("g1", "member@c.us", "!link");
        assert!(classify(&link, &cfg).contains(&EventAction::Info(InfoCommand::Link)));

        let commands = InboundEvent::new("g1", "member@c.us", "!comandos");
        assert!(classify(&commands, &cfg).contains(&EventAction::Info(InfoCommand::Commands)));

        // Trailing text defeats exact matching.
        let almost = InboundEvent::new("g1", "member@c.us", "!help me");
        assert!(!classify(&almost, &cfg)
            .iter()
            .any(|a| matches!(a, EventAction::Info(_))));
    }

    #[test]
    fn one_event_can_trigger_welcome_and_command() {
        let event = InboundEvent::new("g1", "member@c.us", "!help");
        let actions = classify(&event, &config());

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], EventAction::WelcomeCheck);
        assert_eq!(actions[1], EventAction::Info(InfoCommand::Help));
    }

    #[test]
    fn broadcaster_media_with_say_caption_triggers_both_broadcasts() {
        // Matches the source semantics: the checks run independently.
        let event = InboundEvent::new("g1", "boss@c.us", "!say promo")
            .with_media(MediaRef::new("media-1"));
        let actions = classify(&event, &config());

        assert!(actions.contains(&EventAction::BroadcastText("promo".to_string())));
        assert!(actions.contains(&EventAction::BroadcastMedia));
    }
}
