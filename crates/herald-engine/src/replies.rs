//! Canned reply text
//!
//! Fixed reply bodies for the welcome path and the informational commands.
//! Support contacts and destination names come from configuration and the
//! transport; the surrounding text is deliberately code, not config.

use herald_core::{OutboundMessage, PrincipalId};

/// Links sent by `!link`
pub const LINKS_REPLY: &str =
    "*Discord:* https://discord.gg/herald\n*Community:* https://community.herald.example/join";

/// Command list sent by `!comandos`
pub const COMMANDS_REPLY: &str = "Available commands:\n\n!link\n!help\n!comandos\n!say";

/// Welcome text for a first-time participant
#[must_use]
pub fn welcome(display_name: &str, destination_name: &str) -> OutboundMessage {
    OutboundMessage::text(format!(
        "Hello, {display_name}! Welcome to \"{destination_name}\" \u{1F60A}"
    ))
}

/// Help text mentioning the configured support contacts
#[must_use]
pub fn help(support_contacts: &[PrincipalId]) -> OutboundMessage {
    let mention_text = support_contacts
        .iter()
        .map(|contact| format!("@{}", contact.handle()))
        .collect::<Vec<_>>()
        .join(" ");

    OutboundMessage::text_with_mentions(
        format!("Need help? Contact:\n{mention_text}"),
        support_contacts.to_vec(),
    )
}

/// Community links reply
#[must_use]
pub fn links() -> OutboundMessage {
    OutboundMessage::text(LINKS_REPLY)
}

/// Available-commands reply
#[must_use]
pub fn commands() -> OutboundMessage {
    OutboundMessage::text(COMMANDS_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_includes_both_names() {
        let message = welcome("Ana", "Herald HQ");
        match message {
            OutboundMessage::Text { body, mentions } => {
                assert!(body.contains("Ana"));
                assert!(body.contains("Herald HQ"));
                assert!(mentions.is_empty());
            }
            OutboundMessage::Media { .. } => panic!("welcome is text"),
        }
    }

    #[test]
    fn help_mentions_each_contact_by_handle() {
        let contacts = vec![
            PrincipalId::new("5522998680482@c.us"),
            PrincipalId::new("5545999162624@c.us"),
        ];
        let message = help(&contacts);

        match message {
            OutboundMessage::Text { body, mentions } => {
                assert!(body.contains("@5522998680482"));
                assert!(body.contains("@5545999162624"));
                assert_eq!(mentions, contacts);
            }
            OutboundMessage::Media { .. } => panic!("help is text"),
        }
    }

    #[test]
    fn commands_reply_lists_the_broadcast_command() {
        assert!(COMMANDS_REPLY.contains("!say"));
    }
}
