//! Relay configuration
//!
//! All runtime knobs are supplied once at startup and immutable afterwards:
//! the destination set, the authorized broadcaster, support contacts, the
//! dedup TTL, and persistence paths.

use crate::error::ConfigError;
use crate::types::{DestinationId, PrincipalId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default dedup retention in seconds
pub const DEFAULT_DEDUP_TTL_SECS: u64 = 60;

fn default_dedup_ttl_secs() -> u64 {
    DEFAULT_DEDUP_TTL_SECS
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("interactions.json")
}

/// Static relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Broadcast targets, visited in this order during fan-out
    pub destinations: Vec<DestinationId>,
    /// The single principal allowed to broadcast
    pub authorized_broadcaster: PrincipalId,
    /// Principals mentioned by the help command
    #[serde(default)]
    pub support_contacts: Vec<PrincipalId>,
    /// Dedup retention window in seconds
    #[serde(default = "default_dedup_ttl_secs")]
    pub dedup_ttl_secs: u64,
    /// Where the interaction ledger document lives
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,
    /// Where to snapshot the connected account identity, if anywhere
    #[serde(default)]
    pub identity_path: Option<PathBuf>,
}

impl RelayConfig {
    /// Minimal configuration: destinations plus the authorized broadcaster
    #[must_use]
    pub fn new(destinations: Vec<DestinationId>, authorized_broadcaster: PrincipalId) -> Self {
        Self {
            destinations,
            authorized_broadcaster,
            support_contacts: Vec::new(),
            dedup_ttl_secs: DEFAULT_DEDUP_TTL_SECS,
            ledger_path: default_ledger_path(),
            identity_path: None,
        }
    }

    /// Set support contacts
    #[inline]
    #[must_use]
    pub fn with_support_contacts(mut self, contacts: Vec<PrincipalId>) -> Self {
        self.support_contacts = contacts;
        self
    }

    /// Set the dedup TTL
    ///
    /// The config field has whole-second granularity: non-zero sub-second
    /// durations round up to one second rather than truncating to a window
    /// that never suppresses. A zero duration stays zero (suppression off).
    #[inline]
    #[must_use]
    pub fn with_dedup_ttl(mut self, ttl: Duration) -> Self {
        self.dedup_ttl_secs = if ttl.is_zero() {
            0
        } else {
            ttl.as_secs().max(1)
        };
        self
    }

    /// Set the ledger path
    #[inline]
    #[must_use]
    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    /// Set the identity snapshot path
    #[inline]
    #[must_use]
    pub fn with_identity_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.identity_path = Some(path.into());
        self
    }

    /// Dedup TTL as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn dedup_ttl(&self) -> Duration {
        Duration::from_secs(self.dedup_ttl_secs)
    }

    /// Whether the given destination is one of ours
    #[inline]
    #[must_use]
    pub fn is_configured_destination(&self, destination: &DestinationId) -> bool {
        self.destinations.contains(destination)
    }

    /// Whether the given principal is the authorized broadcaster
    #[inline]
    #[must_use]
    pub fn is_broadcaster(&self, principal: &PrincipalId) -> bool {
        &self.authorized_broadcaster == principal
    }

    /// Load configuration from a JSON document on disk
    ///
    /// # Errors
    /// - [`ConfigError::Unreadable`] if the file cannot be read
    /// - [`ConfigError::Invalid`] if it is not a valid config document
    /// - [`ConfigError::Rejected`] if it fails validation
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants
    ///
    /// # Errors
    /// [`ConfigError::Rejected`] if the destination set is empty or contains
    /// duplicates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.destinations.is_empty() {
            return Err(ConfigError::Rejected(
                "no destinations configured".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for dest in &self.destinations {
            if !seen.insert(dest) {
                return Err(ConfigError::Rejected(format!(
                    "duplicate destination: {dest}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_config() -> RelayConfig {
        RelayConfig::new(
            vec![DestinationId::new("g1"), DestinationId::new("g2")],
            PrincipalId::new("boss@c.us"),
        )
    }

    #[test]
    fn default_ttl_is_sixty_seconds() {
        let config = sample_config();
        assert_eq!(config.dedup_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn membership_checks() {
        let config = sample_config();
        assert!(config.is_configured_destination(&DestinationId::new("g1")));
        assert!(!config.is_configured_destination(&DestinationId::new("elsewhere")));
        assert!(config.is_broadcaster(&PrincipalId::new("boss@c.us")));
        assert!(!config.is_broadcaster(&PrincipalId::new("someone@c.us")));
    }

    #[test]
    fn sub_second_ttl_rounds_up_instead_of_vanishing() {
        let config = sample_config().with_dedup_ttl(Duration::from_millis(500));
        assert_eq!(config.dedup_ttl(), Duration::from_secs(1));

        // Whole seconds pass through, zero stays zero.
        let config = sample_config().with_dedup_ttl(Duration::from_secs(30));
        assert_eq!(config.dedup_ttl(), Duration::from_secs(30));
        let config = sample_config().with_dedup_ttl(Duration::ZERO);
        assert_eq!(config.dedup_ttl(), Duration::ZERO);
    }

    #[test]
    fn validate_rejects_empty_destinations() {
        let config = RelayConfig::new(vec![], PrincipalId::new("boss"));
        assert!(matches!(config.validate(), Err(ConfigError::Rejected(_))));
    }

    #[test]
    fn validate_rejects_duplicate_destinations() {
        let config = RelayConfig::new(
            vec![DestinationId::new("g1"), DestinationId::new("g1")],
            PrincipalId::new("boss"),
        );
        assert!(matches!(config.validate(), Err(ConfigError::Rejected(_))));
    }

    #[test]
    fn loads_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "destinations": ["g1", "g2"],
                "authorized_broadcaster": "boss@c.us",
                "support_contacts": ["help@c.us"],
                "dedup_ttl_secs": 30
            }}"#
        )
        .unwrap();

        let config = RelayConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.destinations.len(), 2);
        assert_eq!(config.dedup_ttl(), Duration::from_secs(30));
        assert_eq!(config.support_contacts.len(), 1);
        assert_eq!(config.ledger_path, PathBuf::from("interactions.json"));
        assert!(config.identity_path.is_none());
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = RelayConfig::from_json_file("/nonexistent/herald.json").unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn invalid_json_is_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = RelayConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
