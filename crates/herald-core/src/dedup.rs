//! Dedup window: short-lived memory of recently broadcast text
//!
//! Suppresses accidental re-sends of identical broadcast text within a
//! retention window. Process-local only: entries expire lazily on lookup and
//! the whole window resets on restart. Media payloads are not fingerprinted.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Derived key for duplicate detection: the exact broadcast text
///
/// Case- and whitespace-sensitive by design; two broadcasts are duplicates
/// only when their extracted payload text matches exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint of a broadcast text payload
    #[inline]
    #[must_use]
    pub fn of_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The fingerprinted text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Recently-broadcast fingerprints with per-entry expiry
///
/// Never fails and never blocks on I/O; the inner lock is held only for map
/// operations.
#[derive(Debug)]
pub struct DedupWindow {
    ttl: Duration,
    entries: Mutex<HashMap<Fingerprint, Instant>>,
}

impl DedupWindow {
    /// Window with the given retention period
    #[inline]
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Retention period applied to recorded fingerprints
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether this fingerprint was broadcast within the retention window
    ///
    /// Expired entries are treated as absent and evicted on the way out.
    #[must_use]
    pub fn should_suppress(&self, fingerprint: &Fingerprint) -> bool {
        self.should_suppress_at(fingerprint, Instant::now())
    }

    /// Remember this fingerprint until the TTL elapses
    ///
    /// Overwrites any existing entry, restarting its clock.
    pub fn record(&self, fingerprint: Fingerprint) {
        self.record_at(fingerprint, Instant::now());
    }

    /// Atomic check-then-record under a single lock acquisition
    ///
    /// Returns `true` if the fingerprint was already live (caller should
    /// suppress), `false` if it was absent or expired and has now been
    /// recorded. Two concurrent identical broadcasts cannot both get `false`.
    pub fn suppress_or_record(&self, fingerprint: Fingerprint) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        match entries.get(&fingerprint) {
            Some(expiry) if *expiry > now => true,
            _ => {
                entries.insert(fingerprint, now + self.ttl);
                false
            }
        }
    }

    /// Live entry count (expired entries may still be counted until touched)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the window holds no entries at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    fn should_suppress_at(&self, fingerprint: &Fingerprint, now: Instant) -> bool {
        let mut entries = self.entries.lock();
        match entries.get(fingerprint) {
            Some(expiry) if *expiry > now => true,
            Some(_) => {
                // Lazy eviction: expired means absent.
                entries.remove(fingerprint);
                false
            }
            None => false,
        }
    }

    fn record_at(&self, fingerprint: Fingerprint, now: Instant) {
        self.entries.lock().insert(fingerprint, now + self.ttl);
    }
}

impl Default for DedupWindow {
    /// Window with the default 60-second retention
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_DEDUP_TTL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_then_suppress() {
        let window = DedupWindow::new(Duration::from_secs(60));
        let fp = Fingerprint::of_text("hello world");

        assert!(!window.should_suppress(&fp));
        window.record(fp.clone());
        assert!(window.should_suppress(&fp));
    }

    #[test]
    fn expired_entry_is_absent_and_evicted() {
        let window = DedupWindow::new(Duration::from_secs(10));
        let fp = Fingerprint::of_text("hello");
        let start = Instant::now();

        window.record_at(fp.clone(), start);
        assert!(window.should_suppress_at(&fp, start + Duration::from_secs(9)));
        assert!(!window.should_suppress_at(&fp, start + Duration::from_secs(11)));
        // Lazy eviction removed the entry on that lookup.
        assert!(window.is_empty());
    }

    #[test]
    fn fingerprints_are_case_and_whitespace_sensitive() {
        let window = DedupWindow::new(Duration::from_secs(60));
        window.record(Fingerprint::of_text("Hello"));

        assert!(!window.should_suppress(&Fingerprint::of_text("hello")));
        assert!(!window.should_suppress(&Fingerprint::of_text("Hello ")));
        assert!(window.should_suppress(&Fingerprint::of_text("Hello")));
    }

    #[test]
    fn suppress_or_record_is_first_pass_wins() {
        let window = DedupWindow::new(Duration::from_secs(60));
        let fp = Fingerprint::of_text("announcement");

        assert!(!window.suppress_or_record(fp.clone()));
        assert!(window.suppress_or_record(fp.clone()));
        assert!(window.suppress_or_record(fp));
    }

    #[test]
    fn suppress_or_record_revives_expired_entry() {
        let window = DedupWindow::new(Duration::from_millis(0));
        let fp = Fingerprint::of_text("announcement");

        // TTL zero: every entry is born expired, so nothing suppresses.
        assert!(!window.suppress_or_record(fp.clone()));
        assert!(!window.suppress_or_record(fp));
    }

    #[test]
    fn record_overwrites_and_restarts_clock() {
        let window = DedupWindow::new(Duration::from_secs(10));
        let fp = Fingerprint::of_text("x");
        let start = Instant::now();

        window.record_at(fp.clone(), start);
        window.record_at(fp.clone(), start + Duration::from_secs(8));
        // Still live past the first entry's expiry.
        assert!(window.should_suppress_at(&fp, start + Duration::from_secs(15)));
    }
}
