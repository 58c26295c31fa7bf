//! Bulk eviction.
//!
//! Provides the purge and flush strategies the application runs on
//! lifecycle events (login, logout, resume). Each returns the number of
//! removed entries.

use chrono::{DateTime, Utc};

use super::entry::entry_time;
use super::handle::ResponseCache;

/// Query fragments that mark a key as signed (`_user=<token>`).
const SIGNED_MARKERS: [&str; 2] = ["?_user=", "&_user="];

/// Whether `key` carries a `_user=<token>` parameter for any token.
///
/// Matches `?_user=` or `&_user=` anywhere in the key, so malformed URLs
/// with extra `?` separators still count as signed.
pub fn is_signed(key: &str) -> bool {
    SIGNED_MARKERS.iter().any(|marker| key.contains(marker))
}

impl ResponseCache {
    /// Delete every entry whose key matches `filter`.
    pub fn purge(&mut self, mut filter: impl FnMut(&str) -> bool) -> usize {
        let before = self.store.len();
        self.store.retain(|key, _| !filter(key.as_str()));
        let removed = before - self.store.len();
        tracing::debug!(removed, "purged cache entries");
        removed
    }

    /// Delete everything.
    pub fn purge_all(&mut self) -> usize {
        self.purge(|_| true)
    }

    /// Delete every signed entry, for any user token.
    ///
    /// Does nothing unless the session reports a logged-in user with a token.
    pub fn flush_signed(&mut self) -> usize {
        if !self.session.logged_in() || self.session.token().is_none() {
            tracing::debug!("no active session, skipping signed flush");
            return 0;
        }
        let before = self.store.len();
        self.store.retain(|key, _| !is_signed(key));
        let removed = before - self.store.len();
        tracing::debug!(removed, "flushed signed cache entries");
        removed
    }

    /// Delete entries older than their whitelist TTL.
    pub fn flush_expired(&mut self) -> usize {
        self.flush_expired_at(Utc::now())
    }

    /// Delete entries that have outlived their TTL as of `now`.
    ///
    /// Entries without a `__time` stamp or without a matching TTL are kept.
    pub fn flush_expired_at(&mut self, now: DateTime<Utc>) -> usize {
        let now_ms = now.timestamp_millis();
        let expired: Vec<String> = self
            .store
            .iter()
            .filter(|(key, value)| match (entry_time(value), self.get_ttl_ms(key)) {
                (Some(written), Some(ttl)) => now_ms.saturating_sub(written) > ttl,
                _ => false,
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.store.remove(key);
        }
        tracing::debug!(removed = expired.len(), "flushed expired cache entries");
        expired.len()
    }
}
