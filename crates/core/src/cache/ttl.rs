//! Whitelist-driven TTL policy.
//!
//! A key's TTL is looked up on demand, never stored. A key is covered by a
//! whitelist fragment when the fragment appears anywhere in the key. If more
//! than one fragment matches, the longest wins; equal lengths resolve to the
//! lexicographically smallest fragment.

use std::collections::BTreeMap;

use chrono::Duration;

use super::handle::ResponseCache;

/// Largest TTL a [`Duration`] can hold; longer whitelist values are clamped.
const MAX_TTL_SECONDS: i64 = i64::MAX / 1000;

/// Find the whitelist entry covering `key`.
pub fn matching_fragment<'a>(whitelist: &'a BTreeMap<String, u64>, key: &str) -> Option<(&'a str, u64)> {
    whitelist
        .iter()
        .filter(|(fragment, _)| key.contains(fragment.as_str()))
        .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
        .map(|(fragment, ttl)| (fragment.as_str(), *ttl))
}

impl ResponseCache {
    /// TTL for `key`, or `None` when offline caching is off or no fragment matches.
    pub fn get_ttl(&self, key: &str) -> Option<Duration> {
        if !self.settings.offline_cache_enabled() {
            return None;
        }
        let (_, seconds) = matching_fragment(self.settings.offline_cache_whitelist(), key)?;
        Some(Duration::seconds(i64::try_from(seconds).unwrap_or(i64::MAX).min(MAX_TTL_SECONDS)))
    }

    /// [`get_ttl`](Self::get_ttl) in milliseconds.
    pub fn get_ttl_ms(&self, key: &str) -> Option<i64> {
        self.get_ttl(key).map(|ttl| ttl.num_milliseconds())
    }
}
