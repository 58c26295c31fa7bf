//! Retroactive rewrites of stored entries.
//!
//! Used to migrate cached data in small batches, e.g. after an upgrade
//! changes the shape of a response. Unlike `set`, this does not go through
//! the rewriter chain.

use serde_json::Value;

use super::handle::ResponseCache;

impl ResponseCache {
    /// Replace the value of up to `limit` entries whose key matches.
    ///
    /// Keys are visited in ascending order, so a limited run always picks
    /// the same entries for the same store. `None` means no limit.
    /// Returns the number of rewritten entries.
    pub fn attempt_rewrite(
        &mut self, mut matches: impl FnMut(&str) -> bool, mut rewrite: impl FnMut(&Value, &str) -> Value,
        limit: Option<usize>,
    ) -> usize {
        let limit = limit.unwrap_or(usize::MAX);
        let mut rewritten = 0;
        for (key, value) in self.store.iter_mut() {
            if rewritten >= limit {
                break;
            }
            if !matches(key.as_str()) {
                continue;
            }
            *value = rewrite(&*value, key.as_str());
            rewritten += 1;
        }
        tracing::debug!(rewritten, "rewrote stored cache entries");
        rewritten
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::rewrite::{Rewrite, from_fn};
    use crate::config::AppConfig;
    use crate::provider::Anonymous;
    use serde_json::json;
    use std::sync::Arc;

    fn make_cache() -> ResponseCache {
        ResponseCache::new(Arc::new(AppConfig::default()), Arc::new(Anonymous))
    }

    #[test]
    fn test_attempt_rewrite() {
        let mut cache = make_cache();
        for suffix in ["foo", "rewrite", "bar"] {
            cache.set(format!("test3:{suffix}"), json!("poop")).unwrap();
        }

        let count = cache.attempt_rewrite(
            |key| key.contains("rewrite"),
            |_value, key| {
                assert_eq!(key, "test3:rewrite");
                json!("not poop")
            },
            None,
        );

        assert_eq!(count, 1);
        assert_eq!(cache.get("test3:foo"), Some(&json!("poop")));
        assert_eq!(cache.get("test3:bar"), Some(&json!("poop")));
        assert_eq!(cache.get("test3:rewrite"), Some(&json!("not poop")));
    }

    #[test]
    fn test_attempt_rewrite_limit() {
        let mut cache = make_cache();
        for suffix in ["foo", "abc", "bar"] {
            cache.set(format!("test4:{suffix}"), json!("poop")).unwrap();
        }

        let count = cache.attempt_rewrite(|_| true, |_, _| json!("rewritten"), Some(2));
        assert_eq!(count, 2);
        assert_eq!(cache.len(), 3);

        let rewritten = cache.raw().values().filter(|v| *v == &json!("rewritten")).count();
        assert_eq!(rewritten, 2);
    }

    #[test]
    fn test_attempt_rewrite_limit_is_deterministic() {
        let mut first = make_cache();
        let mut second = make_cache();
        for key in ["test4:foo", "test4:abc", "test4:bar"] {
            first.set(key, json!("poop")).unwrap();
        }
        for key in ["test4:bar", "test4:foo", "test4:abc"] {
            second.set(key, json!("poop")).unwrap();
        }

        first.attempt_rewrite(|_| true, |_, _| json!("rewritten"), Some(2));
        second.attempt_rewrite(|_| true, |_, _| json!("rewritten"), Some(2));
        assert_eq!(first.raw(), second.raw());
        assert_eq!(first.get("test4:foo"), Some(&json!("poop")));
    }

    #[test]
    fn test_attempt_rewrite_zero_limit() {
        let mut cache = make_cache();
        cache.set("test5:foo", json!("poop")).unwrap();
        assert_eq!(cache.attempt_rewrite(|_| true, |_, _| json!("rewritten"), Some(0)), 0);
        assert_eq!(cache.get("test5:foo"), Some(&json!("poop")));
    }

    #[test]
    fn test_attempt_rewrite_uses_current_value() {
        let mut cache = make_cache();
        cache.set("test6:count", json!(41)).unwrap();
        cache.attempt_rewrite(|_| true, |value, _| json!(value.as_i64().unwrap_or_default() + 1), None);
        assert_eq!(cache.get("test6:count"), Some(&json!(42)));
    }

    #[test]
    fn test_attempt_rewrite_skips_rewriters() {
        let mut cache = make_cache().with_rewriter(from_fn(|_key, _value, _store| Ok(Rewrite::Ignore)));
        cache.raw_mut().insert("test7:foo".into(), json!("poop"));

        cache.attempt_rewrite(|_| true, |_, _| json!("rewritten"), None);
        assert_eq!(cache.get("test7:foo"), Some(&json!("rewritten")));
    }
}
