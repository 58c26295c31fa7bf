//! The cache handle and its basic accessors.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::entry::RawStore;
use super::rewrite::{RewriteChain, Rewriter};
use crate::Error;
use crate::provider::{SessionProvider, SettingsProvider};

/// In-memory response cache keyed by request URL.
///
/// Owns the store and the rewriter chain, and holds shared handles to the
/// settings and session providers. Construct one at startup and pass it by
/// reference; every mutating operation takes `&mut self`.
pub struct ResponseCache {
    pub(crate) store: RawStore,
    pub(crate) rewriters: RewriteChain,
    pub(crate) settings: Arc<dyn SettingsProvider>,
    pub(crate) session: Arc<dyn SessionProvider>,
}

impl ResponseCache {
    /// Create an empty cache with no rewriters.
    pub fn new(settings: Arc<dyn SettingsProvider>, session: Arc<dyn SessionProvider>) -> Self {
        Self { store: RawStore::new(), rewriters: RewriteChain::new(), settings, session }
    }

    /// Register a rewriter, builder style.
    pub fn with_rewriter(mut self, rewriter: impl Rewriter + 'static) -> Self {
        self.rewriters.push(rewriter);
        self
    }

    /// Register a rewriter after all existing ones.
    pub fn push_rewriter(&mut self, rewriter: impl Rewriter + 'static) {
        self.rewriters.push(rewriter);
    }

    pub fn has(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Look up a value. Reading never refreshes expiry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.store.get(key)
    }

    /// Remove an entry, returning it if it was present.
    pub fn bust(&mut self, key: &str) -> Option<Value> {
        self.store.remove(key)
    }

    /// Store `value` under `key` after running the rewrite pipeline.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a rewriter; the write is then
    /// aborted. Side effects a rewriter already applied to the raw store
    /// are kept.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), Error> {
        let key = key.into();
        if let Some(value) = self.rewriters.apply(&key, value, &mut self.store)? {
            self.store.insert(key, value);
        }
        Ok(())
    }

    /// The live backing map.
    pub fn raw(&self) -> &RawStore {
        &self.store
    }

    /// Mutable access to the backing map. Writes here skip the rewriters.
    pub fn raw_mut(&mut self) -> &mut RawStore {
        &mut self.store
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.store.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.store.len())
            .field("rewriters", &self.rewriters.len())
            .finish_non_exhaustive()
    }
}
