//! Write-time rewrite pipeline.
//!
//! Every [`ResponseCache::set`](super::ResponseCache::set) runs its value
//! through the registered rewriters in registration order. Each rewriter sees
//! the output of the previous one and may replace the value, pass it through,
//! or veto the write. Rewriters also get the raw store, so they can redirect
//! data to a related key and then ignore the original write.

use std::fmt;

use serde_json::Value;

use super::entry::RawStore;
use crate::Error;

/// Outcome of a single rewriter.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Store this value instead; later rewriters receive it as input.
    Replace(Value),
    /// Leave the value as it is.
    Passthrough,
    /// Abort the write. Nothing is stored under the original key.
    Ignore,
}

/// A write interceptor.
///
/// Implemented for every `Fn(&str, &Value, &mut RawStore) -> Result<Rewrite, Error>`.
/// Returning `Err` aborts the write and propagates to the caller of `set`.
pub trait Rewriter: Send + Sync {
    fn rewrite(&self, key: &str, value: &Value, store: &mut RawStore) -> Result<Rewrite, Error>;
}

impl<F> Rewriter for F
where
    F: Fn(&str, &Value, &mut RawStore) -> Result<Rewrite, Error> + Send + Sync,
{
    fn rewrite(&self, key: &str, value: &Value, store: &mut RawStore) -> Result<Rewrite, Error> {
        self(key, value, store)
    }
}

/// Pin a closure to the rewriter signature so its argument types are inferred.
pub fn from_fn<F>(f: F) -> F
where
    F: Fn(&str, &Value, &mut RawStore) -> Result<Rewrite, Error> + Send + Sync,
{
    f
}

/// Ordered list of rewriters.
#[derive(Default)]
pub struct RewriteChain {
    rewriters: Vec<Box<dyn Rewriter>>,
}

impl RewriteChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rewriter; it runs after every rewriter already registered.
    pub fn push(&mut self, rewriter: impl Rewriter + 'static) {
        self.rewriters.push(Box::new(rewriter));
    }

    pub(crate) fn len(&self) -> usize {
        self.rewriters.len()
    }

    /// Run `value` through the chain.
    ///
    /// Returns `Ok(None)` when a rewriter ignored the write, otherwise the
    /// value to store under `key`.
    pub fn apply(&self, key: &str, value: Value, store: &mut RawStore) -> Result<Option<Value>, Error> {
        let mut current = value;
        for (index, rewriter) in self.rewriters.iter().enumerate() {
            match rewriter.rewrite(key, &current, store)? {
                Rewrite::Replace(next) => current = next,
                Rewrite::Passthrough => {}
                Rewrite::Ignore => {
                    tracing::trace!(key, rewriter = index, "write ignored by rewriter");
                    return Ok(None);
                }
            }
        }
        Ok(Some(current))
    }
}

impl fmt::Debug for RewriteChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteChain").field("len", &self.len()).finish()
    }
}
