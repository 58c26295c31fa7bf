//! Interfaces to the collaborators the cache reads from.
//!
//! The cache never loads settings or manages logins itself. It asks a
//! [`SettingsProvider`] for the offline whitelist and a [`SessionProvider`]
//! for the current login state.

use std::collections::BTreeMap;

/// Query parameter that binds a request URL to a user session.
pub const SIGNED_PARAM: &str = "_user";

/// Read-only view of the offline caching settings.
pub trait SettingsProvider: Send + Sync {
    /// Whether offline caching is enabled at all.
    fn offline_cache_enabled(&self) -> bool;

    /// Mapping from URL-path fragment to TTL in seconds.
    fn offline_cache_whitelist(&self) -> &BTreeMap<String, u64>;
}

/// Read-only view of the current user session.
pub trait SessionProvider: Send + Sync {
    fn logged_in(&self) -> bool;

    /// Opaque token embedded in signed URLs as `_user=<token>`.
    fn token(&self) -> Option<String>;
}

/// A session that is never logged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl SessionProvider for Anonymous {
    fn logged_in(&self) -> bool {
        false
    }

    fn token(&self) -> Option<String> {
        None
    }
}

/// A session with a fixed token, logged in whenever a token is present.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: Some(token.into()) }
    }

    pub fn logged_out() -> Self {
        Self { token: None }
    }

    /// Append `_user=<token>` to `url`, picking `?` or `&` as needed.
    ///
    /// Returns the URL unchanged when there is no token.
    pub fn sign(&self, url: &str) -> String {
        match &self.token {
            Some(token) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{url}{sep}{SIGNED_PARAM}={token}")
            }
            None => url.to_string(),
        }
    }
}

impl SessionProvider for StaticSession {
    fn logged_in(&self) -> bool {
        self.token.is_some()
    }

    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}
