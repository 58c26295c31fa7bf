//! In-memory response cache keyed by request URL.
//!
//! This module provides a synchronous key/value cache for API responses.
//! It supports:
//!
//! - A write-time rewrite pipeline that can transform, redirect, or veto writes
//! - TTLs derived from a URL-fragment whitelist
//! - Multiple eviction strategies (filtered purge, signed-session flush, expiry flush)
//! - Throttled retroactive rewrites for migrating stored data

pub mod entry;
pub mod eviction;
pub mod handle;
pub mod migrate;
pub mod rewrite;
pub mod ttl;

pub use crate::Error;

pub use entry::{RawStore, TIME_FIELD, entry_time, stamp, stamp_at};
pub use eviction::is_signed;
pub use handle::ResponseCache;
pub use rewrite::{Rewrite, RewriteChain, Rewriter};
