//! Core types and shared functionality for respcache.
//!
//! This crate provides:
//! - In-memory response cache with a write-time rewrite pipeline
//! - Whitelist-driven TTL policy and bulk eviction
//! - Settings and session provider interfaces
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod provider;

pub use cache::{RawStore, ResponseCache, Rewrite, Rewriter};
pub use config::AppConfig;
pub use error::Error;
pub use provider::{Anonymous, SessionProvider, SettingsProvider, StaticSession};
