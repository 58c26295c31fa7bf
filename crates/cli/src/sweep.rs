//! Snapshot restore and eviction sweep.

use respcache_core::{Error, ResponseCache};
use serde_json::Value;

use crate::args::Args;

/// Counts from a single sweep.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub loaded: usize,
    pub expired: usize,
    pub signed: usize,
}

/// Load a JSON object of `key -> value` into the raw store.
///
/// Entries are restored, not written, so rewriters do not run.
pub fn restore(cache: &mut ResponseCache, input: &str) -> Result<usize, Error> {
    let Value::Object(entries) = serde_json::from_str::<Value>(input)? else {
        return Err(Error::InvalidInput("snapshot must be a JSON object of key to value".to_string()));
    };
    let loaded = entries.len();
    cache.raw_mut().extend(entries);
    Ok(loaded)
}

/// Restore `input` and run the sweeps selected by `args`.
pub fn run(cache: &mut ResponseCache, input: &str, args: &Args) -> Result<Report, Error> {
    let loaded = restore(cache, input)?;
    let expired = match args.now {
        Some(now) => cache.flush_expired_at(now),
        None => cache.flush_expired(),
    };
    let signed = if args.signed { cache.flush_signed() } else { 0 };
    Ok(Report { loaded, expired, signed })
}
