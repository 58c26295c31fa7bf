//! Raw store and entry timestamp helpers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Field holding the write time of an entry, in milliseconds since the epoch.
pub const TIME_FIELD: &str = "__time";

/// The backing map of the cache.
///
/// Ordered by key so scans over the store are deterministic.
pub type RawStore = BTreeMap<String, Value>;

/// Read the `__time` stamp of an entry value.
///
/// Returns `None` for non-objects, missing fields, and non-numeric stamps.
pub fn entry_time(value: &Value) -> Option<i64> {
    let time = value.as_object()?.get(TIME_FIELD)?;
    time.as_i64().or_else(|| time.as_f64().map(|t| t as i64))
}

/// Stamp an object value with the current time.
///
/// Non-object values are left untouched, they have nowhere to carry a stamp.
pub fn stamp(value: &mut Value) {
    stamp_at(value, Utc::now());
}

/// Stamp an object value with the given time.
pub fn stamp_at(value: &mut Value, at: DateTime<Utc>) {
    if let Some(obj) = value.as_object_mut() {
        obj.insert(TIME_FIELD.to_string(), Value::from(at.timestamp_millis()));
    }
}
