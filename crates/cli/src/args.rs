//! Command-line surface for `respcache`.

use std::path::PathBuf;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use respcache_core::StaticSession;

/// Environment variable holding the session token used for `--signed`.
pub const SESSION_TOKEN_ENV: &str = "RESPCACHE_SESSION_TOKEN";

#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "respcache", version, about = "Sweep expired and signed entries from a cache snapshot")]
pub struct Args {
    /// Also flush signed entries (requires RESPCACHE_SESSION_TOKEN)
    #[arg(long)]
    pub signed: bool,

    /// Evaluate expiry at this instant, in milliseconds since the epoch
    #[arg(long, value_parser = parse_millis)]
    pub now: Option<DateTime<Utc>>,

    /// Session token from env (kept off the command line to avoid shell history leaks)
    #[arg(long, hide = true, env = SESSION_TOKEN_ENV)]
    pub session_token: Option<String>,

    /// Snapshot file; stdin when absent
    pub input: Option<PathBuf>,
}

impl Args {
    /// Session for the sweep.
    ///
    /// # Errors
    ///
    /// Fails when `--signed` is set without a non-empty session token, since
    /// the signed flush would otherwise silently do nothing.
    pub fn session(&self) -> Result<StaticSession> {
        match self.session_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(StaticSession::new(token)),
            _ if self.signed => bail!("--signed requires {SESSION_TOKEN_ENV} to be set"),
            _ => Ok(StaticSession::logged_out()),
        }
    }
}

fn parse_millis(raw: &str) -> Result<DateTime<Utc>, String> {
    let millis: i64 = raw.parse().map_err(|e| format!("invalid milliseconds: {e}"))?;
    DateTime::from_timestamp_millis(millis).ok_or_else(|| format!("out of range: {raw}"))
}
