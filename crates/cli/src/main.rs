//! respcache maintenance entry point.
//!
//! Reads a JSON snapshot of cache entries, runs the configured sweeps and
//! prints the surviving entries. Logging goes to stderr so stdout stays
//! valid JSON.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use respcache_core::{AppConfig, ResponseCache};
use tracing_subscriber::EnvFilter;

mod args;
mod sweep;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = args::Args::parse();
    let session = args.session()?;
    let config = AppConfig::load().context("loading configuration")?;

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let mut cache = ResponseCache::new(Arc::new(config), Arc::new(session));
    let report = sweep::run(&mut cache, &input, &args)?;

    tracing::info!(
        loaded = report.loaded,
        expired = report.expired,
        signed = report.signed,
        remaining = cache.len(),
        "sweep finished"
    );

    println!("{}", serde_json::to_string_pretty(cache.raw())?);

    Ok(())
}
