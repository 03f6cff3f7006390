//! Quickfetch - terminal system summary
//!
//! Probes are registered in a [`ProbeRegistry`](registry::ProbeRegistry),
//! run once each, and the resulting [`Snapshot`](registry::Snapshot) is
//! rendered by a [`Presenter`](output::Presenter).
//!
//! # Modules
//!
//! - [`registry`]: probe trait, context, registry and snapshot
//! - [`probes`]: the built-in probes and their parsers
//! - [`output`]: report rendering and logos
//! - [`config`]: config file loading
//! - [`types`]: probe value types

pub mod cli;
pub mod config;
pub mod output;
pub mod probes;
pub mod registry;
pub mod types;

use std::sync::Arc;

use fetch_common::{CommandRunner, Environment};

use config::Config;
use output::{Presenter, RenderMode};
use registry::{ProbeContext, Snapshot};

/// Run every built-in probe against the given seams
pub async fn collect(
    runner: Arc<dyn CommandRunner>,
    env: Arc<dyn Environment>,
    config: &Config,
) -> anyhow::Result<Snapshot> {
    let ctx = ProbeContext::new(runner, env).with_settings(config.probe_settings());
    let registry = probes::builtin(ctx)?;
    tracing::info!(probes = registry.len(), "collecting system information");
    Ok(registry.run_all().await)
}

/// Collect and render a full report
pub async fn report(
    runner: Arc<dyn CommandRunner>,
    env: Arc<dyn Environment>,
    config: &Config,
    mode: RenderMode,
) -> anyhow::Result<String> {
    let snapshot = collect(runner, env, config).await?;
    Ok(Presenter::new(mode).render(&snapshot))
}
