use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fetch_common::{init_tracing, ProcessEnv};

use quickfetch::cli::Cli;
use quickfetch::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("quickfetch", cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;
    let runner = Arc::new(config.runner());

    let report = quickfetch::report(runner, Arc::new(ProcessEnv), &config, cli.render_mode()).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
