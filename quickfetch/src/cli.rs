//! Command-line arguments

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::output::RenderMode;

#[derive(Debug, Parser)]
#[command(name = "quickfetch")]
#[command(about = "Print a summary of this machine's hardware, software and session")]
#[command(version)]
pub struct Cli {
    /// Show distribution ASCII artwork above the report
    #[arg(long)]
    pub experimental: bool,

    /// Path to a config file (default: ~/.config/quickfetch/config.toml)
    #[arg(short, long, env = "QUICKFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn render_mode(&self) -> RenderMode {
        if self.experimental {
            RenderMode::Artwork
        } else {
            RenderMode::Lines
        }
    }
}
