//! # bundle
//!
//! Interactive bundle builder.
//!
//! ```text
//! bundle                         read commands from stdin
//! bundle --script demo.txt       read commands from a file
//! bundle --json                  one JSON snapshot per change
//! bundle --config shop.toml      custom catalog and thresholds
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use bundle_cli::{AppConfig, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "bundle", version, about = "Build a product bundle and unlock the bundle discount")]
struct Cli {
    /// TOML file with the catalog and thresholds
    #[arg(short, long, env = "BUNDLE_CONFIG")]
    config: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Print JSON snapshots instead of the text screen
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    bundle_cli::init_tracing(format);

    let config = AppConfig::load(cli.config.as_deref())?;

    let stats = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            bundle_cli::run(&config, format, BufReader::new(file), io::stdout(), io::stderr())?
        }
        None => bundle_cli::run(&config, format, io::stdin().lock(), io::stdout(), io::stderr())?,
    };

    info!(failed = stats.failed, "session closed");
    Ok(())
}
