use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use qrpad::{gui, logging, AppConfig};

#[derive(Parser)]
#[command(name = "qrpad")]
#[command(author, version, about = "Generate, save and decode QR codes", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init(args.verbose);

    let config = AppConfig::load(args.config.as_deref())
        .with_context(|| format!("Failed to load config {:?}", args.config))?;

    gui::run(config).map_err(|e| anyhow!("GUI failed: {e}"))
}
