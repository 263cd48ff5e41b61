use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use qrpad::{logging, Action, AppConfig, Controller, Effect, Severity};

#[derive(Parser)]
#[command(name = "qrpad-decode")]
#[command(author, version, about = "Decode the QR codes found in an image", long_about = None)]
struct Cli {
    /// Image file (PNG, JPEG or GIF)
    input: PathBuf,

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

    if !args.input.exists() {
        bail!("Input path does not exist: {}", args.input.display());
    }

    let config = AppConfig::load(args.config.as_deref())
        .with_context(|| format!("Failed to load config {:?}", args.config))?;
    let mut controller = Controller::new(config);

    for action in [
        Action::Open {
            path: Some(args.input.clone()),
        },
        Action::Decode,
    ] {
        for effect in controller.dispatch(action) {
            if let Effect::Notify(n) = effect {
                match n.severity {
                    Severity::Error => bail!("{}: {}", n.title, n.message),
                    Severity::Warning => {
                        eprintln!("{}", n.message);
                        std::process::exit(1);
                    }
                    Severity::Info => println!("{}", n.message),
                }
            }
        }
    }

    Ok(())
}
