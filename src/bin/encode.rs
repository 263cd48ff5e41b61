use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use qrpad::{
    logging, render_qr_to_terminal, Action, AppConfig, Controller, Effect, ErrorCorrection,
    Severity,
};

#[derive(Parser)]
#[command(name = "qrpad-encode")]
#[command(author, version, about = "Encode text or a WhatsApp number as a QR code", long_about = None)]
struct Cli {
    /// Text to encode (a phone number with --whatsapp)
    text: String,

    /// Output PNG file
    #[arg(short, long, default_value = "qrcode.png")]
    output: PathBuf,

    /// Treat the input as a phone number and encode a WhatsApp chat link
    #[arg(short, long)]
    whatsapp: bool,

    /// Error-correction level
    #[arg(short, long, value_enum)]
    error_correction: Option<ErrorCorrection>,

    /// Pixels per module
    #[arg(long)]
    box_size: Option<u32>,

    /// Quiet zone width in modules
    #[arg(long)]
    border: Option<u32>,

    /// Refuse data that needs a symbol version above this (1-40)
    #[arg(long)]
    max_version: Option<i16>,

    /// Print the QR code in the terminal instead of writing a file
    #[arg(short, long)]
    terminal: bool,

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

    let mut config = AppConfig::load(args.config.as_deref())
        .with_context(|| format!("Failed to load config {:?}", args.config))?;
    if let Some(level) = args.error_correction {
        config.encode.error_correction = level;
    }
    if let Some(box_size) = args.box_size {
        config.encode.box_size = box_size;
    }
    if let Some(border) = args.border {
        config.encode.border = border;
    }
    if args.max_version.is_some() {
        config.encode.max_version = args.max_version;
    }
    config.validate().context("Invalid encode options")?;

    if args.text.is_empty() {
        bail!("Nothing to encode: input is empty");
    }

    if args.terminal {
        let payload = if args.whatsapp {
            format!("{}{}", config.whatsapp_prefix, args.text)
        } else {
            args.text.clone()
        };
        let rendered = render_qr_to_terminal(&payload, &config.encode)?;
        println!("{}", rendered);
        return Ok(());
    }

    let mut controller = Controller::new(config);
    let action = if args.whatsapp {
        controller.state_mut().whatsapp_input = args.text.clone();
        Action::GenerateWhatsApp
    } else {
        controller.state_mut().text_input = args.text.clone();
        Action::GenerateText
    };

    report(controller.dispatch(action))?;
    let Some(payload) = controller.state().last_payload.clone() else {
        bail!("Nothing to encode: input is empty");
    };

    report(controller.dispatch(Action::Save {
        path: Some(args.output.clone()),
    }))?;

    println!("Encoded: {}", payload);
    println!("Output file: {}", args.output.display());

    Ok(())
}

/// Fail on error notifications; print the rest.
fn report(effects: Vec<Effect>) -> Result<()> {
    for effect in effects {
        if let Effect::Notify(n) = effect {
            match n.severity {
                Severity::Error => bail!("{}: {}", n.title, n.message),
                Severity::Warning => eprintln!("{}: {}", n.title, n.message),
                Severity::Info => println!("{}", n.message),
            }
        }
    }
    Ok(())
}
