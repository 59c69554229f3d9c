use std::backtrace::Backtrace;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context as _;
use clap::Parser;
use clap::error::ErrorKind;
use serde_json::{Value, json};

use bpread::{Reading, Rect};

#[derive(Parser)]
#[command(name = "bpread")]
#[command(about = "Read a blood pressure monitor's 7-segment display from a photo")]
struct Cli {
    /// Path to the photographed display
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Crop rectangle in original-image coordinates
    #[arg(value_name = "X")]
    crop_x: u32,
    #[arg(value_name = "Y")]
    crop_y: u32,
    #[arg(value_name = "WIDTH")]
    crop_width: u32,
    #[arg(value_name = "HEIGHT")]
    crop_height: u32,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Backtrace captured by the panic hook, so an unexpected failure can be
/// reported as data instead of a crash.
static PANIC_TRACE: Mutex<Option<String>> = Mutex::new(None);

fn main() {
    panic::set_hook(Box::new(|info| {
        let trace = Backtrace::force_capture();
        if let Ok(mut slot) = PANIC_TRACE.lock() {
            *slot = Some(format!("{info}\n{trace}"));
        }
    }));

    // Exactly one structured record goes to stdout, success or failure.
    let record = panic::catch_unwind(run).unwrap_or_else(|_| {
        let detail = PANIC_TRACE
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
            .unwrap_or_else(|| "no panic details captured".to_string());
        json!({ "error": format!("unexpected failure: {detail}") })
    });
    println!("{record}");
}

fn run() -> Value {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit();
        }
        Err(err) => return json!({ "error": err.to_string() }),
    };

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match execute(&cli) {
        Ok(reading) => {
            serde_json::to_value(&reading).unwrap_or_else(|err| json!({ "error": err.to_string() }))
        }
        Err(err) => json!({ "error": format!("{err:#}") }),
    }
}

fn execute(cli: &Cli) -> anyhow::Result<Reading> {
    let crop = Rect::new(cli.crop_x, cli.crop_y, cli.crop_width, cli.crop_height);
    bpread::read_from_path(&cli.image_path, crop)
        .with_context(|| format!("reading {}", cli.image_path.display()))
}
