//! Patient biometrics report
//!
//! Reads `id height weight age` records from the file named on the command
//! line and prints the sorted table, extremum lists and average weight.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

use anyhow::Context;
use patient_stats::{load_sorted, write_report, Config};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Exit status for bad usage and unreadable input alike.
const FAILURE: i32 = 1;

/// Prints the start banner on creation and the closing banner on drop.
///
/// `process::exit` skips the drop, so failed runs end without the closing
/// banner.
struct Application {
    message: &'static str,
}

impl Application {
    fn start(message: &'static str) -> Self {
        println!("STARTING APP: {}...", file!());
        Self { message }
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        println!("\n\t\t{}.", self.message);
    }
}

fn main() {
    // Logs go to stderr; stdout carries only the report.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install log subscriber: {e}");
    }

    let app = Application::start("done");

    let config = match Config::from_args(env::args()) {
        Ok(config) => config,
        Err(usage) => {
            eprintln!("{usage}");
            process::exit(FAILURE);
        }
    };

    let file = match config.open_input() {
        Ok(file) => file,
        Err(e) => {
            error!(path = %e.path.display(), "open failed: {}", e.source);
            eprintln!("{e}");
            process::exit(FAILURE);
        }
    };

    if let Err(e) = run(&config, file) {
        eprintln!("error: {e:#}");
        process::exit(FAILURE);
    }

    drop(app);
}

fn run(config: &Config, file: File) -> anyhow::Result<()> {
    let source = config.input.display().to_string();

    let patients = load_sorted(BufReader::new(file))
        .with_context(|| format!("reading patient records from {source}"))?;
    info!(path = %source, records = patients.len(), "patient records loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &source, &patients).context("writing report")?;
    out.flush().context("flushing report")?;
    Ok(())
}
