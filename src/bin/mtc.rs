//! mtc CLI Binary
//!
//! Command-line interface for computing, comparing and verifying Merkle tree
//! checksums.

use clap::Parser;
use mtc::cli::{map_error, Cli, RunContext};
use mtc::config::{ConfigLoader, MtcConfig};
use mtc::error::ApiError;
use mtc::logging::{init_logging, LoggingConfig};
use std::io::IsTerminal;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let working_dir = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: failed to read working directory: {}", e);
            process::exit(1);
        }
    };

    let config = match load_config(&cli, &working_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    // Initialize logging early
    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("mtc starting");

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            eprintln!("Error: failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    let context =
        RunContext::from_config(config, working_dir).with_color(std::io::stdout().is_terminal());

    match runtime.block_on(context.execute(&cli.command)) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

fn load_config(cli: &Cli, working_dir: &std::path::Path) -> Result<MtcConfig, ApiError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(working_dir),
    }
}

/// Build logging configuration from CLI args and the loaded config.
/// Precedence: explicit --log-* flags, then -v/-q, then config file, then defaults.
fn build_logging_config(cli: &Cli, config: &MtcConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.level = "error".to_string();
    }
    match cli.verbose {
        0 => {}
        1 => logging.level = "info".to_string(),
        _ => logging.level = "debug".to_string(),
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }

    logging
}
