//! # SopsSecret
//!
//! kustomize exec generator plugin producing a Kubernetes Secret from a
//! `SopsSecret` manifest.
//!
//! ## Usage
//!
//! ```bash
//! SopsSecret generator.yaml > secret.yaml
//! ```
//!
//! Exit codes: 0 on success, 1 on a usage error, 2 when generation fails.
//! The Secret is the only thing written to stdout; logs go to stderr.
#![allow(non_snake_case, reason = "kustomize looks exec plugins up by kind")]

use clap::error::ErrorKind;
use clap::Parser;
use sops_secret_generator::{generate_secret, GeneratorConfig, SopsBinary};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILD_GIT_HASH"),
    ", built ",
    env!("BUILD_DATETIME"),
    ")"
);

/// Generate a Kubernetes Secret from a SopsSecret manifest
#[derive(Debug, Parser)]
#[command(name = "SopsSecret", version, long_version = LONG_VERSION)]
struct Cli {
    /// Path to the SopsSecret manifest
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(_) => {
            eprintln!("usage: SopsSecret FILE");
            return ExitCode::from(1);
        }
    };

    let config = GeneratorConfig::from_env();
    init_tracing(&config);
    debug!("Configuration: {:?}", config);

    let decryptor = SopsBinary::from_config(&config);
    match generate_secret(&cli.file, &decryptor) {
        Ok(secret) => match write_secret(&secret) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: failed to write Secret to stdout: {e}");
                ExitCode::from(2)
            }
        },
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn write_secret(secret: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(secret.as_bytes())?;
    stdout.flush()
}

fn init_tracing(config: &GeneratorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.log_enable_color)
        .init();
}
