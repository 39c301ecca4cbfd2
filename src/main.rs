// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! csver - Main Application
//!
//! Terraform `external` data source program. Reads the query object from
//! stdin, performs one request against the IBM Cloud Kubernetes Service API
//! and prints the reshaped result as a single JSON line on stdout.
//!
//! Exit status is 0 on success and 1 on any failure, in which case stdout is
//! left empty and a diagnostic is written to stderr.

mod cli;

use std::io;
use std::process::exit;
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use csver::{ApiEndpoint, Error, ExternalData, FetchOptions, HttpTransport, emit, input};

use crate::cli::{Cli, Command};

/// Main application entry point
///
/// Parses command line arguments, runs the selected lookup and maps any
/// failure to a single stderr line and a non-zero exit status.
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        exit(1);
    }
}

/// Route logs to stderr; stdout carries only the result
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let text = input::read_to_string(io::stdin().lock())?;

    // Resolved once here and passed down explicitly
    let endpoint = ApiEndpoint::resolve(cli.api_endpoint.as_deref())?;
    let options = FetchOptions {
        timeout: cli.timeout.map(Duration::from_secs),
    };
    debug!(%endpoint, command = ?cli.command, "resolved API endpoint");

    let transport = HttpTransport;

    let data: ExternalData = match cli.command {
        Command::Versions => csver::fetch_versions(&text, &endpoint, options, &transport)?,
        Command::Addons => csver::fetch_addons(&text, &endpoint, options, &transport)?,
    };

    emit(io::stdout().lock(), &data)?;
    Ok(())
}
