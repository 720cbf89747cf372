// Copyright 2026 Jakub J. Guzek
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::Parser;
use iupred_wrapper::cli::output::{self, OutputMode};
use iupred_wrapper::cli::predict_cmd::{self, PredictOptions};
use iupred_wrapper::config::{DEFAULT_SESSION_ID, DEFAULT_TOKEN};

#[derive(Parser)]
#[command(
    name = "iupred3-wrapper",
    version,
    about = "A simple wrapper for the IUPred3 web interface",
    long_about = "A simple wrapper for the IUPred3 web interface. Requests need a CSRF token \
                  and a session id, which the browser stores as cookies after visiting the \
                  IUPred3 website. Defaults are built in but are not guaranteed to work; pass \
                  your own values, or pass empty ones to read them from Firefox's cookie store."
)]
struct Cli {
    /// Input file with protein sequences in FASTA format
    file: PathBuf,

    /// CSRF token from the iupred3 cookie. Needed to make requests
    #[arg(long, default_value = DEFAULT_TOKEN)]
    token: String,

    /// Session id from the iupred3 cookie. Needed to make requests
    #[arg(long, default_value = DEFAULT_SESSION_ID)]
    sessionid: String,

    /// Path to a Firefox cookies sqlite database file
    #[arg(long)]
    firefox_cookies_path: Option<PathBuf>,

    /// Service root URL (defaults to $IUPRED_BASE_URL, then the public service)
    #[arg(long)]
    base_url: Option<String>,

    /// Output results as JSON lines (machine-readable)
    #[arg(long)]
    json: bool,

    /// Print verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "iupred_wrapper=debug"
    } else {
        "iupred_wrapper=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = PredictOptions {
        file: cli.file,
        token: cli.token,
        session_id: cli.sessionid,
        cookies_path: cli.firefox_cookies_path,
        base_url: cli.base_url,
        output: OutputMode {
            json: cli.json,
            verbose: cli.verbose,
        },
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = predict_cmd::run(&opts).await {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
