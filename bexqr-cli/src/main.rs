//! bexqr CLI
//!
//! Command-line interface for building, parsing and rendering ark payment URIs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod ui;

use commands::RequestArgs;

#[derive(Parser)]
#[command(name = "bexqr")]
#[command(about = "bexqr - build, parse and render ark payment QR codes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a payment URI and print it
    Encode {
        /// Recipient address
        #[arg(long)]
        address: String,

        /// Amount to request
        #[arg(long)]
        amount: Option<f64>,

        /// Label for the recipient
        #[arg(long)]
        label: Option<String>,

        /// Vendor field (memo), at most 64 characters
        #[arg(long)]
        vendor_field: Option<String>,
    },

    /// Parse a scanned payment URI
    Parse {
        /// The URI or QR data to parse
        data: String,

        /// Print the decoded request as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether data is a payment URI
    Check {
        /// The URI or QR data to check
        data: String,
    },

    /// Display a payment request QR code in the terminal
    Show {
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Write a payment request QR code as SVG
    Svg {
        #[command(flatten)]
        request: RequestArgs,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode {
            address,
            amount,
            label,
            vendor_field,
        } => commands::uri::encode(&address, amount, label, vendor_field),
        Commands::Parse { data, json } => commands::uri::parse(&data, json, cli.verbose),
        Commands::Check { data } => commands::uri::check(&data),
        Commands::Show { request } => commands::qr::show(&request, cli.verbose),
        Commands::Svg { request, output } => commands::qr::svg(&request, &output, cli.verbose),
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "bexqr_cli=debug,bexqr_lib=debug"
    } else {
        "bexqr_cli=info,bexqr_lib=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        ui::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}
