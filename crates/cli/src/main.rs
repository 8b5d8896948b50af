//! Bazaar CLI - offline checks against the storefront core.
//!
//! # Usage
//!
//! ```bash
//! # Validate a checkout form written as YAML
//! bazaar validate form.yaml
//!
//! # Price a cart (product ids from the catalog) with an optional coupon
//! bazaar quote cart.yaml --coupon SAVE10
//!
//! # Look up a pincode, or suggest cities
//! bazaar pincode 560001
//! bazaar cities pur
//! ```
//!
//! # Commands
//!
//! - `validate` - Report checkout form field errors
//! - `quote` - Print the order summary for a cart
//! - `pincode` - City and state for a pincode
//! - `cities` - City suggestions for a partial name

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Catalog used by `quote` when neither `--catalog` nor
/// `STOREFRONT_CATALOG_PATH` is given.
const DEFAULT_CATALOG_PATH: &str = "crates/storefront/data/products.json";

#[derive(Parser)]
#[command(name = "bazaar")]
#[command(author, version, about = "Bazaar CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a checkout form (YAML)
    Validate {
        /// Path to the form file
        file: PathBuf,
    },
    /// Print the order summary for a cart (YAML)
    Quote {
        /// Path to the cart file
        file: PathBuf,

        /// Coupon code to apply
        #[arg(short, long)]
        coupon: Option<String>,

        /// Product catalog JSON
        #[arg(long, env = "STOREFRONT_CATALOG_PATH", default_value = DEFAULT_CATALOG_PATH)]
        catalog: PathBuf,
    },
    /// Look up the city and state for a pincode
    Pincode {
        /// Six-digit pincode
        code: String,
    },
    /// Suggest cities matching part of a name
    Cities {
        /// Part of a city name (case-insensitive)
        query: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr; command output goes to stdout
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "bazaar_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Validate { file } => commands::validate::run(&file, &mut out)?,
        Commands::Quote {
            file,
            coupon,
            catalog,
        } => commands::quote::run(&file, &catalog, coupon.as_deref(), &mut out)?,
        Commands::Pincode { code } => commands::lookup::pincode(&code, &mut out)?,
        Commands::Cities { query } => commands::lookup::cities(&query, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
