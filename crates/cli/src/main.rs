//! MotoShop CLI - catalog and local-storage inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # List the built-in catalog
//! moto-cli catalog list
//!
//! # Show one product as JSON
//! moto-cli catalog show 5
//!
//! # Dump the persisted cart/user documents
//! moto-cli storage show
//!
//! # Reset persisted state
//! moto-cli storage clear
//! ```
//!
//! The storage commands read `MOTO_SHOP_DATA_DIR` (default `./data`), the
//! same directory the storefront binary uses.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "moto-cli")]
#[command(author, version, about = "MotoShop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the built-in product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Inspect or reset the persisted local-storage documents
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List all products
    List,
    /// Show one product as JSON
    Show {
        /// Product id
        id: String,
    },
}

#[derive(Subcommand)]
enum StorageAction {
    /// Dump the cart and user documents
    Show,
    /// Delete the cart and user documents
    Clear,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
            CatalogAction::Show { id } => commands::catalog::show(id)?,
        },
        Commands::Storage { action } => match action {
            StorageAction::Show => commands::storage::show()?,
            StorageAction::Clear => commands::storage::clear()?,
        },
    }
    Ok(())
}
