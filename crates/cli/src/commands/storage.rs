//! Local-storage inspection commands.
//!
//! Operates on the same data directory as the storefront binary, resolved
//! through the regular configuration (`MOTO_SHOP_DATA_DIR`).

#![allow(clippy::print_stdout)]

use moto_shop_storefront::config::StorefrontConfig;
use moto_shop_storefront::storage::{LocalStore, keys};

fn open_store() -> Result<LocalStore, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    Ok(LocalStore::open(config.data_dir)?)
}

/// Dump the cart and user documents as stored on disk.
///
/// # Errors
///
/// Returns an error when the data directory cannot be opened.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    for key in [keys::CART, keys::USER] {
        println!("--- {key} ({})", store.document_path(key).display());
        match store.read_raw(key) {
            Some(raw) => println!("{raw}"),
            None => println!("(absent)"),
        }
    }
    Ok(())
}

/// Delete the cart and user documents.
///
/// # Errors
///
/// Returns an error when the data directory cannot be opened or a document
/// cannot be removed.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store()?;
    for key in [keys::CART, keys::USER] {
        store.remove(key)?;
        println!("removed {key}");
    }
    Ok(())
}
