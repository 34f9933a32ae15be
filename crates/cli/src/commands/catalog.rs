//! Catalog inspection commands.

#![allow(clippy::print_stdout)]

use moto_shop_core::ProductId;
use moto_shop_storefront::catalog::Catalog;

/// Print a one-line summary per product.
pub fn list() {
    let catalog = Catalog::builtin();
    for product in catalog.products() {
        let stock = if product.in_stock {
            ""
        } else {
            "  (out of stock)"
        };
        println!(
            "{:>3}  {:<40} {:>12}  [{}]{stock}",
            product.id.as_str(),
            product.name,
            product.price.display(),
            product.category.as_str(),
        );
    }
    println!("{} products", catalog.products().len());
}

/// Print one product as pretty JSON.
///
/// # Errors
///
/// Returns an error when the id is not in the catalog.
pub fn show(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    let product = catalog
        .product(&ProductId::new(id))
        .ok_or_else(|| format!("product {id} not found"))?;
    println!("{}", serde_json::to_string_pretty(product)?);
    Ok(())
}
