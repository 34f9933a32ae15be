//! MotoShop Core - Shared domain types library.
//!
//! This crate provides the domain model used across all MotoShop components:
//! - `storefront` - Public-facing JSON API
//! - `cli` - Command-line tools for catalog and storage inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP,
//! no persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails
//! - [`product`] - Catalog records (products, categories, specifications)
//! - [`cart`] - The cart reducer: line merging, quantities, and totals
//! - [`user`] - The mock-authenticated user record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod product;
pub mod types;
pub mod user;

pub use cart::{Cart, CartError, CartItem, CartTotals, LineKey, VariantSelection};
pub use product::{Category, Product, Specifications};
pub use types::*;
pub use user::User;
