//! Cart service: the core cart reducer plus document persistence.
//!
//! Every mutation is applied under the write lock and then persisted as the
//! `moto-shop-cart` document (a JSON array of lines), mirroring how the web
//! client wrote local storage after each state change.

use thiserror::Error;
use tokio::sync::RwLock;

use moto_shop_core::{Cart, CartError, CartItem, LineKey, Product, VariantSelection};

use crate::storage::{LocalStore, StorageError, keys};

/// Errors from cart operations.
#[derive(Debug, Error)]
pub enum CartServiceError {
    /// Invalid mutation (e.g. zero quantity on add).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The product cannot be added because it is out of stock.
    #[error("product is out of stock")]
    OutOfStock,

    /// The product requires a variant attribute that was not selected.
    #[error("a {0} selection is required for this product")]
    MissingVariant(&'static str),

    /// No cart line matches the given key.
    #[error("cart line not found")]
    LineNotFound,

    /// Persistence failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Cart service.
///
/// Borrows the shared cart and document store from the application state;
/// construct one per request via [`crate::state::AppState::cart_service`].
pub struct CartService<'a> {
    store: &'a LocalStore,
    cart: &'a RwLock<Cart>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a LocalStore, cart: &'a RwLock<Cart>) -> Self {
        Self { store, cart }
    }

    /// A snapshot of the current cart.
    pub async fn snapshot(&self) -> Cart {
        self.cart.read().await.clone()
    }

    /// Add a product to the cart, merging with an existing line when the
    /// variant key matches.
    ///
    /// # Errors
    ///
    /// Rejects zero quantities, out-of-stock products, and products whose
    /// specifications require a size/color/height that was not selected.
    /// Also fails when the cart document cannot be written.
    pub async fn add(
        &self,
        product: Product,
        quantity: u32,
        selection: VariantSelection,
    ) -> Result<Cart, CartServiceError> {
        if !product.in_stock {
            return Err(CartServiceError::OutOfStock);
        }
        if product.requires_size() && selection.size.is_none() {
            return Err(CartServiceError::MissingVariant("size"));
        }
        if product.requires_color() && selection.color.is_none() {
            return Err(CartServiceError::MissingVariant("color"));
        }
        if product.requires_height() && selection.height.is_none() {
            return Err(CartServiceError::MissingVariant("height"));
        }

        let mut cart = self.cart.write().await;
        cart.add(product, quantity, selection)?;
        self.persist(&cart)?;
        tracing::debug!(lines = cart.items().len(), "cart line added");
        Ok(cart.clone())
    }

    /// Set the quantity of a line; zero removes the line.
    ///
    /// # Errors
    ///
    /// Fails when no line matches the key or the document cannot be written.
    pub async fn update_quantity(
        &self,
        key: &LineKey,
        quantity: u32,
    ) -> Result<Cart, CartServiceError> {
        let mut cart = self.cart.write().await;
        if !cart.update_quantity(key, quantity) {
            return Err(CartServiceError::LineNotFound);
        }
        self.persist(&cart)?;
        Ok(cart.clone())
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Fails when no line matches the key or the document cannot be written.
    pub async fn remove(&self, key: &LineKey) -> Result<Cart, CartServiceError> {
        let mut cart = self.cart.write().await;
        if !cart.remove(key) {
            return Err(CartServiceError::LineNotFound);
        }
        self.persist(&cart)?;
        Ok(cart.clone())
    }

    /// Empty the cart and its persisted document.
    ///
    /// # Errors
    ///
    /// Fails when the document cannot be written.
    pub async fn clear(&self) -> Result<(), StorageError> {
        let mut cart = self.cart.write().await;
        cart.clear();
        self.persist(&cart)?;
        tracing::debug!("cart cleared");
        Ok(())
    }

    fn persist(&self, cart: &Cart) -> Result<(), StorageError> {
        self.store.write(keys::CART, &cart.items())
    }
}

/// Load the persisted cart document, falling back to an empty cart.
#[must_use]
pub fn load_cart(store: &LocalStore) -> Cart {
    store
        .read::<Vec<CartItem>>(keys::CART)
        .map_or_else(Cart::new, Cart::from_items)
}
