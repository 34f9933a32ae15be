//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use moto_shop_core::{Cart, User};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::services::auth::{self, AuthService};
use crate::services::cart::{self, CartService};
use crate::services::checkout::CheckoutService;
use crate::storage::{LocalStore, StorageError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the catalog, the
/// document store, and the two reactive slots (cart and user); per-request
/// services borrow from it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    store: LocalStore,
    cart: RwLock<Cart>,
    user: RwLock<Option<User>>,
}

impl AppState {
    /// Create the application state.
    ///
    /// Opens the document store under the configured data directory and
    /// loads the persisted cart and user documents (unparseable documents
    /// fall back to empty state).
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self, StorageError> {
        let store = LocalStore::open(&config.data_dir)?;
        let cart = cart::load_cart(&store);
        let user = auth::load_user(&store);
        tracing::info!(
            data_dir = %config.data_dir.display(),
            cart_lines = cart.items().len(),
            logged_in = user.is_some(),
            "state restored from local storage"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Catalog::builtin(),
                store,
                cart: RwLock::new(cart),
                user: RwLock::new(user),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &LocalStore {
        &self.inner.store
    }

    /// A cart service borrowing this state.
    #[must_use]
    pub fn cart_service(&self) -> CartService<'_> {
        CartService::new(&self.inner.store, &self.inner.cart)
    }

    /// An auth service borrowing this state.
    #[must_use]
    pub fn auth_service(&self) -> AuthService<'_> {
        AuthService::new(
            &self.inner.store,
            &self.inner.user,
            self.inner.config.auth_latency,
        )
    }

    /// A checkout service borrowing this state.
    #[must_use]
    pub fn checkout_service(&self) -> CheckoutService<'_> {
        CheckoutService::new(
            self.auth_service(),
            self.cart_service(),
            self.inner.config.checkout_latency,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(dir: &std::path::Path) -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            data_dir: dir.to_path_buf(),
            auth_latency: Duration::ZERO,
            checkout_latency: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_state_restores_persisted_documents() {
        let tmp = tempfile::tempdir().unwrap();

        // First process: log in and add to cart
        {
            let state = AppState::new(config(tmp.path())).unwrap();
            state
                .auth_service()
                .login("rider@example.com", "pw")
                .await
                .unwrap();
            let product = state.catalog().products()[4].clone(); // no variants
            state
                .cart_service()
                .add(product, 1, moto_shop_core::VariantSelection::none())
                .await
                .unwrap();
        }

        // Second process: both documents restored
        let state = AppState::new(config(tmp.path())).unwrap();
        assert!(state.auth_service().current_user().await.is_some());
        assert_eq!(state.cart_service().snapshot().await.item_count(), 1);
    }
}
