//! Simulated checkout.
//!
//! There is no payment processor or order system behind the storefront:
//! placing an order validates the session and the form, waits out a
//! simulated processing delay, always succeeds, and clears the cart.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use moto_shop_core::{CartItem, CartTotals, OrderId};

use crate::services::auth::AuthService;
use crate::services::cart::CartService;
use crate::storage::StorageError;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires a logged-in user.
    #[error("login required to complete checkout")]
    NotAuthenticated,

    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required shipping field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Persistence failure while clearing the cart.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Shipping address submitted with the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub cep: String,
    pub street: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Accepted payment methods. Simulated - nothing is ever charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    CreditCard,
    Pix,
    Boleto,
}

/// The checkout form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping: ShippingAddress,
    pub payment_method: PaymentMethod,
}

/// The result of a successful (simulated) order placement.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
}

/// Checkout service.
///
/// Composes the auth and cart services; construct one per request via
/// [`crate::state::AppState::checkout_service`].
pub struct CheckoutService<'a> {
    auth: AuthService<'a>,
    cart: CartService<'a>,
    latency: Duration,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(auth: AuthService<'a>, cart: CartService<'a>, latency: Duration) -> Self {
        Self {
            auth,
            cart,
            latency,
        }
    }

    /// Place an order.
    ///
    /// Requires a logged-in user and a non-empty cart. After the simulated
    /// processing delay the order always succeeds: the cart is cleared
    /// (including its persisted document) and a confirmation is returned.
    ///
    /// # Errors
    ///
    /// Returns an error when no user is logged in, the cart is empty, a
    /// required shipping field is missing, or the cart document cannot be
    /// rewritten.
    pub async fn place_order(
        &self,
        request: CheckoutRequest,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let user = self
            .auth
            .current_user()
            .await
            .ok_or(CheckoutError::NotAuthenticated)?;

        let cart = self.cart.snapshot().await;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        validate_address(&request.shipping)?;

        // Simulated payment processing
        tokio::time::sleep(self.latency).await;

        let confirmation = OrderConfirmation {
            order_id: OrderId::new(Uuid::new_v4().to_string()),
            items: cart.items().to_vec(),
            totals: cart.totals(),
            payment_method: request.payment_method,
            placed_at: Utc::now(),
        };
        self.cart.clear().await?;

        tracing::info!(
            order_id = %confirmation.order_id,
            user_id = %user.id,
            total = %confirmation.totals.total,
            "order placed"
        );
        Ok(confirmation)
    }
}

fn validate_address(shipping: &ShippingAddress) -> Result<(), CheckoutError> {
    let required = [
        ("cep", &shipping.cep),
        ("street", &shipping.street),
        ("number", &shipping.number),
        ("neighborhood", &shipping.neighborhood),
        ("city", &shipping.city),
        ("state", &shipping.state),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(CheckoutError::MissingField(field));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{LocalStore, keys};
    use moto_shop_core::{Cart, CategoryId, Price, Product, ProductId, User, VariantSelection};
    use rust_decimal::Decimal;
    use tokio::sync::RwLock;

    struct Fixture {
        _tmp: tempfile::TempDir,
        store: LocalStore,
        cart: RwLock<Cart>,
        user: RwLock<Option<User>>,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().unwrap();
            let store = LocalStore::open(tmp.path()).unwrap();
            Self {
                _tmp: tmp,
                store,
                cart: RwLock::new(Cart::new()),
                user: RwLock::new(None),
            }
        }

        fn checkout(&self) -> CheckoutService<'_> {
            CheckoutService::new(
                AuthService::new(&self.store, &self.user, Duration::ZERO),
                CartService::new(&self.store, &self.cart),
                Duration::ZERO,
            )
        }

        async fn login(&self) {
            AuthService::new(&self.store, &self.user, Duration::ZERO)
                .login("rider@example.com", "pw")
                .await
                .unwrap();
        }

        async fn fill_cart(&self, price_cents: i64, quantity: u32) {
            let product = Product {
                id: ProductId::new("1"),
                name: "Produto".to_owned(),
                description: String::new(),
                price: Price::brl(Decimal::new(price_cents, 2)),
                category: CategoryId::new("acessorios"),
                images: Vec::new(),
                rating: 4.0,
                review_count: 1,
                in_stock: true,
                specifications: None,
            };
            CartService::new(&self.store, &self.cart)
                .add(product, quantity, VariantSelection::none())
                .await
                .unwrap();
        }
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            shipping: ShippingAddress {
                cep: "01310-100".to_owned(),
                street: "Av. Paulista".to_owned(),
                number: "1000".to_owned(),
                complement: None,
                neighborhood: "Bela Vista".to_owned(),
                city: "São Paulo".to_owned(),
                state: "SP".to_owned(),
            },
            payment_method: PaymentMethod::Pix,
        }
    }

    #[tokio::test]
    async fn test_checkout_requires_login() {
        let fx = Fixture::new();
        fx.fill_cart(10_000, 1).await;

        let err = fx.checkout().place_order(request()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_checkout_requires_non_empty_cart() {
        let fx = Fixture::new();
        fx.login().await;

        let err = fx.checkout().place_order(request()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_checkout_requires_address_fields() {
        let fx = Fixture::new();
        fx.login().await;
        fx.fill_cart(10_000, 1).await;

        let mut bad = request();
        bad.shipping.city = "  ".to_owned();
        let err = fx.checkout().place_order(bad).await.unwrap_err();
        assert!(matches!(err, CheckoutError::MissingField("city")));
    }

    #[tokio::test]
    async fn test_successful_checkout_clears_cart() {
        let fx = Fixture::new();
        fx.login().await;
        fx.fill_cart(15_000, 2).await;

        let confirmation = fx.checkout().place_order(request()).await.unwrap();
        assert_eq!(confirmation.items.len(), 1);
        assert_eq!(confirmation.totals.subtotal.display(), "R$ 300,00");
        // Above the free-shipping threshold
        assert_eq!(confirmation.totals.shipping.display(), "R$ 0,00");
        assert_eq!(confirmation.payment_method, PaymentMethod::Pix);

        // Cart emptied in memory and on disk
        assert!(fx.cart.read().await.is_empty());
        let persisted: Vec<CartItem> = fx.store.read(keys::CART).unwrap();
        assert!(persisted.is_empty());
    }
}
