//! Storefront services: mock authentication, the persistent cart, and
//! simulated checkout.
//!
//! Services are lightweight views over [`crate::state::AppState`]'s shared
//! data, constructed per request.

pub mod auth;
pub mod cart;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use cart::{CartService, CartServiceError};
pub use checkout::{
    CheckoutError, CheckoutRequest, CheckoutService, OrderConfirmation, PaymentMethod,
    ShippingAddress,
};
