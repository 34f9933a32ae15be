//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

use moto_shop_core::OrderId;

use crate::error::Result;
use crate::services::checkout::{CheckoutRequest, OrderConfirmation, PaymentMethod};
use crate::state::AppState;

/// Order confirmation response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: OrderId,
    pub item_count: usize,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    pub payment_method: PaymentMethod,
    pub placed_at: DateTime<Utc>,
}

impl From<OrderConfirmation> for OrderView {
    fn from(confirmation: OrderConfirmation) -> Self {
        Self {
            order_id: confirmation.order_id,
            item_count: confirmation.items.len(),
            subtotal: confirmation.totals.subtotal.display(),
            shipping: confirmation.totals.shipping.display(),
            total: confirmation.totals.total.display(),
            payment_method: confirmation.payment_method,
            placed_at: confirmation.placed_at,
        }
    }
}

/// Place an order.
///
/// Requires a logged-in user and a non-empty cart; always succeeds after
/// the simulated processing delay and clears the cart.
pub async fn place_order(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderView>)> {
    let confirmation = state.checkout_service().place_order(request).await?;
    Ok((StatusCode::CREATED, Json(OrderView::from(confirmation))))
}
