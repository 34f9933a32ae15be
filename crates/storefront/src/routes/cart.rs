//! Cart route handlers.
//!
//! Mutations address lines by (product id, size, color, height) - the
//! line's variant key - and every handler responds with the updated cart
//! view so the client can re-render in one round trip.

use axum::{
    Json,
    extract::State,
};
use serde::{Deserialize, Serialize};

use moto_shop_core::{Cart, CartItem, LineKey, ProductId, VariantSelection};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_height: Option<String>,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            image: item.product.images.first().cloned(),
            quantity: item.quantity,
            selected_size: item.selected_size.clone(),
            selected_color: item.selected_color.clone(),
            selected_height: item.selected_height.clone(),
            unit_price: item.product.price.display(),
            line_total: item.product.price.times(item.quantity).display(),
        }
    }
}

/// Cart display data with computed totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    /// Formatted amount still missing for free shipping, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_shipping_gap: Option<String>,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.items().iter().map(CartLineView::from).collect(),
            item_count: cart.item_count(),
            subtotal: totals.subtotal.display(),
            shipping: totals.shipping.display(),
            total: totals.total.display(),
            free_shipping_gap: totals.free_shipping_gap.map(|gap| gap.display()),
        }
    }
}

/// Item count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Add to cart payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartPayload {
    pub product_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(flatten)]
    pub selection: VariantSelection,
}

const fn default_quantity() -> u32 {
    1
}

/// Update cart payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartPayload {
    pub product_id: String,
    pub quantity: u32,
    #[serde(flatten)]
    pub selection: VariantSelection,
}

/// Remove from cart payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartPayload {
    pub product_id: String,
    #[serde(flatten)]
    pub selection: VariantSelection,
}

/// Display the cart with computed totals.
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let cart = state.cart_service().snapshot().await;
    Json(CartView::from(&cart))
}

/// Add a product to the cart.
///
/// The product is resolved from the catalog; an existing line with the same
/// variant key is incremented.
pub async fn add(
    State(state): State<AppState>,
    Json(payload): Json<AddToCartPayload>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .product(&ProductId::new(payload.product_id))
        .ok_or_else(|| AppError::NotFound("product".to_string()))?
        .clone();

    let cart = state
        .cart_service()
        .add(product, payload.quantity, payload.selection)
        .await?;
    Ok(Json(CartView::from(&cart)))
}

/// Set a line's quantity; zero removes the line entirely.
pub async fn update(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCartPayload>,
) -> Result<Json<CartView>> {
    let key = LineKey::new(ProductId::new(payload.product_id), payload.selection);
    let cart = state
        .cart_service()
        .update_quantity(&key, payload.quantity)
        .await?;
    Ok(Json(CartView::from(&cart)))
}

/// Remove a line from the cart.
pub async fn remove(
    State(state): State<AppState>,
    Json(payload): Json<RemoveFromCartPayload>,
) -> Result<Json<CartView>> {
    let key = LineKey::new(ProductId::new(payload.product_id), payload.selection);
    let cart = state.cart_service().remove(&key).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartView>> {
    state.cart_service().clear().await.map_err(AppError::from)?;
    let cart = state.cart_service().snapshot().await;
    Ok(Json(CartView::from(&cart)))
}

/// Item count badge.
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let cart = state.cart_service().snapshot().await;
    Json(CartCount {
        count: cart.item_count(),
    })
}
