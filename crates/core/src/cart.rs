//! The cart reducer: line merging, quantity updates, and totals.
//!
//! A cart line is unique by (product id, selected size, selected color,
//! selected height). Adding the same combination again increments the
//! existing line; updating a line's quantity to zero removes it entirely.
//!
//! Totals follow the store's shipping policy: a flat fee below the
//! free-shipping threshold, free at and above it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::{CurrencyCode, Price, ProductId};

/// Subtotal at and above which shipping is free.
#[must_use]
pub fn free_shipping_threshold() -> Decimal {
    Decimal::new(299, 0)
}

/// Flat shipping fee below the free-shipping threshold.
#[must_use]
pub fn shipping_fee() -> Decimal {
    Decimal::new(2990, 2)
}

/// Errors from cart mutations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantity must be a positive integer.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
}

/// Variant attributes chosen when adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariantSelection {
    pub size: Option<String>,
    pub color: Option<String>,
    pub height: Option<String>,
}

impl VariantSelection {
    /// A selection with no variant attributes.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            size: None,
            color: None,
            height: None,
        }
    }
}

/// The uniqueness key of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub selection: VariantSelection,
}

impl LineKey {
    /// Build a key from a product id and variant selection.
    #[must_use]
    pub const fn new(product_id: ProductId, selection: VariantSelection) -> Self {
        Self {
            product_id,
            selection,
        }
    }
}

/// One cart line: a product, a positive quantity, and the selected variant.
///
/// The full product record is embedded so the persisted document is
/// self-contained (prices and names survive catalog changes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_height: Option<String>,
}

impl CartItem {
    /// The line's uniqueness key.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(
            self.product.id.clone(),
            VariantSelection {
                size: self.selected_size.clone(),
                color: self.selected_color.clone(),
                height: self.selected_height.clone(),
            },
        )
    }

    /// Whether this line matches the given key.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id
            && self.selected_size == key.selection.size
            && self.selected_color == key.selection.color
            && self.selected_height == key.selection.height
    }

    /// price × quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.amount * Decimal::from(self.quantity)
    }
}

/// Computed cart totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    pub subtotal: Price,
    pub shipping: Price,
    pub total: Price,
    /// Remaining subtotal to reach free shipping; `None` when already free
    /// (or the cart is empty).
    pub free_shipping_gap: Option<Price>,
}

/// The cart: an ordered list of unique lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from persisted lines.
    ///
    /// Enforces the invariants the reducer maintains: zero-quantity lines
    /// are dropped and duplicate variant keys are merged by summing.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            let key = item.key();
            match cart.items.iter_mut().find(|line| line.matches(&key)) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of a product with the given variant selection.
    ///
    /// An existing line with the same (product, size, color, height) key is
    /// incremented, saturating at `u32::MAX`; otherwise a new line is
    /// appended.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] when `quantity` is zero.
    pub fn add(
        &mut self,
        product: Product,
        quantity: u32,
        selection: VariantSelection,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        let key = LineKey::new(product.id.clone(), selection.clone());
        if let Some(line) = self.items.iter_mut().find(|line| line.matches(&key)) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem {
                product,
                quantity,
                selected_size: selection.size,
                selected_color: selection.color,
                selected_height: selection.height,
            });
        }
        Ok(())
    }

    /// Set the quantity of the line with the given key.
    ///
    /// A quantity of zero removes the line entirely. Returns `false` when no
    /// line matches the key.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(key);
        }
        match self.items.iter_mut().find(|line| line.matches(key)) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove the line with the given key. Returns `false` when absent.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|line| !line.matches(key));
        self.items.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Σ price × quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// The currency of the cart's lines (catalog prices share one currency).
    #[must_use]
    pub fn currency(&self) -> CurrencyCode {
        self.items
            .first()
            .map_or_else(CurrencyCode::default, |line| line.product.price.currency)
    }

    /// Compute subtotal, shipping, and total.
    ///
    /// Shipping is free at and above [`free_shipping_threshold`], and an
    /// empty cart ships nothing.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let currency = self.currency();
        let subtotal = self.subtotal();
        let shipping = if self.is_empty() || subtotal >= free_shipping_threshold() {
            Decimal::ZERO
        } else {
            shipping_fee()
        };
        let free_shipping_gap = if self.is_empty() || subtotal >= free_shipping_threshold() {
            None
        } else {
            Some(Price::new(free_shipping_threshold() - subtotal, currency))
        };
        CartTotals {
            subtotal: Price::new(subtotal, currency),
            shipping: Price::new(shipping, currency),
            total: Price::new(subtotal + shipping, currency),
            free_shipping_gap,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::product::Specifications;
    use crate::types::CategoryId;

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::brl(price.parse().unwrap()),
            category: CategoryId::new("capacetes"),
            images: Vec::new(),
            rating: 4.5,
            review_count: 10,
            in_stock: true,
            specifications: Some(Specifications {
                size: vec!["M".to_owned(), "G".to_owned()],
                ..Specifications::default()
            }),
        }
    }

    fn size(s: &str) -> VariantSelection {
        VariantSelection {
            size: Some(s.to_owned()),
            ..VariantSelection::none()
        }
    }

    fn key(id: &str, selection: VariantSelection) -> LineKey {
        LineKey::new(ProductId::new(id), selection)
    }

    #[test]
    fn test_add_same_variant_merges_line() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), 1, size("M")).unwrap();
        cart.add(product("1", "100"), 2, size("M")).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_different_variant_appends_line() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), 1, size("M")).unwrap();
        cart.add(product("1", "100"), 1, size("G")).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_merge_saturates_at_max_quantity() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), u32::MAX, size("M")).unwrap();
        cart.add(product("1", "100"), 1, size("M")).unwrap();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_add_zero_quantity_rejected() {
        let mut cart = Cart::new();
        let err = cart.add(product("1", "100"), 0, size("M")).unwrap_err();
        assert_eq!(err, CartError::ZeroQuantity);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), 2, size("M")).unwrap();

        assert!(cart.update_quantity(&key("1", size("M")), 5));
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), 1, size("M")).unwrap();

        assert!(cart.update_quantity(&key("1", size("M")), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_line_is_reported() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), 1, size("M")).unwrap();

        assert!(!cart.update_quantity(&key("1", size("G")), 2));
        assert!(!cart.update_quantity(&key("2", size("M")), 2));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_addresses_exact_variant() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), 1, size("M")).unwrap();
        cart.add(product("1", "100"), 1, size("G")).unwrap();

        assert!(cart.remove(&key("1", size("M"))));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].selected_size.as_deref(), Some("G"));
        assert!(!cart.remove(&key("1", size("M"))));
    }

    #[test]
    fn test_subtotal_sums_price_times_quantity() {
        let mut cart = Cart::new();
        cart.add(product("1", "89.90"), 2, size("M")).unwrap();
        cart.add(product("2", "45.50"), 1, VariantSelection::none())
            .unwrap();

        assert_eq!(cart.subtotal(), "225.30".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_shipping_below_threshold() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), 1, VariantSelection::none())
            .unwrap();

        let totals = cart.totals();
        assert_eq!(totals.shipping.amount, shipping_fee());
        assert_eq!(totals.total.amount, "129.90".parse::<Decimal>().unwrap());
        assert_eq!(
            totals.free_shipping_gap.unwrap().amount,
            "199".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn test_shipping_free_at_threshold() {
        let mut cart = Cart::new();
        cart.add(product("1", "299"), 1, VariantSelection::none())
            .unwrap();

        let totals = cart.totals();
        assert_eq!(totals.shipping.amount, Decimal::ZERO);
        assert_eq!(totals.total.amount, "299".parse::<Decimal>().unwrap());
        assert!(totals.free_shipping_gap.is_none());
    }

    #[test]
    fn test_shipping_free_above_threshold() {
        let mut cart = Cart::new();
        cart.add(product("1", "350"), 1, VariantSelection::none())
            .unwrap();

        assert_eq!(cart.totals().shipping.amount, Decimal::ZERO);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = Cart::new().totals();
        assert_eq!(totals.subtotal.amount, Decimal::ZERO);
        assert_eq!(totals.shipping.amount, Decimal::ZERO);
        assert_eq!(totals.total.amount, Decimal::ZERO);
        assert!(totals.free_shipping_gap.is_none());
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"), 3, size("M")).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_from_items_enforces_invariants() {
        let make = |quantity| CartItem {
            product: product("1", "100"),
            quantity,
            selected_size: Some("M".to_owned()),
            selected_color: None,
            selected_height: None,
        };
        let cart = Cart::from_items(vec![make(1), make(2), make(0)]);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);

        // Persisted duplicates merge by saturation rather than wrapping
        let cart = Cart::from_items(vec![make(u32::MAX), make(2)]);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_item_serde_roundtrip() {
        let item = CartItem {
            product: product("1", "100"),
            quantity: 2,
            selected_size: Some("M".to_owned()),
            selected_color: None,
            selected_height: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["selectedSize"], "M");
        assert!(json.get("selectedColor").is_none());

        let parsed: CartItem = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, item);
    }
}
