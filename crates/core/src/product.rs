//! Catalog records: products, categories, and variant specifications.
//!
//! Products are immutable records sourced from the static in-memory catalog.
//! Serialized field names are camelCase because the persisted cart document
//! embeds full product records and keeps the shape the web client wrote.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: CategoryId,
    pub images: Vec<String>,
    /// Average review rating, 0.0 to 5.0.
    pub rating: f32,
    pub review_count: u32,
    pub in_stock: bool,
    /// Variant attributes and physical specs, when the product has them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<Specifications>,
}

impl Product {
    /// Whether adding this product to the cart requires a size selection.
    #[must_use]
    pub fn requires_size(&self) -> bool {
        self.specifications
            .as_ref()
            .is_some_and(|s| !s.size.is_empty())
    }

    /// Whether adding this product to the cart requires a color selection.
    #[must_use]
    pub fn requires_color(&self) -> bool {
        self.specifications
            .as_ref()
            .is_some_and(|s| !s.color.is_empty())
    }

    /// Whether adding this product to the cart requires a height selection.
    #[must_use]
    pub fn requires_height(&self) -> bool {
        self.specifications
            .as_ref()
            .is_some_and(|s| !s.height.is_empty())
    }
}

/// Optional product specifications: selectable variant lists plus fixed
/// physical attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Specifications {
    /// Selectable sizes (e.g. "P", "M", "G", "56", "58").
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub size: Vec<String>,
    /// Selectable colors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub color: Vec<String>,
    /// Selectable heights (e.g. windshield heights).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub height: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

/// A catalog category shown in the storefront sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Emoji or icon identifier rendered by the client.
    pub icon: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<String>,
}
