//! Product entity
//!
//! The JSON form uses camelCase field names (`productType`, `unitPrice`).
//! Every field is nullable: absent fields deserialize to `None` and are
//! serialized back as `null`.

use serde::{Deserialize, Serialize};

/// Primary key of a product, assigned by the repository on insert.
pub type ProductId = i64;

/// A product record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Storage-assigned identifier (`None` until first saved)
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Short type code, e.g. "EL"
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

impl Product {
    /// Create an unsaved product with every field populated.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        product_type: impl Into<String>,
        quantity: i32,
        unit_price: f64,
    ) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            description: Some(description.into()),
            product_type: Some(product_type.into()),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }

    /// Returns a copy carrying the given id.
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Overwrites every non-id field with the values from `other`.
    ///
    /// Absent values in `other` clear the corresponding field. The id is
    /// never touched.
    pub fn overwrite_fields(&mut self, other: Product) {
        self.name = other.name;
        self.description = other.description;
        self.product_type = other.product_type;
        self.quantity = other.quantity;
        self.unit_price = other.unit_price;
    }
}
