use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, Entity, ProductId};

use crate::validation::{self, ProductDraft, ValidationErrors};

/// Product category. Closed set; unknown literals are rejected, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Book,
    Food,
    Gadget,
    Other,
}

impl ProductType {
    pub const ALL: [ProductType; 4] = [
        ProductType::Book,
        ProductType::Food,
        ProductType::Gadget,
        ProductType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Book => "book",
            ProductType::Food => "food",
            ProductType::Gadget => "gadget",
            ProductType::Other => "other",
        }
    }
}

impl core::fmt::Display for ProductType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    /// Exact, case-sensitive match against the wire literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown product type '{s}'")))
    }
}

/// Validated, user-supplied product attributes (everything except the id).
///
/// Only obtainable through [`validation::validate`] (or [`ProductDetails::new`],
/// which runs the same checks), so every value upholds the catalog constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetails {
    name: String,
    #[serde(rename = "type")]
    product_type: ProductType,
    inventory: u32,
    #[serde(with = "rust_decimal::serde::float")]
    cost: Decimal,
}

impl ProductDetails {
    /// Build details from typed values, applying the same checks as the validator.
    pub fn new(
        name: impl Into<String>,
        product_type: ProductType,
        inventory: i64,
        cost: Decimal,
    ) -> Result<Self, ValidationErrors> {
        let draft = ProductDraft {
            name: Some(name.into()),
            product_type: Some(product_type.as_str().to_string()),
            inventory: Some(inventory),
            cost: None,
        };
        validation::validate_with_cost(&draft, Some(cost))
    }

    pub(crate) fn from_checked(
        name: String,
        product_type: ProductType,
        inventory: u32,
        cost: Decimal,
    ) -> Self {
        Self {
            name,
            product_type,
            inventory,
            cost,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    pub fn inventory(&self) -> u32 {
        self.inventory
    }

    pub fn cost(&self) -> Decimal {
        self.cost
    }
}

/// A stored catalog product. Immutable once created by the registry.
///
/// Serializes flat: `{ "id", "name", "type", "inventory", "cost" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    #[serde(flatten)]
    details: ProductDetails,
}

impl Product {
    pub(crate) fn new(id: ProductId, details: ProductDetails) -> Self {
        Self { id, details }
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn product_type(&self) -> ProductType {
        self.details.product_type
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
