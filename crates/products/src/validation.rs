//! Submission validator.
//!
//! Checks run in a fixed order (name, type, inventory, cost) and stop at the
//! first failure. The result type is still a list of field errors so callers
//! do not depend on the fail-fast policy.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::product::{ProductDetails, ProductType};

pub const MIN_INVENTORY: i64 = 1;
pub const MAX_INVENTORY: i64 = 9999;
pub const MIN_COST: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
pub const MAX_COST: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

const NAME_BLANK: &str = "Name is required and cannot be blank";
const TYPE_REQUIRED: &str = "Type is required";
const TYPE_UNKNOWN: &str = "Type must be one of: book, food, gadget, other";
const INVENTORY_REQUIRED: &str = "Inventory is required";
const INVENTORY_TOO_LOW: &str = "Inventory must be at least 1";
const INVENTORY_TOO_HIGH: &str = "Inventory must be at most 9999";
const COST_REQUIRED: &str = "Cost is required";
const COST_TOO_LOW: &str = "Cost must be at least 0.01";
const COST_TOO_HIGH: &str = "Cost must be at most 999999.99";

/// Candidate product fields as decoded from the wire, before any constraint
/// checks. Primitive shapes are already enforced by the decoder; presence and
/// ranges are not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub product_type: Option<String>,
    pub inventory: Option<i64>,
    /// Kept as the decoded JSON number so the decimal value is exact.
    pub cost: Option<serde_json::Number>,
}

/// One failed constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validation outcome for a rejected submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid product submission: {}", render(.0))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// The first failing field (always present).
    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }
}

fn render(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a draft, returning the checked details or the failing field.
pub fn validate(draft: &ProductDraft) -> Result<ProductDetails, ValidationErrors> {
    checked(draft, || match &draft.cost {
        Some(n) => parse_cost(n),
        None => Err(FieldError::new("cost", COST_REQUIRED)),
    })
}

/// Same checks as [`validate`], with the cost already in decimal form.
pub(crate) fn validate_with_cost(
    draft: &ProductDraft,
    cost: Option<Decimal>,
) -> Result<ProductDetails, ValidationErrors> {
    checked(draft, || cost.ok_or(FieldError::new("cost", COST_REQUIRED)))
}

fn checked(
    draft: &ProductDraft,
    cost: impl FnOnce() -> Result<Decimal, FieldError>,
) -> Result<ProductDetails, ValidationErrors> {
    first_failure(draft, cost).map_err(|e| ValidationErrors(vec![e]))
}

fn first_failure(
    draft: &ProductDraft,
    cost: impl FnOnce() -> Result<Decimal, FieldError>,
) -> Result<ProductDetails, FieldError> {
    let name = check_name(draft.name.as_deref())?;
    let product_type = check_type(draft.product_type.as_deref())?;
    let inventory = check_inventory(draft.inventory)?;
    let cost = check_cost(cost()?)?;

    Ok(ProductDetails::from_checked(name.to_string(), product_type, inventory, cost))
}

fn check_name(name: Option<&str>) -> Result<&str, FieldError> {
    match name {
        Some(n) if !n.trim().is_empty() => Ok(n),
        _ => Err(FieldError::new("name", NAME_BLANK)),
    }
}

fn check_type(raw: Option<&str>) -> Result<ProductType, FieldError> {
    let raw = raw.ok_or(FieldError::new("type", TYPE_REQUIRED))?;
    ProductType::from_str(raw).map_err(|_| FieldError::new("type", TYPE_UNKNOWN))
}

fn check_inventory(inventory: Option<i64>) -> Result<u32, FieldError> {
    let inventory = inventory.ok_or(FieldError::new("inventory", INVENTORY_REQUIRED))?;
    if inventory < MIN_INVENTORY {
        return Err(FieldError::new("inventory", INVENTORY_TOO_LOW));
    }
    if inventory > MAX_INVENTORY {
        return Err(FieldError::new("inventory", INVENTORY_TOO_HIGH));
    }
    u32::try_from(inventory).map_err(|_| FieldError::new("inventory", INVENTORY_TOO_HIGH))
}

fn check_cost(cost: Decimal) -> Result<Decimal, FieldError> {
    if cost < MIN_COST {
        return Err(FieldError::new("cost", COST_TOO_LOW));
    }
    if cost > MAX_COST {
        return Err(FieldError::new("cost", COST_TOO_HIGH));
    }
    Ok(cost)
}

/// Exact decimal from a JSON number literal.
///
/// Literals outside the decimal range (e.g. `1e300`) are necessarily outside
/// the cost range too, so they fail with the matching bound message.
fn parse_cost(number: &serde_json::Number) -> Result<Decimal, FieldError> {
    let literal = number.to_string();
    Decimal::from_str(&literal)
        .or_else(|_| Decimal::from_scientific(&literal))
        .map_err(|_| {
            if literal.starts_with('-') {
                FieldError::new("cost", COST_TOO_LOW)
            } else {
                FieldError::new("cost", COST_TOO_HIGH)
            }
        })
}
