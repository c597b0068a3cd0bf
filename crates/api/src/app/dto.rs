use serde::{Deserialize, Serialize};

use catalog_core::{DomainResult, ProductId};
use catalog_products::{ProductDraft, ProductType};

// -------------------------
// Request DTOs
// -------------------------

/// `POST /products` body.
///
/// Field types are strict: a string where a number is expected (or the
/// reverse) fails decoding instead of being coerced. Presence and ranges are
/// left to the validator, so every field is optional here.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub inventory: Option<i64>,
    pub cost: Option<serde_json::Number>,
}

impl From<CreateProductRequest> for ProductDraft {
    fn from(body: CreateProductRequest) -> Self {
        ProductDraft {
            name: body.name,
            product_type: body.product_type,
            inventory: body.inventory,
            cost: body.cost,
        }
    }
}

/// `GET /products` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

impl ListProductsQuery {
    /// Parsed type filter; unknown (or empty) literals are an error, not "no filter".
    pub fn filter(&self) -> DomainResult<Option<ProductType>> {
        self.product_type.as_deref().map(str::parse).transpose()
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub id: ProductId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_rejects_string_inventory() {
        let err = serde_json::from_str::<CreateProductRequest>(
            r#"{"name":"W","type":"book","inventory":"10","cost":1.5}"#,
        )
        .unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn create_request_rejects_float_inventory_and_string_cost() {
        assert!(
            serde_json::from_str::<CreateProductRequest>(
                r#"{"name":"W","type":"book","inventory":5.0,"cost":1.5}"#
            )
            .is_err()
        );
        assert!(
            serde_json::from_str::<CreateProductRequest>(
                r#"{"name":"W","type":"book","inventory":5,"cost":"1.5"}"#
            )
            .is_err()
        );
        assert!(
            serde_json::from_str::<CreateProductRequest>(
                r#"{"name":true,"type":"book","inventory":5,"cost":1.5}"#
            )
            .is_err()
        );
    }

    #[test]
    fn create_request_tolerates_missing_and_unknown_fields() {
        let body: CreateProductRequest =
            serde_json::from_str(r#"{"name":"W","colour":"red"}"#).unwrap();
        let draft = ProductDraft::from(body);
        assert_eq!(draft.name.as_deref(), Some("W"));
        assert!(draft.product_type.is_none());
        assert!(draft.inventory.is_none());
        assert!(draft.cost.is_none());
    }

    #[test]
    fn list_query_filter_parsing() {
        let none = ListProductsQuery::default();
        assert_eq!(none.filter().unwrap(), None);

        let book = ListProductsQuery {
            product_type: Some("book".to_string()),
        };
        assert_eq!(book.filter().unwrap(), Some(ProductType::Book));

        for bad in ["", "Book", "toy"] {
            let q = ListProductsQuery {
                product_type: Some(bad.to_string()),
            };
            assert!(q.filter().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn created_response_is_a_bare_integer_id() {
        let body = ProductCreatedResponse {
            id: ProductId::new(7),
        };
        assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({ "id": 7 }));
    }
}
