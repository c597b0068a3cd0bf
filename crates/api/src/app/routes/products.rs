use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use catalog_products::{validate, ProductDraft};

use crate::app::dto;
use crate::app::errors::{self, ApiError};
use crate::app::services::AppServices;

pub const PRODUCTS_PATH: &str = "/products";

pub fn router() -> Router {
    Router::new().route(PRODUCTS_PATH, post(create_product).get(list_products))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return errors::api_error_to_response(
                ApiError::MalformedRequest(rejection.body_text()),
                PRODUCTS_PATH,
            );
        }
    };

    let details = match validate(&ProductDraft::from(body)) {
        Ok(d) => d,
        Err(e) => return errors::api_error_to_response(e.into(), PRODUCTS_PATH),
    };

    let id = match services.catalog().create(details) {
        Ok(id) => id,
        Err(e) => return errors::api_error_to_response(e.into(), PRODUCTS_PATH),
    };

    tracing::info!(product_id = %id, "product created");

    (StatusCode::CREATED, Json(dto::ProductCreatedResponse { id })).into_response()
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ListProductsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => {
            return errors::api_error_to_response(
                ApiError::InvalidQuery(rejection.body_text()),
                PRODUCTS_PATH,
            );
        }
    };

    let filter = match query.filter() {
        Ok(f) => f,
        Err(e) => {
            return errors::api_error_to_response(ApiError::InvalidQuery(e.to_string()), PRODUCTS_PATH);
        }
    };

    match services.catalog().list(filter) {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::api_error_to_response(e.into(), PRODUCTS_PATH),
    }
}
