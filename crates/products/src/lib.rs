//! Products catalog domain.
//!
//! This crate contains the product model, the submission validator and the
//! in-memory registry. It has no HTTP or JSON framework concerns; the API crate
//! adapts wire requests into these plain operations.

pub mod product;
pub mod registry;
pub mod validation;

pub use product::{Product, ProductDetails, ProductType};
pub use registry::{InMemoryProductRegistry, ProductCatalog};
pub use validation::{validate, FieldError, ProductDraft, ValidationErrors};

pub use catalog_core::ProductId;
