//! Canonical domain types, post-mapping.
//!
//! Backend payloads are loosely shaped; these are the shapes the rest of
//! the application sees after [`crate::conversions`] has run.

pub mod category;
pub mod customer;
pub mod order;
pub mod plan;
pub mod product;

pub use category::{Category, fallback_categories};
pub use customer::{Customer, CustomerDraft};
pub use order::Order;
pub use plan::{CreatePlanRequest, Plan, UpdatePlanRequest};
pub use product::{ImageUpload, Product, ProductDraft};
