//! Product operations.
//!
//! One backend iteration serves products segmented by category
//! (coffee/tea/freeze), another a unified collection; which shape applies
//! is configuration. Create and update are multipart uploads.

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::instrument;

use caphe_core::ProductId;

use crate::conversions::{map_product, map_products};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::types::{Product, ProductDraft};

use super::MaybeWrapped;

impl ApiClient {
    /// Fetch all products.
    ///
    /// With segmented endpoints configured, the segments are fetched
    /// concurrently and concatenated; a failing segment degrades to an
    /// empty slice rather than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures
    /// of the unified endpoint; segment failures are tolerated.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let endpoints = self.config().endpoints.clone();

        let raw: Vec<Value> = if endpoints.product_segments.is_empty() {
            self.get_json::<MaybeWrapped<Vec<Value>>>(&endpoints.products)
                .await?
                .into_inner()
        } else {
            let fetches = endpoints
                .product_segments
                .iter()
                .map(|path| self.fetch_segment(path));
            futures::future::join_all(fetches)
                .await
                .into_iter()
                .flatten()
                .collect()
        };

        Ok(map_products(&raw))
    }

    async fn fetch_segment(&self, path: &str) -> Vec<Value> {
        match self.get_json::<MaybeWrapped<Vec<Value>>>(path).await {
            Ok(raw) => raw.into_inner(),
            Err(err) => {
                tracing::warn!(path, error = %err, "product segment fetch failed");
                Vec::new()
            }
        }
    }

    /// Create a product from a form draft (multipart upload).
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        let path = self.config().endpoints.products.clone();
        let form = build_product_form(draft)?;
        let raw: MaybeWrapped<Value> = self.post_multipart(&path, form).await?;
        Ok(map_product(&raw.into_inner(), 0))
    }

    /// Update a product from a form draft (multipart upload).
    ///
    /// # Errors
    ///
    /// Rejects a draft without a `product_id` before any request is made;
    /// otherwise returns the normalized error for connectivity or non-2xx
    /// failures.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn update_product(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        if draft.product_id.is_none() {
            return Err(ApiError::bad_request(
                "Không thể cập nhật sản phẩm chưa có mã.",
            ));
        }

        let path = self.config().endpoints.products.clone();
        let form = build_product_form(draft)?;
        let raw: MaybeWrapped<Value> = self.put_multipart(&path, form).await?;
        Ok(map_product(&raw.into_inner(), 0))
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let path = format!("{}/{id}", self.config().endpoints.products);
        self.delete(&path).await
    }
}

/// Assemble the multipart form: `name`, `description`, `categoryId`,
/// `price`, `image` (binary), plus `productId` on update.
fn build_product_form(draft: &ProductDraft) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("name", draft.name.clone())
        .text("description", draft.description.clone())
        .text("price", draft.price.as_vnd().to_string());

    if let Some(category_id) = draft.category_id {
        form = form.text("categoryId", category_id.as_i64().to_string());
    }

    if let Some(product_id) = draft.product_id {
        form = form.text("productId", product_id.as_i64().to_string());
    }

    if let Some(image) = &draft.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime_type())
            .map_err(ApiError::unexpected)?;
        form = form.part("image", part);
    }

    Ok(form)
}
