//! Customer operations.

use serde_json::Value;
use tracing::instrument;

use caphe_core::CustomerId;

use crate::conversions::{map_customer, map_customers};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::types::{Customer, CustomerDraft};

use super::MaybeWrapped;

impl ApiClient {
    /// Fetch all customers.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let path = self.config().endpoints.customers.clone();
        let raw: MaybeWrapped<Vec<Value>> = self.get_json(&path).await?;
        Ok(map_customers(&raw.into_inner()))
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create_customer(&self, draft: &CustomerDraft) -> Result<Customer, ApiError> {
        let path = self.config().endpoints.customers.clone();
        let raw: MaybeWrapped<Value> = self.post_json(&path, draft).await?;
        Ok(map_customer(&raw.into_inner()))
    }

    /// Update a customer.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self, draft), fields(id = %id))]
    pub async fn update_customer(
        &self,
        id: &CustomerId,
        draft: &CustomerDraft,
    ) -> Result<Customer, ApiError> {
        let path = format!("{}/{id}", self.config().endpoints.customers);
        let raw: MaybeWrapped<Value> = self.put_json(&path, draft).await?;
        Ok(map_customer(&raw.into_inner()))
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_customer(&self, id: &CustomerId) -> Result<(), ApiError> {
        let path = format!("{}/{id}", self.config().endpoints.customers);
        self.delete(&path).await
    }
}
