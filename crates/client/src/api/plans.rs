//! Subscription plan operations.
//!
//! Plan endpoints are the ones that wrap their payloads in a
//! `{"message", "data"}` envelope most often; every response goes through
//! [`MaybeWrapped`].

use serde_json::Value;
use tracing::instrument;

use caphe_core::PlanId;

use crate::conversions::{map_plan, map_plans};
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::types::{CreatePlanRequest, Plan, UpdatePlanRequest};

use super::MaybeWrapped;

impl ApiClient {
    /// Fetch all plans.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self))]
    pub async fn list_plans(&self) -> Result<Vec<Plan>, ApiError> {
        let path = self.config().endpoints.plans.clone();
        let raw: MaybeWrapped<Vec<Value>> = self.get_json(&path).await?;
        Ok(map_plans(&raw.into_inner()))
    }

    /// Fetch one plan by id.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_plan(&self, id: PlanId) -> Result<Plan, ApiError> {
        let path = format!("{}/{id}", self.config().endpoints.plans);
        let raw: MaybeWrapped<Value> = self.get_json(&path).await?;
        Ok(map_plan(&raw.into_inner()))
    }

    /// Create a plan.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_plan(&self, request: &CreatePlanRequest) -> Result<Plan, ApiError> {
        let path = self.config().endpoints.plans.clone();
        let raw: MaybeWrapped<Value> = self.post_json(&path, request).await?;
        Ok(map_plan(&raw.into_inner()))
    }

    /// Update a plan; absent fields stay untouched.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self, request), fields(id = %id))]
    pub async fn update_plan(
        &self,
        id: PlanId,
        request: &UpdatePlanRequest,
    ) -> Result<Plan, ApiError> {
        let path = format!("{}/{id}", self.config().endpoints.plans);
        let raw: MaybeWrapped<Value> = self.put_json(&path, request).await?;
        Ok(map_plan(&raw.into_inner()))
    }

    /// Delete a plan.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_plan(&self, id: PlanId) -> Result<(), ApiError> {
        let path = format!("{}/{id}", self.config().endpoints.plans);
        self.delete(&path).await
    }

    /// Flip a plan's active flag.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn toggle_plan(&self, id: PlanId) -> Result<Plan, ApiError> {
        let path = format!("{}/{id}/toggle-status", self.config().endpoints.plans);
        let raw: MaybeWrapped<Value> = self.patch_json(&path).await?;
        Ok(map_plan(&raw.into_inner()))
    }

    /// Deactivate a plan without touching its other fields.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn deactivate_plan(&self, id: PlanId) -> Result<(), ApiError> {
        let path = format!("{}/{id}/deactivate", self.config().endpoints.plans);
        self.put_unit(&path).await
    }
}
