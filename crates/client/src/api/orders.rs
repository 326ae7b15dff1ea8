//! Order operations. Orders are read-only in this client.

use serde_json::Value;
use tracing::instrument;

use crate::conversions::map_orders;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::types::Order;

use super::MaybeWrapped;

impl ApiClient {
    /// Fetch all orders.
    ///
    /// # Errors
    ///
    /// Returns the normalized error for connectivity or non-2xx failures.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let path = self.config().endpoints.orders.clone();
        let raw: MaybeWrapped<Vec<Value>> = self.get_json(&path).await?;
        Ok(map_orders(&raw.into_inner()))
    }
}
