//! Category operations.

use serde_json::Value;
use tracing::instrument;

use crate::conversions::map_categories;
use crate::http::ApiClient;
use crate::types::{Category, fallback_categories};

use super::MaybeWrapped;

const CACHE_KEY: &str = "all";

impl ApiClient {
    /// Fetch the category reference data.
    ///
    /// Categories change rarely, so successful responses are cached for a
    /// few minutes. When the endpoint is unavailable the fixed fallback
    /// list is returned (and not cached), keeping category pickers usable.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Vec<Category> {
        if let Some(cached) = self.category_cache().get(CACHE_KEY).await {
            return cached;
        }

        let path = self.config().endpoints.categories.clone();
        match self.get_json::<MaybeWrapped<Vec<Value>>>(&path).await {
            Ok(raw) => {
                let categories = map_categories(&raw.into_inner());
                self.category_cache()
                    .insert(CACHE_KEY, categories.clone())
                    .await;
                categories
            }
            Err(err) => {
                tracing::warn!(error = %err, "categories endpoint unavailable, using fallback list");
                fallback_categories()
            }
        }
    }

    /// Drop the cached category list (after an out-of-band change).
    pub async fn invalidate_categories(&self) {
        self.category_cache().invalidate(CACHE_KEY).await;
    }
}
