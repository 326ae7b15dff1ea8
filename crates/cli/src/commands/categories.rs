//! Category commands.

use super::{CommandError, client};

/// List the category reference data (falls back to the fixed list when the
/// endpoint is unavailable).
pub async fn list() -> Result<(), CommandError> {
    let categories = client()?.list_categories().await;
    for category in &categories {
        tracing::info!("{:<6} {}", category.category_id, category.name);
    }
    Ok(())
}
