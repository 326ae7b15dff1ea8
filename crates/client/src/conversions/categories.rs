//! Category conversion functions.

use serde_json::Value;

use caphe_core::CategoryId;

use crate::types::Category;

use super::{pick_string, value_as_i64};

/// Resolve a category reference to its scalar id.
///
/// This is the single place where the three wire shapes - a scalar number,
/// a numeric string, and an embedded `{"id": ...}` object - collapse into
/// one representation. Every consumer that compares category identity
/// (list rendering, filter matching, form population) must go through here;
/// comparing raw wire values silently fails on string/number mismatches.
#[must_use]
pub fn resolve_category_id(value: &Value) -> Option<CategoryId> {
    let scalar = match value {
        Value::Object(map) => map.get("id")?,
        other => other,
    };
    value_as_i64(scalar).map(CategoryId::new)
}

/// Map one category record. Rows without a resolvable id are dropped.
#[must_use]
pub fn map_category(raw: &Value) -> Option<Category> {
    let id = ["category_id", "categoryID", "categoryId", "id"]
        .iter()
        .find_map(|alias| raw.get(*alias))
        .and_then(resolve_category_id)?;

    Some(Category {
        category_id: id,
        name: pick_string(raw, &["name", "categoryName", "category"]).unwrap_or_default(),
    })
}

/// Map a category collection, dropping unmappable rows.
#[must_use]
pub fn map_categories(raw: &[Value]) -> Vec<Category> {
    raw.iter().filter_map(map_category).collect()
}
