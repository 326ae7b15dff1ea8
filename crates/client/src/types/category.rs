//! Category reference data.

use serde::{Deserialize, Serialize};

use caphe_core::CategoryId;

/// A product category. Read-mostly reference data used to resolve product
/// category labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
}

/// Fixed category list used when the categories endpoint is unavailable.
#[must_use]
pub fn fallback_categories() -> Vec<Category> {
    [(1, "Cà phê"), (2, "Trà"), (3, "Đồ uống đá"), (4, "Khác")]
        .into_iter()
        .map(|(id, name)| Category {
            category_id: CategoryId::new(id),
            name: name.to_owned(),
        })
        .collect()
}
