//! Tolerant payload mapping.
//!
//! Backend snapshots disagree on field naming (`id` vs `userId` vs
//! `customerId`, `image_url` vs `imageUrl` vs `img`, category as a scalar
//! or an embedded object), so every mapper resolves each target field
//! through an ordered alias list and substitutes a documented default when
//! every alias is absent. Mapping never fails: a malformed record degrades
//! to defaults instead of poisoning the whole collection fetch.
//!
//! Alias tables (first match wins):
//!
//! | entity   | field         | aliases                                        | default    |
//! |----------|---------------|------------------------------------------------|------------|
//! | customer | id            | `id`, `userId`, `customerId`                   | `""`       |
//! | customer | name          | `name`, `fullName`, `customerName`             | `""`       |
//! | customer | phone         | `phone`, `phoneNumber`                         | `""`       |
//! | customer | registered at | `registeredAt`, `createdAt`                    | today      |
//! | customer | status        | `status == "active"` or `isActive == true`     | inactive   |
//! | product  | id            | `productId`, `id`, `product_id`, `productID`   | position+1 |
//! | product  | image         | `image_url`, `imageUrl`, `img`                 | `""`       |
//! | product  | category      | `category_id`, `categoryID`, `categoryId`, `category` | `None` |
//! | category | id            | `category_id`, `categoryID`, `categoryId`, `id`| skip row   |
//! | category | name          | `name`, `categoryName`, `category`             | `""`       |
//! | order    | id            | `id`, `orderId`                                | `""`       |
//! | order    | user id       | `userId`, `customerId`                         | `""`       |
//! | order    | user name     | `userName`, `customerName`, `user.name`        | `""`       |
//! | order    | package       | `packageName`, `planName`, `package.name`      | `""`       |
//! | order    | total         | `total`, `amount`, `price`                     | `0`        |
//! | order    | date          | `createdAt`, `orderDate`                       | today      |
//! | plan     | id            | `planId`, `id`                                 | `0`        |
//! | plan     | image         | `imageUrl`, `image_url`                        | `""`       |
//! | plan     | duration      | `durationDays`, `duration_days`                | `0`        |

pub mod categories;
pub mod customers;
pub mod orders;
pub mod plans;
pub mod products;

pub use categories::{map_categories, map_category, resolve_category_id};
pub use customers::{map_customer, map_customers};
pub use orders::{map_order, map_orders};
pub use plans::{map_plan, map_plans};
pub use products::{map_product, map_products};

use serde_json::Value;

/// Resolve a string field through an ordered alias list.
///
/// Numbers are accepted and stringified, because several snapshots send
/// numeric ids where others send strings.
pub(crate) fn pick_string(raw: &Value, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| match lookup(raw, alias)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Resolve an integer field; numeric strings are accepted.
pub(crate) fn pick_i64(raw: &Value, aliases: &[&str]) -> Option<i64> {
    aliases.iter().find_map(|alias| {
        let value = lookup(raw, alias)?;
        value_as_i64(value)
    })
}

/// Resolve a boolean field.
pub(crate) fn pick_bool(raw: &Value, aliases: &[&str]) -> Option<bool> {
    aliases
        .iter()
        .find_map(|alias| lookup(raw, alias)?.as_bool())
}

/// Interpret a single value as an integer: a JSON number (floats truncate)
/// or a numeric string.
pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        #[allow(clippy::cast_possible_truncation)]
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Field lookup supporting one level of dotted nesting (`user.name`).
fn lookup<'a>(raw: &'a Value, alias: &str) -> Option<&'a Value> {
    match alias.split_once('.') {
        Some((outer, inner)) => raw.get(outer)?.get(inner),
        None => raw.get(alias),
    }
}

/// Today's date in ISO format, the default for absent date fields.
pub(crate) fn today() -> String {
    chrono::Utc::now().date_naive().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pick_string_alias_order() {
        let raw = json!({"customerId": "C1", "userId": "U1"});
        assert_eq!(
            pick_string(&raw, &["id", "userId", "customerId"]).as_deref(),
            Some("U1")
        );
    }

    #[test]
    fn test_pick_string_accepts_numbers() {
        let raw = json!({"id": 42});
        assert_eq!(pick_string(&raw, &["id"]).as_deref(), Some("42"));
    }

    #[test]
    fn test_pick_string_skips_empty() {
        let raw = json!({"name": "", "fullName": "Trần Thị Bình"});
        assert_eq!(
            pick_string(&raw, &["name", "fullName"]).as_deref(),
            Some("Trần Thị Bình")
        );
    }

    #[test]
    fn test_pick_i64_accepts_numeric_strings() {
        let raw = json!({"price": "45000"});
        assert_eq!(pick_i64(&raw, &["price"]), Some(45_000));
    }

    #[test]
    fn test_nested_lookup() {
        let raw = json!({"user": {"name": "Nguyễn Văn An"}});
        assert_eq!(
            pick_string(&raw, &["userName", "user.name"]).as_deref(),
            Some("Nguyễn Văn An")
        );
    }

    #[test]
    fn test_absent_everywhere_is_none() {
        let raw = json!({});
        assert_eq!(pick_string(&raw, &["a", "b"]), None);
        assert_eq!(pick_i64(&raw, &["a"]), None);
        assert_eq!(pick_bool(&raw, &["a"]), None);
    }
}
