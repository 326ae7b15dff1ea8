//! Product conversion functions.

use serde_json::Value;

use caphe_core::{Price, ProductId};

use crate::types::Product;

use super::categories::resolve_category_id;
use super::{pick_i64, pick_string};

/// Map one product record.
///
/// `position` is the record's index in the fetched collection; it seeds the
/// positional id fallback (`position + 1`) for payloads that carry no id at
/// all, so list rendering still has a stable key.
#[must_use]
pub fn map_product(raw: &Value, position: usize) -> Product {
    #[allow(clippy::cast_possible_wrap)]
    let fallback_id = position as i64 + 1;

    let category_id = ["category_id", "categoryID", "categoryId", "category"]
        .iter()
        .find_map(|alias| raw.get(*alias))
        .and_then(resolve_category_id);

    Product {
        product_id: ProductId::new(
            pick_i64(raw, &["productId", "id", "product_id", "productID"]).unwrap_or(fallback_id),
        ),
        name: pick_string(raw, &["name"]).unwrap_or_default(),
        description: pick_string(raw, &["description"]).unwrap_or_default(),
        price: Price::from_vnd(pick_i64(raw, &["price"]).unwrap_or(0)),
        image_url: pick_string(raw, &["image_url", "imageUrl", "img"]).unwrap_or_default(),
        category_id,
    }
}

/// Map a product collection.
#[must_use]
pub fn map_products(raw: &[Value]) -> Vec<Product> {
    raw.iter()
        .enumerate()
        .map(|(position, value)| map_product(value, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use caphe_core::CategoryId;
    use serde_json::json;

    #[test]
    fn test_map_canonical_record() {
        let product = map_product(
            &json!({
                "productId": 3,
                "name": "Cà phê sữa đá",
                "description": "Đậm đà",
                "price": 45_000,
                "imageUrl": "https://img/3.jpg",
                "categoryId": 1
            }),
            0,
        );
        assert_eq!(product.product_id, ProductId::new(3));
        assert_eq!(product.price.as_vnd(), 45_000);
        assert_eq!(product.category_id, Some(CategoryId::new(1)));
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let product = map_product(&json!({"id": 9, "name": "Trà đào"}), 0);
        assert_eq!(product.price, Price::ZERO);
    }

    #[test]
    fn test_embedded_category_object_unwraps() {
        let product = map_product(&json!({"id": 1, "category": {"id": 7}}), 0);
        assert_eq!(product.category_id, Some(CategoryId::new(7)));
    }

    #[test]
    fn test_unresolvable_category_is_none() {
        let product = map_product(&json!({"id": 1, "category": "Cà phê"}), 0);
        assert_eq!(product.category_id, None);
    }

    #[test]
    fn test_positional_id_fallback() {
        let products = map_products(&[json!({"name": "a"}), json!({"name": "b"})]);
        assert_eq!(
            products.iter().map(|p| p.product_id.as_i64()).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_id_alias_priority() {
        let product = map_product(&json!({"product_id": 5, "id": 4, "productId": 3}), 0);
        assert_eq!(product.product_id, ProductId::new(3));
    }

    #[test]
    fn test_image_alias_chain() {
        let product = map_product(&json!({"id": 1, "img": "x.png"}), 0);
        assert_eq!(product.image_url, "x.png");
    }
}
