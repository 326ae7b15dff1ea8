//! Plan conversion functions.

use serde_json::Value;

use caphe_core::{PlanId, Price, ProductId};

use crate::types::Plan;

use super::{pick_bool, pick_i64, pick_string};

/// Map one plan record.
#[must_use]
pub fn map_plan(raw: &Value) -> Plan {
    Plan {
        plan_id: PlanId::new(pick_i64(raw, &["planId", "id"]).unwrap_or(0)),
        name: pick_string(raw, &["name"]).unwrap_or_default(),
        description: pick_string(raw, &["description"]).unwrap_or_default(),
        product_id: pick_i64(raw, &["productId", "product_id"]).map(ProductId::new),
        product_name: pick_string(raw, &["productName", "product_name"]).unwrap_or_default(),
        image_url: pick_string(raw, &["imageUrl", "image_url"]).unwrap_or_default(),
        price: Price::from_vnd(pick_i64(raw, &["price"]).unwrap_or(0)),
        duration_days: pick_i64(raw, &["durationDays", "duration_days"]).unwrap_or(0),
        daily_quota: pick_i64(raw, &["dailyQuota", "daily_quota"]).unwrap_or(0),
        max_per_visit: pick_i64(raw, &["maxPerVisit", "max_per_visit"]).unwrap_or(0),
        active: pick_bool(raw, &["active", "isActive"]).unwrap_or(false),
    }
}

/// Map a plan collection.
#[must_use]
pub fn map_plans(raw: &[Value]) -> Vec<Plan> {
    raw.iter().map(map_plan).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_canonical_record() {
        let plan = map_plan(&json!({
            "planId": 2,
            "name": "Gói Tiêu Chuẩn",
            "description": "Gói phổ biến nhất",
            "productId": 5,
            "productName": "Cà phê sữa",
            "imageUrl": "https://img/p2.jpg",
            "price": 300_000,
            "durationDays": 30,
            "dailyQuota": 2,
            "maxPerVisit": 1,
            "active": true
        }));
        assert_eq!(plan.plan_id, PlanId::new(2));
        assert_eq!(plan.product_id, Some(ProductId::new(5)));
        assert_eq!(plan.duration_months(), 1);
        assert!(plan.active);
    }

    #[test]
    fn test_snake_case_aliases() {
        let plan = map_plan(&json!({
            "id": 7,
            "image_url": "x.jpg",
            "duration_days": 45,
            "daily_quota": 3,
            "max_per_visit": 2
        }));
        assert_eq!(plan.plan_id, PlanId::new(7));
        assert_eq!(plan.image_url, "x.jpg");
        assert_eq!(plan.duration_days, 45);
        assert_eq!(plan.duration_months(), 2);
    }

    #[test]
    fn test_empty_record_degrades() {
        let plan = map_plan(&json!({}));
        assert_eq!(plan.plan_id, PlanId::new(0));
        assert_eq!(plan.price, Price::ZERO);
        assert!(!plan.active);
    }
}
