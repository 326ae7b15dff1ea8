//! Subscription plan ("package") entity and request payloads.

use serde::{Deserialize, Serialize};

use caphe_core::{PlanId, Price, ProductId};

/// A purchasable subscription tier tied to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub plan_id: PlanId,
    pub name: String,
    pub description: String,
    pub product_id: Option<ProductId>,
    pub product_name: String,
    pub image_url: String,
    pub price: Price,
    /// Authoritative plan length.
    pub duration_days: i64,
    /// Cups redeemable per day.
    pub daily_quota: i64,
    /// Cups redeemable in a single visit.
    pub max_per_visit: i64,
    pub active: bool,
}

impl Plan {
    /// Plan length in months, rounded up. Display-only and lossy;
    /// `duration_days` stays authoritative.
    #[must_use]
    pub const fn duration_months(&self) -> i64 {
        (self.duration_days + 29) / 30
    }
}

/// Payload for creating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    pub name: String,
    pub description: String,
    pub product_id: ProductId,
    pub price: Price,
    pub duration_days: i64,
    pub daily_quota: i64,
    pub max_per_visit: i64,
    pub active: bool,
}

/// Payload for updating a plan; absent fields stay untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_quota: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_per_visit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(duration_days: i64) -> Plan {
        Plan {
            plan_id: PlanId::new(1),
            name: "Gói Cơ Bản".to_owned(),
            description: String::new(),
            product_id: None,
            product_name: String::new(),
            image_url: String::new(),
            price: Price::from_vnd(150_000),
            duration_days,
            daily_quota: 2,
            max_per_visit: 1,
            active: true,
        }
    }

    #[test]
    fn test_duration_months_rounds_up() {
        assert_eq!(plan(30).duration_months(), 1);
        assert_eq!(plan(31).duration_months(), 2);
        assert_eq!(plan(45).duration_months(), 2);
        assert_eq!(plan(90).duration_months(), 3);
        assert_eq!(plan(1).duration_months(), 1);
    }

    #[test]
    fn test_update_request_skips_absent_fields() {
        let req = UpdatePlanRequest {
            price: Some(Price::from_vnd(300_000)),
            ..UpdatePlanRequest::default()
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json, serde_json::json!({"price": 300_000}));
    }
}
