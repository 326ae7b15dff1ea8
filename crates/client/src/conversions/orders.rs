//! Order conversion functions.

use serde_json::Value;

use caphe_core::{CustomerId, OrderId, OrderStatus, PaymentMethod, Price};

use crate::types::Order;

use super::{pick_i64, pick_string, today};

/// Map one order record.
#[must_use]
pub fn map_order(raw: &Value) -> Order {
    Order {
        id: OrderId::new(pick_string(raw, &["id", "orderId"]).unwrap_or_default()),
        user_id: CustomerId::new(pick_string(raw, &["userId", "customerId"]).unwrap_or_default()),
        user_name: pick_string(raw, &["userName", "customerName", "user.name"])
            .unwrap_or_default(),
        package_name: pick_string(raw, &["packageName", "planName", "package.name"])
            .unwrap_or_default(),
        total: Price::from_vnd(pick_i64(raw, &["total", "amount", "price"]).unwrap_or(0)),
        created_at: pick_string(raw, &["createdAt", "orderDate"]).unwrap_or_else(today),
        status: OrderStatus::parse_lenient(
            &pick_string(raw, &["status"]).unwrap_or_default(),
        ),
        payment_method: PaymentMethod::parse_lenient(
            &pick_string(raw, &["paymentMethod"]).unwrap_or_default(),
        ),
    }
}

/// Map an order collection.
#[must_use]
pub fn map_orders(raw: &[Value]) -> Vec<Order> {
    raw.iter().map(map_order).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_canonical_record() {
        let order = map_order(&json!({
            "id": "ORD-2024-001",
            "userId": "USR001",
            "userName": "Nguyễn Văn An",
            "packageName": "Gói Tiêu Chuẩn",
            "total": 300_000,
            "createdAt": "2024-12-15",
            "status": "completed",
            "paymentMethod": "vnpay"
        }));
        assert_eq!(order.id, OrderId::new("ORD-2024-001"));
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.payment_method, PaymentMethod::Vnpay);
    }

    #[test]
    fn test_nested_aliases() {
        let order = map_order(&json!({
            "orderId": "ORD-2",
            "customerId": "USR002",
            "user": {"name": "Trần Thị Bình"},
            "package": {"name": "Gói Premium"},
            "amount": 450_000
        }));
        assert_eq!(order.user_name, "Trần Thị Bình");
        assert_eq!(order.package_name, "Gói Premium");
        assert_eq!(order.total.as_vnd(), 450_000);
    }

    #[test]
    fn test_unknown_enum_values_take_defaults() {
        let order = map_order(&json!({"id": "ORD-3", "status": "shipping", "paymentMethod": "momo"}));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, PaymentMethod::Other);
    }

    #[test]
    fn test_empty_record_degrades() {
        let order = map_order(&json!({}));
        assert!(order.id.is_empty());
        assert_eq!(order.total, Price::ZERO);
        assert!(!order.created_at.is_empty());
    }
}
