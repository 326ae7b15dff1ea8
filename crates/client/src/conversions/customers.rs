//! Customer conversion functions.

use serde_json::Value;

use caphe_core::{CustomerId, CustomerStatus};

use crate::types::Customer;

use super::{pick_bool, pick_string, today};

/// Map one customer record.
#[must_use]
pub fn map_customer(raw: &Value) -> Customer {
    let status_text = pick_string(raw, &["status"]).unwrap_or_default();
    let is_active = pick_bool(raw, &["isActive"]).unwrap_or(false);
    let status = if CustomerStatus::parse_lenient(&status_text) == CustomerStatus::Active
        || is_active
    {
        CustomerStatus::Active
    } else {
        CustomerStatus::Inactive
    };

    Customer {
        id: CustomerId::new(
            pick_string(raw, &["id", "userId", "customerId"]).unwrap_or_default(),
        ),
        name: pick_string(raw, &["name", "fullName", "customerName"]).unwrap_or_default(),
        email: pick_string(raw, &["email"]).unwrap_or_default(),
        phone: pick_string(raw, &["phone", "phoneNumber"]).unwrap_or_default(),
        registered_at: pick_string(raw, &["registeredAt", "createdAt"]).unwrap_or_else(today),
        status,
    }
}

/// Map a customer collection.
#[must_use]
pub fn map_customers(raw: &[Value]) -> Vec<Customer> {
    raw.iter().map(map_customer).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_canonical_record() {
        let customer = map_customer(&json!({
            "id": "USR001",
            "name": "Nguyễn Văn An",
            "email": "an@email.com",
            "phone": "0901234567",
            "registeredAt": "2024-11-15",
            "status": "active"
        }));
        assert_eq!(customer.id, CustomerId::new("USR001"));
        assert_eq!(customer.status, CustomerStatus::Active);
    }

    #[test]
    fn test_map_aliased_record() {
        let customer = map_customer(&json!({
            "customerId": 12,
            "fullName": "Trần Thị Bình",
            "phoneNumber": "0912345678",
            "createdAt": "2024-11-12",
            "isActive": true
        }));
        assert_eq!(customer.id, CustomerId::new("12"));
        assert_eq!(customer.name, "Trần Thị Bình");
        assert_eq!(customer.phone, "0912345678");
        assert_eq!(customer.registered_at, "2024-11-12");
        assert_eq!(customer.status, CustomerStatus::Active);
    }

    #[test]
    fn test_map_empty_record_degrades_to_defaults() {
        let customer = map_customer(&json!({}));
        assert!(customer.id.is_empty());
        assert_eq!(customer.status, CustomerStatus::Inactive);
        // default registration date is today, not empty
        assert!(!customer.registered_at.is_empty());
    }

    #[test]
    fn test_status_string_beats_missing_flag() {
        let customer = map_customer(&json!({"status": "inactive", "isActive": true}));
        // either signal marks the customer active
        assert_eq!(customer.status, CustomerStatus::Active);
    }
}
