//! Offline demo data.
//!
//! Environments without a wired backend (showrooms, local UI work) still
//! need believable customers, packages and orders. This store seeds a small
//! Vietnamese data set on first use and persists edits through the same
//! key-value store as the rest of the client state, so the demo survives
//! restarts.

use serde::{Deserialize, Serialize};

use caphe_core::{CustomerId, CustomerStatus, OrderStatus, PaymentMethod, Price};

use crate::storage::StorageService;
use crate::types::{Customer, CustomerDraft, Order};

const USERS_KEY: &str = "users";
const PACKAGES_KEY: &str = "packages";
const ORDERS_KEY: &str = "orders";

/// A demo subscription package. Kept simpler than the backend [`crate::types::Plan`]:
/// the demo predates per-product plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoPackage {
    pub id: String,
    pub name: String,
    pub price: Price,
    /// Months.
    pub duration: i64,
    pub description: String,
    pub features: Vec<String>,
    pub is_popular: bool,
}

/// Persisted demo collections.
#[derive(Debug, Clone)]
pub struct DemoStore {
    storage: StorageService,
}

impl DemoStore {
    /// Wrap a storage service.
    #[must_use]
    pub fn new(storage: StorageService) -> Self {
        Self { storage }
    }

    /// Demo customers, seeding on first access.
    #[must_use]
    pub fn customers(&self) -> Vec<Customer> {
        self.storage
            .get_item(USERS_KEY)
            .unwrap_or_else(|| self.persist_customers(seed_customers()))
    }

    /// Demo packages, seeding on first access.
    #[must_use]
    pub fn packages(&self) -> Vec<DemoPackage> {
        self.storage.get_item(PACKAGES_KEY).unwrap_or_else(|| {
            let seeded = seed_packages();
            self.storage.set_item(PACKAGES_KEY, &seeded, None);
            seeded
        })
    }

    /// Demo orders, seeding on first access.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.storage.get_item(ORDERS_KEY).unwrap_or_else(|| {
            let seeded = seed_orders();
            self.storage.set_item(ORDERS_KEY, &seeded, None);
            seeded
        })
    }

    /// Add a customer with a generated `USRnnn` id and today's date.
    pub fn add_customer(&self, draft: &CustomerDraft) -> Customer {
        let mut customers = self.customers();
        let customer = Customer {
            id: CustomerId::new(format!("USR{:03}", customers.len() + 1)),
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            registered_at: chrono::Utc::now().date_naive().to_string(),
            status: draft.status,
        };
        customers.push(customer.clone());
        self.persist_customers(customers);
        customer
    }

    /// Update a customer in place; a missing id is a no-op returning `None`.
    pub fn update_customer(&self, id: &CustomerId, draft: &CustomerDraft) -> Option<Customer> {
        let mut customers = self.customers();
        let found = customers.iter_mut().find(|c| &c.id == id)?;
        found.name = draft.name.clone();
        found.email = draft.email.clone();
        found.phone = draft.phone.clone();
        found.status = draft.status;
        let updated = found.clone();
        self.persist_customers(customers);
        Some(updated)
    }

    /// Remove a customer. Removing an unknown id is a no-op.
    pub fn delete_customer(&self, id: &CustomerId) {
        let mut customers = self.customers();
        customers.retain(|c| &c.id != id);
        self.persist_customers(customers);
    }

    fn persist_customers(&self, customers: Vec<Customer>) -> Vec<Customer> {
        self.storage.set_item(USERS_KEY, &customers, None);
        customers
    }
}

fn seed_customers() -> Vec<Customer> {
    let rows = [
        ("USR001", "Nguyễn Văn An", "nguyenvanan@email.com", "0901234567", "2024-11-15", CustomerStatus::Active),
        ("USR002", "Trần Thị Bình", "tranthibinh@email.com", "0912345678", "2024-11-12", CustomerStatus::Active),
        ("USR003", "Lê Minh Cường", "leminhcuong@email.com", "0923456789", "2024-11-08", CustomerStatus::Inactive),
        ("USR004", "Phạm Thu Dung", "phamthudung@email.com", "0934567890", "2024-11-05", CustomerStatus::Active),
        ("USR005", "Hoàng Văn Em", "hoangvanem@email.com", "0945678901", "2024-11-02", CustomerStatus::Active),
    ];
    rows.into_iter()
        .map(|(id, name, email, phone, registered_at, status)| Customer {
            id: CustomerId::new(id),
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
            registered_at: registered_at.to_owned(),
            status,
        })
        .collect()
}

fn seed_packages() -> Vec<DemoPackage> {
    vec![
        DemoPackage {
            id: "PKG001".to_owned(),
            name: "Gói Cơ Bản".to_owned(),
            price: Price::from_vnd(150_000),
            duration: 1,
            description: "Gói cà phê cơ bản cho người mới bắt đầu".to_owned(),
            features: vec![
                "2 túi cà phê/tháng".to_owned(),
                "Giao hàng miễn phí".to_owned(),
                "Hủy bất kỳ lúc nào".to_owned(),
            ],
            is_popular: false,
        },
        DemoPackage {
            id: "PKG002".to_owned(),
            name: "Gói Tiêu Chuẩn".to_owned(),
            price: Price::from_vnd(300_000),
            duration: 1,
            description: "Gói phổ biến nhất cho người yêu cà phê".to_owned(),
            features: vec![
                "4 túi cà phê/tháng".to_owned(),
                "Giao hàng miễn phí".to_owned(),
                "Quà tặng hàng tháng".to_owned(),
            ],
            is_popular: true,
        },
        DemoPackage {
            id: "PKG003".to_owned(),
            name: "Gói Premium".to_owned(),
            price: Price::from_vnd(450_000),
            duration: 1,
            description: "Trải nghiệm cà phê cao cấp".to_owned(),
            features: vec![
                "6 túi cà phê premium/tháng".to_owned(),
                "Giao hàng nhanh".to_owned(),
                "Hỗ trợ 24/7".to_owned(),
            ],
            is_popular: false,
        },
        DemoPackage {
            id: "PKG004".to_owned(),
            name: "Gói VIP".to_owned(),
            price: Price::from_vnd(600_000),
            duration: 1,
            description: "Dành cho tín đồ cà phê chuyên nghiệp".to_owned(),
            features: vec![
                "8 túi cà phê đặc biệt/tháng".to_owned(),
                "Giao hàng trong ngày".to_owned(),
                "Workshop miễn phí".to_owned(),
            ],
            is_popular: false,
        },
    ]
}

fn seed_orders() -> Vec<Order> {
    let rows = [
        ("ORD-2024-001", "USR001", "Nguyễn Văn An", "Gói Tiêu Chuẩn", 300_000, "2024-12-15", OrderStatus::Completed, PaymentMethod::Vnpay),
        ("ORD-2024-002", "USR002", "Trần Thị Bình", "Gói Premium", 450_000, "2024-12-14", OrderStatus::Pending, PaymentMethod::Card),
        ("ORD-2024-003", "USR003", "Lê Minh Cường", "Gói Cơ Bản", 150_000, "2024-12-13", OrderStatus::Completed, PaymentMethod::Vnpay),
        ("ORD-2024-004", "USR004", "Phạm Thu Dung", "Gói VIP", 600_000, "2024-12-12", OrderStatus::Completed, PaymentMethod::Other),
        ("ORD-2024-005", "USR005", "Hoàng Văn Em", "Gói Tiêu Chuẩn", 300_000, "2024-12-11", OrderStatus::Cancelled, PaymentMethod::Card),
    ];
    rows.into_iter()
        .map(
            |(id, user_id, user_name, package, total, created_at, status, method)| Order {
                id: caphe_core::OrderId::new(id),
                user_id: CustomerId::new(user_id),
                user_name: user_name.to_owned(),
                package_name: package.to_owned(),
                total: Price::from_vnd(total),
                created_at: created_at.to_owned(),
                status,
                payment_method: method,
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_demo(tag: &str) -> DemoStore {
        let dir = std::env::temp_dir().join(format!("caphe-demo-{tag}-{}", uuid::Uuid::new_v4()));
        DemoStore::new(StorageService::new(dir, "caphe-admin-"))
    }

    #[test]
    fn test_seeds_on_first_access() {
        let demo = temp_demo("seed");
        assert_eq!(demo.customers().len(), 5);
        assert_eq!(demo.packages().len(), 4);
        assert_eq!(demo.orders().len(), 5);
    }

    #[test]
    fn test_add_customer_generates_sequential_id() {
        let demo = temp_demo("add");
        let created = demo.add_customer(&CustomerDraft {
            name: "Võ Thị Sáu".to_owned(),
            email: "sau@email.com".to_owned(),
            phone: "0956789012".to_owned(),
            status: CustomerStatus::Active,
        });
        assert_eq!(created.id, CustomerId::new("USR006"));
        assert_eq!(demo.customers().len(), 6);
    }

    #[test]
    fn test_update_and_delete_customer() {
        let demo = temp_demo("update");
        let id = CustomerId::new("USR001");

        let updated = demo
            .update_customer(
                &id,
                &CustomerDraft {
                    name: "Nguyễn Văn An (VIP)".to_owned(),
                    email: "an@email.com".to_owned(),
                    phone: "0901234567".to_owned(),
                    status: CustomerStatus::Active,
                },
            )
            .expect("customer exists");
        assert_eq!(updated.name, "Nguyễn Văn An (VIP)");

        demo.delete_customer(&id);
        assert!(demo.customers().iter().all(|c| c.id != id));

        let missing = demo.update_customer(&CustomerId::new("USR999"), &CustomerDraft::default());
        assert!(missing.is_none());
    }

    #[test]
    fn test_edits_persist_across_store_instances() {
        let dir = std::env::temp_dir().join(format!("caphe-demo-persist-{}", uuid::Uuid::new_v4()));
        let first = DemoStore::new(StorageService::new(dir.clone(), "caphe-admin-"));
        first.delete_customer(&CustomerId::new("USR002"));

        let second = DemoStore::new(StorageService::new(dir, "caphe-admin-"));
        assert_eq!(second.customers().len(), 4);
    }
}
