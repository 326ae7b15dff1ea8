//! Order entity (read-only in this client).

use serde::{Deserialize, Serialize};

use caphe_core::{CustomerId, OrderId, OrderStatus, PaymentMethod, Price};

/// A subscription purchase, post-mapping. The admin UI only reads orders;
/// there is no create/update/delete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: CustomerId,
    pub user_name: String,
    pub package_name: String,
    pub total: Price,
    /// Order date as the backend formats it; display and bucketing only.
    pub created_at: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
}
