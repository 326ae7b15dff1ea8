//! Customer entity.

use serde::{Deserialize, Serialize};

use caphe_core::{CustomerId, CustomerStatus};

/// A café customer, post-mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Registration date as the backend formats it (`2024-11-15` or
    /// `15/11/2024` depending on the snapshot); display-only.
    pub registered_at: String,
    pub status: CustomerStatus,
}

/// Fields submitted when creating or editing a customer.
///
/// Identity is backend-assigned; the draft never carries an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: CustomerStatus,
}
