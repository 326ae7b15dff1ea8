//! Status enums for various entities.
//!
//! Backend snapshots disagree on casing and sometimes send values outside
//! the documented set, so every enum here offers a lenient parser that
//! falls back to its default instead of failing a whole collection fetch.

use serde::{Deserialize, Serialize};

/// Customer account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    #[default]
    Inactive,
}

impl CustomerStatus {
    /// Parse a backend status value; anything but `active` is inactive.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("active") {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// Canonical lowercase form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Parse a backend status value; unknown values stay pending.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Pending,
        }
    }

    /// Canonical lowercase form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment method recorded on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Vnpay,
    Card,
    #[default]
    Other,
}

impl PaymentMethod {
    /// Parse a backend payment method; unknown values map to [`Self::Other`].
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "vnpay" => Self::Vnpay,
            "card" => Self::Card,
            _ => Self::Other,
        }
    }

    /// Canonical lowercase form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vnpay => "vnpay",
            Self::Card => "card",
            Self::Other => "other",
        }
    }

    /// Human-facing label used in statistics output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Vnpay => "VNPay",
            Self::Card => "Thẻ tín dụng",
            Self::Other => "Khác",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Staff role attached to an authenticated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Full access to store management features.
    #[default]
    Admin,
    /// Day-to-day operations without account management.
    Staff,
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Staff => write!(f, "staff"),
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "staff" => Ok(Self::Staff),
            _ => Err(format!("invalid staff role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_status_lenient() {
        assert_eq!(CustomerStatus::parse_lenient("active"), CustomerStatus::Active);
        assert_eq!(CustomerStatus::parse_lenient("ACTIVE"), CustomerStatus::Active);
        assert_eq!(
            CustomerStatus::parse_lenient("disabled"),
            CustomerStatus::Inactive
        );
    }

    #[test]
    fn test_order_status_lenient_falls_back_to_pending() {
        assert_eq!(OrderStatus::parse_lenient("completed"), OrderStatus::Completed);
        assert_eq!(OrderStatus::parse_lenient("shipping"), OrderStatus::Pending);
    }

    #[test]
    fn test_payment_method_lenient() {
        assert_eq!(PaymentMethod::parse_lenient("VNPay"), PaymentMethod::Vnpay);
        assert_eq!(PaymentMethod::parse_lenient("momo"), PaymentMethod::Other);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).expect("serialize"),
            "\"cancelled\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"vnpay\"").expect("deserialize");
        assert_eq!(parsed, PaymentMethod::Vnpay);
    }

    #[test]
    fn test_staff_role_from_str() {
        assert_eq!("admin".parse::<StaffRole>(), Ok(StaffRole::Admin));
        assert!("root".parse::<StaffRole>().is_err());
    }
}
