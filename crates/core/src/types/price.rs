//! Type-safe price representation for VNĐ amounts.
//!
//! The café backend denominates every monetary value in whole Vietnamese
//! đồng, so a price is a non-negative `i64` - no fractional unit exists.
//! Display always groups thousands (`150,000 ₫`), matching how staff type
//! prices into the dashboard forms.

use serde::{Deserialize, Serialize};

/// A non-negative amount of Vietnamese đồng.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a đồng amount. Negative amounts clamp to zero.
    #[must_use]
    pub const fn from_vnd(amount: i64) -> Self {
        if amount < 0 { Self(0) } else { Self(amount) }
    }

    /// Get the amount in đồng.
    #[must_use]
    pub const fn as_vnd(&self) -> i64 {
        self.0
    }

    /// Parse a formatted price input (`"50,000"`, `"50.000"`, `"50000 ₫"`).
    ///
    /// Every non-digit character is ignored; unparseable input yields zero.
    #[must_use]
    pub fn parse_input(input: &str) -> Self {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        Self::from_vnd(digits.parse().unwrap_or(0))
    }

    /// Format the amount with thousands separators (`"50,000"`).
    #[must_use]
    pub fn format_grouped(&self) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i).is_multiple_of(3) {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }

    /// True when this price is a whole multiple of `unit` đồng.
    #[must_use]
    pub const fn is_multiple_of_vnd(&self, unit: i64) -> bool {
        unit > 0 && self.0 % unit == 0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ₫", self.format_grouped())
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self::from_vnd(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_clamps_to_zero() {
        assert_eq!(Price::from_vnd(-500).as_vnd(), 0);
    }

    #[test]
    fn test_parse_input_with_separators() {
        assert_eq!(Price::parse_input("50,000").as_vnd(), 50_000);
        assert_eq!(Price::parse_input("1.250.000").as_vnd(), 1_250_000);
        assert_eq!(Price::parse_input("150000 ₫").as_vnd(), 150_000);
    }

    #[test]
    fn test_parse_input_garbage_is_zero() {
        assert_eq!(Price::parse_input("").as_vnd(), 0);
        assert_eq!(Price::parse_input("miễn phí").as_vnd(), 0);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Price::from_vnd(0).format_grouped(), "0");
        assert_eq!(Price::from_vnd(999).format_grouped(), "999");
        assert_eq!(Price::from_vnd(50_000).format_grouped(), "50,000");
        assert_eq!(Price::from_vnd(1_250_000).format_grouped(), "1,250,000");
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_vnd(300_000).to_string(), "300,000 ₫");
    }

    #[test]
    fn test_multiple_of() {
        assert!(Price::from_vnd(50_000).is_multiple_of_vnd(5_000));
        assert!(!Price::from_vnd(50_500).is_multiple_of_vnd(5_000));
        assert!(!Price::from_vnd(50_000).is_multiple_of_vnd(0));
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_vnd(150_000);
        assert_eq!(
            serde_json::to_string(&price).expect("serialize"),
            "150000"
        );
        let parsed: Price = serde_json::from_str("150000").expect("deserialize");
        assert_eq!(parsed, price);
    }
}
