//! Aggregate statistics over loaded collections.
//!
//! Pure, synchronous computations; the caller fetches the collections, the
//! functions here never touch the network.

use std::collections::BTreeMap;

use serde::Serialize;

use caphe_core::{CustomerStatus, OrderStatus, PaymentMethod, Price};

use crate::types::{Customer, Order};

/// Dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub total_customers: usize,
    pub active_customers: usize,
    /// Sum of all order totals.
    pub total_revenue: Price,
    pub pending_orders: usize,
}

/// Compute the dashboard overview.
#[must_use]
pub fn overview(customers: &[Customer], orders: &[Order]) -> OverviewStats {
    OverviewStats {
        total_customers: customers.len(),
        active_customers: customers
            .iter()
            .filter(|c| c.status == CustomerStatus::Active)
            .count(),
        total_revenue: total_revenue(orders),
        pending_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
    }
}

/// Sum of all order totals.
#[must_use]
pub fn total_revenue(orders: &[Order]) -> Price {
    Price::from_vnd(
        orders
            .iter()
            .map(|o| o.total.as_vnd())
            .fold(0_i64, i64::saturating_add),
    )
}

/// Revenue bucketed by calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// Bucket key, `YYYY-MM`.
    pub month: String,
    pub revenue: Price,
}

/// Bucket order totals by month, oldest first.
///
/// Orders whose date is in a format no snapshot ever produced are skipped.
#[must_use]
pub fn monthly_revenue(orders: &[Order]) -> Vec<MonthlyRevenue> {
    let mut buckets: BTreeMap<String, i64> = BTreeMap::new();
    for order in orders {
        if let Some(month) = order_month(&order.created_at) {
            let entry = buckets.entry(month).or_insert(0);
            *entry = entry.saturating_add(order.total.as_vnd());
        }
    }
    buckets
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue {
            month,
            revenue: Price::from_vnd(revenue),
        })
        .collect()
}

/// Per-package order count and revenue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSales {
    pub name: String,
    pub orders: usize,
    pub revenue: Price,
}

/// Group orders by package name, highest revenue first.
#[must_use]
pub fn package_sales(orders: &[Order]) -> Vec<PackageSales> {
    let mut buckets: BTreeMap<&str, (usize, i64)> = BTreeMap::new();
    for order in orders {
        let entry = buckets.entry(order.package_name.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 = entry.1.saturating_add(order.total.as_vnd());
    }

    let mut sales: Vec<PackageSales> = buckets
        .into_iter()
        .map(|(name, (count, revenue))| PackageSales {
            name: name.to_owned(),
            orders: count,
            revenue: Price::from_vnd(revenue),
        })
        .collect();
    sales.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    sales
}

/// One payment method's share of all orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentShare {
    pub method: PaymentMethod,
    pub count: usize,
    /// Share of all orders, in percent.
    pub percent: f64,
}

/// Distribution of orders across payment methods.
#[must_use]
pub fn payment_breakdown(orders: &[Order]) -> Vec<PaymentShare> {
    let total = orders.len();
    [PaymentMethod::Vnpay, PaymentMethod::Card, PaymentMethod::Other]
        .into_iter()
        .map(|method| {
            let count = orders.iter().filter(|o| o.payment_method == method).count();
            #[allow(clippy::cast_precision_loss)]
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            PaymentShare {
                method,
                count,
                percent,
            }
        })
        .collect()
}

/// Extract the `YYYY-MM` bucket from an order date.
///
/// Accepts the two formats seen on the wire: ISO (`2024-12-15`) and
/// Vietnamese day-first (`15/12/2024`).
fn order_month(created_at: &str) -> Option<String> {
    let date = chrono::NaiveDate::parse_from_str(created_at, "%Y-%m-%d")
        .or_else(|_| chrono::NaiveDate::parse_from_str(created_at, "%d/%m/%Y"))
        .ok()?;
    Some(date.format("%Y-%m").to_string())
}
