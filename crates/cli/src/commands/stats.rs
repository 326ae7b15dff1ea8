//! Statistics commands.

use caphe_client::stats::{monthly_revenue, overview as compute_overview, payment_breakdown};
use caphe_client::types::{Customer, Order};

use super::{CommandError, client, demo_store};

/// Print the dashboard overview.
pub async fn overview(demo: bool) -> Result<(), CommandError> {
    let (customers, orders) = fetch_collections(demo).await?;
    let stats = compute_overview(&customers, &orders);

    tracing::info!("Tổng khách hàng:   {}", stats.total_customers);
    tracing::info!("Đang hoạt động:    {}", stats.active_customers);
    tracing::info!("Tổng doanh thu:    {}", stats.total_revenue);
    tracing::info!("Đơn chờ xử lý:     {}", stats.pending_orders);
    Ok(())
}

/// Print revenue by month.
pub async fn revenue(demo: bool) -> Result<(), CommandError> {
    let (_, orders) = fetch_collections(demo).await?;
    for bucket in monthly_revenue(&orders) {
        tracing::info!("{:<8} {}", bucket.month, bucket.revenue);
    }
    Ok(())
}

/// Print the payment-method distribution.
pub async fn payments(demo: bool) -> Result<(), CommandError> {
    let (_, orders) = fetch_collections(demo).await?;
    for share in payment_breakdown(&orders) {
        tracing::info!(
            "{:<14} {:>4} đơn ({:.1}%)",
            share.method.label(),
            share.count,
            share.percent
        );
    }
    Ok(())
}

async fn fetch_collections(demo: bool) -> Result<(Vec<Customer>, Vec<Order>), CommandError> {
    if demo {
        let store = demo_store()?;
        Ok((store.customers(), store.orders()))
    } else {
        let client = client()?;
        let customers = client.list_customers().await?;
        let orders = client.list_orders().await?;
        Ok((customers, orders))
    }
}
