//! Order commands. Orders are read-only.

use caphe_core::OrderStatus;

use caphe_client::collection::{filter_orders, paginate};
use caphe_client::types::Order;

use super::{CommandError, client, demo_store, page_footer};

/// List orders with client-side search, status filter and pagination.
pub async fn list(
    demo: bool,
    search: &str,
    status: Option<&str>,
    page: usize,
    page_size: usize,
) -> Result<(), CommandError> {
    let orders: Vec<Order> = if demo {
        demo_store()?.orders()
    } else {
        client()?.list_orders().await?
    };

    let status = status
        .map(|raw| {
            raw.parse::<OrderStatus>()
                .map_err(CommandError::Invalid)
        })
        .transpose()?;

    let filtered = filter_orders(&orders, search, status);
    let page = paginate(&filtered, page, page_size);

    for order in &page.items {
        tracing::info!(
            "{:<14} {:<22} {:<18} {:>12} {:<10} {:<10} {}",
            order.id,
            order.user_name,
            order.package_name,
            order.total.to_string(),
            order.created_at,
            order.status,
            order.payment_method
        );
    }
    page_footer(&page);
    Ok(())
}
