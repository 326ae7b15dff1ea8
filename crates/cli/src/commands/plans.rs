//! Subscription plan commands.

use caphe_core::{PlanId, Price, ProductId};

use caphe_client::types::{CreatePlanRequest, Plan, UpdatePlanRequest};
use caphe_client::validation::validate_plan;

use super::{CommandError, client};

/// List all plans.
pub async fn list() -> Result<(), CommandError> {
    let plans = client()?.list_plans().await?;
    for plan in &plans {
        print_row(plan);
    }
    tracing::info!("{} gói", plans.len());
    Ok(())
}

/// Show one plan.
pub async fn get(id: i64) -> Result<(), CommandError> {
    let plan = client()?.get_plan(PlanId::new(id)).await?;
    print_row(&plan);
    tracing::info!("Mô tả: {}", plan.description);
    tracing::info!(
        "Hạn mức: {}/ngày, tối đa {}/lần, sản phẩm: {}",
        plan.daily_quota,
        plan.max_per_visit,
        plan.product_name
    );
    Ok(())
}

/// Create a plan (validated before submission).
#[allow(clippy::too_many_arguments)]
pub async fn create(
    name: &str,
    description: &str,
    product_id: i64,
    price: &str,
    duration_days: i64,
    daily_quota: i64,
    max_per_visit: i64,
    active: bool,
) -> Result<(), CommandError> {
    let request = CreatePlanRequest {
        name: name.to_owned(),
        description: description.to_owned(),
        product_id: ProductId::new(product_id),
        price: Price::parse_input(price),
        duration_days,
        daily_quota,
        max_per_visit,
        active,
    };
    validate_plan(&request)?;

    let created = client()?.create_plan(&request).await?;
    tracing::info!("Đã tạo gói {} ({})", created.name, created.plan_id);
    Ok(())
}

/// Update a plan; only the provided fields change.
pub async fn update(
    id: i64,
    name: Option<String>,
    description: Option<String>,
    price: Option<&str>,
    duration_days: Option<i64>,
    daily_quota: Option<i64>,
    max_per_visit: Option<i64>,
) -> Result<(), CommandError> {
    let request = UpdatePlanRequest {
        name,
        description,
        product_id: None,
        image_url: None,
        price: price.map(Price::parse_input),
        duration_days,
        daily_quota,
        max_per_visit,
        active: None,
    };

    let updated = client()?.update_plan(PlanId::new(id), &request).await?;
    tracing::info!("Đã cập nhật gói {}", updated.plan_id);
    Ok(())
}

/// Delete a plan.
pub async fn delete(id: i64) -> Result<(), CommandError> {
    client()?.delete_plan(PlanId::new(id)).await?;
    tracing::info!("Đã xóa gói {id}");
    Ok(())
}

/// Flip a plan's active flag.
pub async fn toggle(id: i64) -> Result<(), CommandError> {
    let plan = client()?.toggle_plan(PlanId::new(id)).await?;
    tracing::info!(
        "Gói {} hiện {}",
        plan.plan_id,
        if plan.active { "đang bán" } else { "ngừng bán" }
    );
    Ok(())
}

/// Deactivate a plan.
pub async fn deactivate(id: i64) -> Result<(), CommandError> {
    client()?.deactivate_plan(PlanId::new(id)).await?;
    tracing::info!("Đã ngừng bán gói {id}");
    Ok(())
}

fn print_row(plan: &Plan) {
    tracing::info!(
        "{:<6} {:<24} {:>12} {:>4} ngày (~{} tháng) {}",
        plan.plan_id,
        plan.name,
        plan.price.to_string(),
        plan.duration_days,
        plan.duration_months(),
        if plan.active { "đang bán" } else { "ngừng bán" }
    );
}
