//! Customer commands.

use caphe_core::{CustomerId, CustomerStatus};

use caphe_client::collection::{filter_customers, paginate};
use caphe_client::types::{Customer, CustomerDraft};

use super::{CommandError, client, demo_store, page_footer};

/// List customers with client-side search, status filter and pagination.
pub async fn list(
    demo: bool,
    search: &str,
    status: Option<&str>,
    page: usize,
    page_size: usize,
) -> Result<(), CommandError> {
    let customers = fetch_all(demo).await?;
    let status = status.map(parse_status).transpose()?;

    let filtered = filter_customers(&customers, search, status);
    let page = paginate(&filtered, page, page_size);

    for customer in &page.items {
        print_row(customer);
    }
    page_footer(&page);
    Ok(())
}

/// Create a customer.
pub async fn create(demo: bool, name: &str, email: &str, phone: &str) -> Result<(), CommandError> {
    let draft = CustomerDraft {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
        status: CustomerStatus::Active,
    };

    let created = if demo {
        demo_store()?.add_customer(&draft)
    } else {
        client()?.create_customer(&draft).await?
    };

    tracing::info!("Đã tạo khách hàng {} ({})", created.name, created.id);
    Ok(())
}

/// Update a customer (full record replace, matching the edit form).
pub async fn update(
    demo: bool,
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    inactive: bool,
) -> Result<(), CommandError> {
    let id = CustomerId::new(id);
    let draft = CustomerDraft {
        name: name.to_owned(),
        email: email.to_owned(),
        phone: phone.to_owned(),
        status: if inactive {
            CustomerStatus::Inactive
        } else {
            CustomerStatus::Active
        },
    };

    let updated = if demo {
        demo_store()?
            .update_customer(&id, &draft)
            .ok_or_else(|| CommandError::Invalid(format!("Không tìm thấy khách hàng {id}")))?
    } else {
        client()?.update_customer(&id, &draft).await?
    };

    tracing::info!("Đã cập nhật khách hàng {}", updated.id);
    Ok(())
}

/// Delete a customer.
pub async fn delete(demo: bool, id: &str) -> Result<(), CommandError> {
    let id = CustomerId::new(id);

    if demo {
        demo_store()?.delete_customer(&id);
    } else {
        client()?.delete_customer(&id).await?;
    }

    tracing::info!("Đã xóa khách hàng {id}");
    Ok(())
}

async fn fetch_all(demo: bool) -> Result<Vec<Customer>, CommandError> {
    if demo {
        Ok(demo_store()?.customers())
    } else {
        Ok(client()?.list_customers().await?)
    }
}

fn parse_status(raw: &str) -> Result<CustomerStatus, CommandError> {
    match raw {
        "active" => Ok(CustomerStatus::Active),
        "inactive" => Ok(CustomerStatus::Inactive),
        other => Err(CommandError::Invalid(format!(
            "Trạng thái không hợp lệ: {other} (dùng active hoặc inactive)"
        ))),
    }
}

fn print_row(customer: &Customer) {
    tracing::info!(
        "{:<8} {:<24} {:<28} {:<12} {:<10} {}",
        customer.id,
        customer.name,
        customer.email,
        customer.phone,
        customer.registered_at,
        customer.status
    );
}
