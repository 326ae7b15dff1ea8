//! Product commands.

use std::path::Path;

use caphe_core::{CategoryId, Price, ProductId};

use caphe_client::ApiClient;
use caphe_client::collection::{filter_products, find_category_by_name, paginate};
use caphe_client::types::{ImageUpload, ProductDraft};
use caphe_client::validation::validate_product;

use super::{CommandError, client, page_footer};

/// List products with client-side name/category filtering and pagination.
pub async fn list(
    search: &str,
    category: Option<&str>,
    page: usize,
    page_size: usize,
) -> Result<(), CommandError> {
    let client = client()?;
    let products = client.list_products().await?;
    let categories = client.list_categories().await;

    let category_id = match category {
        Some(raw) => Some(resolve_category(&client, raw).await?),
        None => None,
    };

    let filtered = filter_products(&products, search, category_id);
    let page = paginate(&filtered, page, page_size);

    for product in &page.items {
        let category_name = product
            .category_id
            .and_then(|id| categories.iter().find(|c| c.category_id == id))
            .map_or("-", |c| c.name.as_str());
        tracing::info!(
            "{:<6} {:<28} {:>12} {:<14} {}",
            product.product_id,
            product.name,
            product.price.to_string(),
            category_name,
            product.image_url
        );
    }
    page_footer(&page);
    Ok(())
}

/// Create a product (validated, then uploaded as multipart).
pub async fn create(
    name: &str,
    description: &str,
    price: &str,
    category: &str,
    image: &Path,
) -> Result<(), CommandError> {
    let client = client()?;
    let draft = ProductDraft {
        product_id: None,
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::parse_input(price),
        category_id: Some(resolve_category(&client, category).await?),
        image: Some(read_image(image)?),
    };
    validate_product(&draft)?;

    let created = client.create_product(&draft).await?;
    tracing::info!("Đã tạo sản phẩm {} ({})", created.name, created.product_id);
    Ok(())
}

/// Update a product; omitting the image keeps the current one.
pub async fn update(
    id: i64,
    name: &str,
    description: &str,
    price: &str,
    category: &str,
    image: Option<&Path>,
) -> Result<(), CommandError> {
    let client = client()?;
    let draft = ProductDraft {
        product_id: Some(ProductId::new(id)),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::parse_input(price),
        category_id: Some(resolve_category(&client, category).await?),
        image: image.map(read_image).transpose()?,
    };
    validate_product(&draft)?;

    let updated = client.update_product(&draft).await?;
    tracing::info!("Đã cập nhật sản phẩm {}", updated.product_id);
    Ok(())
}

/// Delete a product.
pub async fn delete(id: i64) -> Result<(), CommandError> {
    client()?.delete_product(ProductId::new(id)).await?;
    tracing::info!("Đã xóa sản phẩm {id}");
    Ok(())
}

/// Resolve a `--category` argument: a numeric id is taken as-is, anything
/// else is matched against category names (case/diacritic-insensitive).
async fn resolve_category(client: &ApiClient, raw: &str) -> Result<CategoryId, CommandError> {
    if let Ok(id) = raw.trim().parse::<i64>() {
        return Ok(CategoryId::new(id));
    }

    let categories = client.list_categories().await;
    find_category_by_name(&categories, raw)
        .map(|c| c.category_id)
        .ok_or_else(|| CommandError::Invalid(format!("Không tìm thấy danh mục: {raw}")))
}

fn read_image(path: &Path) -> Result<ImageUpload, CommandError> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    Ok(ImageUpload { file_name, bytes })
}
