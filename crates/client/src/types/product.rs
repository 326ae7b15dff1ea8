//! Product entity and form payloads.

use serde::{Deserialize, Serialize};

use caphe_core::{CategoryId, Price, ProductId};

/// A product, post-mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    /// Resolved scalar category id; `None` when the backend sent nothing
    /// resolvable. Never an embedded object - see
    /// [`crate::conversions::resolve_category_id`].
    pub category_id: Option<CategoryId>,
}

/// An image selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name; the extension drives validation and the MIME type.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Lowercased file extension, if any.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// MIME type for the multipart part, derived from the extension.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        }
    }
}

/// Fields submitted when creating or editing a product.
///
/// Sent as multipart form data (`name`, `description`, `categoryId`,
/// `price`, `image`, plus `productId` on update).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDraft {
    /// Present on update, absent on create.
    pub product_id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    pub image: Option<ImageUpload>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime_from_extension() {
        let png = ImageUpload {
            file_name: "Latte.PNG".to_owned(),
            bytes: vec![],
        };
        assert_eq!(png.extension().as_deref(), Some("png"));
        assert_eq!(png.mime_type(), "image/png");

        let bare = ImageUpload {
            file_name: "noext".to_owned(),
            bytes: vec![],
        };
        assert_eq!(bare.extension(), None);
        assert_eq!(bare.mime_type(), "image/jpeg");
    }
}
