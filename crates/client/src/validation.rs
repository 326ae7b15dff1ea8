//! Form validation.
//!
//! Validation runs client-side before any request is issued; a failed
//! validation blocks the submission entirely and stays local to the form.
//! Messages are user-facing Vietnamese, keyed by field name.

use std::collections::BTreeMap;

use thiserror::Error;

use caphe_core::Price;

use crate::types::{CreatePlanRequest, ImageUpload, ProductDraft};

/// Field-keyed validation failures.
#[derive(Debug, Clone, Default, Error, PartialEq, Eq)]
#[error("dữ liệu không hợp lệ: {}", self.summary())]
pub struct ValidationErrors {
    pub fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    /// True when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The message recorded for one field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn summary(&self) -> String {
        self.fields
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

// Product form bounds
const PRODUCT_NAME_MIN: usize = 2;
const PRODUCT_NAME_MAX: usize = 100;
const PRODUCT_DESC_MIN: usize = 10;
const PRODUCT_DESC_MAX: usize = 500;
const PRODUCT_PRICE_MIN: i64 = 1_000;
const PRODUCT_PRICE_MAX: i64 = 10_000_000;
const PRODUCT_PRICE_STEP: i64 = 1_000;

// Plan form bounds
const PLAN_NAME_MIN: usize = 3;
const PLAN_NAME_MAX: usize = 50;
const PLAN_DESC_MIN: usize = 10;
const PLAN_DESC_MAX: usize = 200;
const PLAN_PRICE_MIN: i64 = 50_000;
const PLAN_PRICE_MAX: i64 = 5_000_000;
const PLAN_PRICE_STEP: i64 = 5_000;
const PLAN_DURATION_MAX: i64 = 365;
const PLAN_DAILY_QUOTA_MAX: i64 = 10;
const PLAN_MAX_PER_VISIT_MAX: i64 = 5;

/// Maximum accepted image size: 5 MB.
pub const IMAGE_MAX_BYTES: usize = 5 * 1024 * 1024;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Validate a product form before submission.
///
/// # Errors
///
/// Returns every failing field with its user-facing message.
pub fn validate_product(draft: &ProductDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_name(
        &mut errors,
        &draft.name,
        PRODUCT_NAME_MIN,
        PRODUCT_NAME_MAX,
        "Tên sản phẩm",
    );
    check_length(
        &mut errors,
        "description",
        &draft.description,
        PRODUCT_DESC_MIN,
        PRODUCT_DESC_MAX,
        "Mô tả",
    );
    check_price(
        &mut errors,
        draft.price,
        PRODUCT_PRICE_MIN,
        PRODUCT_PRICE_MAX,
        PRODUCT_PRICE_STEP,
    );

    if draft.category_id.is_none() {
        errors.add("category_id", "Vui lòng chọn danh mục");
    }

    // An image is required on create; an update may keep the existing one.
    let image_required = draft.product_id.is_none();
    if let Some(message) = validate_image(draft.image.as_ref(), image_required) {
        errors.add("image", message);
    }

    errors.into_result()
}

/// Validate a plan form before submission.
///
/// # Errors
///
/// Returns every failing field with its user-facing message.
pub fn validate_plan(request: &CreatePlanRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_name(&mut errors, &request.name, PLAN_NAME_MIN, PLAN_NAME_MAX, "Tên gói");
    check_length(
        &mut errors,
        "description",
        &request.description,
        PLAN_DESC_MIN,
        PLAN_DESC_MAX,
        "Mô tả",
    );
    check_price(
        &mut errors,
        request.price,
        PLAN_PRICE_MIN,
        PLAN_PRICE_MAX,
        PLAN_PRICE_STEP,
    );

    check_range(
        &mut errors,
        "durationDays",
        request.duration_days,
        1,
        PLAN_DURATION_MAX,
        "Thời hạn",
    );
    check_range(
        &mut errors,
        "dailyQuota",
        request.daily_quota,
        1,
        PLAN_DAILY_QUOTA_MAX,
        "Hạn mức hàng ngày",
    );
    check_range(
        &mut errors,
        "maxPerVisit",
        request.max_per_visit,
        1,
        PLAN_MAX_PER_VISIT_MAX,
        "Tối đa mỗi lần",
    );

    if request.product_id.as_i64() <= 0 {
        errors.add("productId", "Vui lòng chọn sản phẩm");
    }

    errors.into_result()
}

/// Validate an image selection. Returns a message when invalid.
#[must_use]
pub fn validate_image(image: Option<&ImageUpload>, required: bool) -> Option<String> {
    let Some(image) = image else {
        return required.then(|| "Vui lòng chọn ảnh".to_owned());
    };

    if !image
        .extension()
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
    {
        return Some("Chỉ chấp nhận file ảnh (JPG, PNG, WebP)".to_owned());
    }

    if image.bytes.len() > IMAGE_MAX_BYTES {
        return Some("Kích thước ảnh không được vượt quá 5MB".to_owned());
    }

    None
}

/// Format raw price keystrokes with thousands separators (`"50000"` ->
/// `"50,000"`). Non-digits are dropped.
#[must_use]
pub fn format_price_input(input: &str) -> String {
    Price::parse_input(input).format_grouped()
}

fn check_name(
    errors: &mut ValidationErrors,
    value: &str,
    min: usize,
    max: usize,
    label: &str,
) {
    check_length(errors, "name", value, min, max, label);
    if value != value.trim() {
        errors.add(
            "name",
            format!("{label} không được bắt đầu hoặc kết thúc bằng khoảng trắng"),
        );
    }
}

fn check_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    label: &str,
) {
    let length = value.trim().chars().count();
    if length == 0 {
        errors.add(field, format!("{label} là bắt buộc"));
    } else if length < min {
        errors.add(field, format!("{label} phải có ít nhất {min} ký tự"));
    } else if length > max {
        errors.add(field, format!("{label} không được vượt quá {max} ký tự"));
    }
}

fn check_price(errors: &mut ValidationErrors, price: Price, min: i64, max: i64, step: i64) {
    let amount = price.as_vnd();
    if amount < min {
        errors.add(
            "price",
            format!("Giá phải lớn hơn hoặc bằng {}", Price::from_vnd(min)),
        );
    } else if amount > max {
        errors.add(
            "price",
            format!("Giá phải nhỏ hơn hoặc bằng {}", Price::from_vnd(max)),
        );
    } else if !price.is_multiple_of_vnd(step) {
        errors.add(
            "price",
            format!("Giá phải là bội số của {} VNĐ", Price::from_vnd(step).format_grouped()),
        );
    }
}

fn check_range(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
    label: &str,
) {
    if value < min {
        errors.add(field, format!("{label} phải lớn hơn hoặc bằng {min}"));
    } else if value > max {
        errors.add(field, format!("{label} phải nhỏ hơn hoặc bằng {max}"));
    }
}
