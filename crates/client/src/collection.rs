//! Client-side collection operations.
//!
//! Searching, filtering and pagination all run synchronously over the
//! collection already in memory - they never trigger a network request.
//! Text matching is locale-normalizing (case fold + Vietnamese diacritic
//! strip) so `"ca phe"` typed without tones still matches `"Cà Phê"`.

use caphe_core::{CategoryId, CustomerStatus, OrderStatus};

use crate::types::{Category, Customer, Order, Product};

/// Lowercase a label and strip Vietnamese diacritics.
#[must_use]
pub fn normalize_label(s: &str) -> String {
    s.to_lowercase().chars().map(fold_diacritic).collect()
}

/// True when `haystack` contains `query` after normalization.
/// An empty query matches everything.
#[must_use]
pub fn matches_query(haystack: &str, query: &str) -> bool {
    let query = normalize_label(query);
    query.is_empty() || normalize_label(haystack).contains(&query)
}

fn fold_diacritic(c: char) -> char {
    const GROUPS: &[(&str, char)] = &[
        ("àáạảãâầấậẩẫăằắặẳẵ", 'a'),
        ("èéẹẻẽêềếệểễ", 'e'),
        ("ìíịỉĩ", 'i'),
        ("òóọỏõôồốộổỗơờớợởỡ", 'o'),
        ("ùúụủũưừứựửữ", 'u'),
        ("ỳýỵỷỹ", 'y'),
        ("đ", 'd'),
    ];
    for (group, base) in GROUPS {
        if group.contains(c) {
            return *base;
        }
    }
    c
}

/// One page of a client-side paginated collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number, clamped into range.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice a collection into a 1-based page.
///
/// A page past the end clamps to the last page; an empty collection yields
/// a single empty page.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let page_items = items
        .iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Page {
        items: page_items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Filter products by a name query and an optional category id.
///
/// Both conditions must hold: the name must contain the query
/// (case/diacritic-insensitive) and, when a category is given, the
/// product's resolved category id must equal it.
#[must_use]
pub fn filter_products(
    products: &[Product],
    query: &str,
    category: Option<CategoryId>,
) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches_query(&p.name, query))
        .filter(|p| category.is_none_or(|wanted| p.category_id == Some(wanted)))
        .cloned()
        .collect()
}

/// Search customers by name or email, optionally restricted to a status.
#[must_use]
pub fn filter_customers(
    customers: &[Customer],
    query: &str,
    status: Option<CustomerStatus>,
) -> Vec<Customer> {
    customers
        .iter()
        .filter(|c| matches_query(&c.name, query) || matches_query(&c.email, query))
        .filter(|c| status.is_none_or(|wanted| c.status == wanted))
        .cloned()
        .collect()
}

/// Filter orders by customer/package text and an optional status.
#[must_use]
pub fn filter_orders(orders: &[Order], query: &str, status: Option<OrderStatus>) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| matches_query(&o.user_name, query) || matches_query(&o.package_name, query))
        .filter(|o| status.is_none_or(|wanted| o.status == wanted))
        .cloned()
        .collect()
}

/// Find a category by name, tolerating case and missing diacritics.
#[must_use]
pub fn find_category_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let wanted = normalize_label(name);
    categories
        .iter()
        .find(|c| normalize_label(&c.name) == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use caphe_core::{CustomerId, OrderId, Price, ProductId};

    fn product(id: i64, name: &str, category: Option<i64>) -> Product {
        Product {
            product_id: ProductId::new(id),
            name: name.to_owned(),
            description: String::new(),
            price: Price::from_vnd(45_000),
            image_url: String::new(),
            category_id: category.map(CategoryId::new),
        }
    }

    #[test]
    fn test_normalize_label_strips_diacritics() {
        assert_eq!(normalize_label("Cà Phê Sữa Đá"), "ca phe sua da");
        assert_eq!(normalize_label("Trà Đào"), "tra dao");
        assert_eq!(normalize_label("latte"), "latte");
    }

    #[test]
    fn test_matches_query_diacritic_insensitive() {
        assert!(matches_query("Cà phê sữa đá", "ca phe"));
        assert!(matches_query("Cà phê sữa đá", "CÀ PHÊ"));
        assert!(!matches_query("Trà đào", "ca phe"));
        assert!(matches_query("anything", ""));
    }

    #[test]
    fn test_filter_products_combines_name_and_category() {
        let products = vec![
            product(1, "Cà phê đen", Some(1)),
            product(2, "Cà phê sữa", Some(1)),
            product(3, "Cà phê muối", Some(2)),
            product(4, "Trà sen", Some(1)),
        ];

        let hits = filter_products(&products, "cà phê", Some(CategoryId::new(1)));
        assert_eq!(
            hits.iter().map(|p| p.product_id.as_i64()).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_filter_products_without_category_matches_all_categories() {
        let products = vec![product(1, "Cà phê đen", Some(1)), product(2, "Cà phê muối", None)];
        assert_eq!(filter_products(&products, "ca phe", None).len(), 2);
    }

    #[test]
    fn test_uncategorized_product_never_matches_category_filter() {
        let products = vec![product(1, "Cà phê đen", None)];
        assert!(filter_products(&products, "", Some(CategoryId::new(1))).is_empty());
    }

    #[test]
    fn test_paginate_slices_and_counts() {
        let items: Vec<i32> = (1..=25).collect();
        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
    }

    #[test]
    fn test_paginate_clamps_out_of_range_page() {
        let items: Vec<i32> = (1..=5).collect();
        let page = paginate(&items, 99, 10);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 5);

        let page = paginate(&items, 0, 10);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate::<i32>(&[], 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_filter_customers_matches_name_or_email() {
        let customers = vec![
            Customer {
                id: CustomerId::new("USR001"),
                name: "Nguyễn Văn An".to_owned(),
                email: "an@email.com".to_owned(),
                phone: String::new(),
                registered_at: "2024-11-15".to_owned(),
                status: CustomerStatus::Active,
            },
            Customer {
                id: CustomerId::new("USR002"),
                name: "Trần Thị Bình".to_owned(),
                email: "binh@email.com".to_owned(),
                phone: String::new(),
                registered_at: "2024-11-12".to_owned(),
                status: CustomerStatus::Inactive,
            },
        ];

        assert_eq!(filter_customers(&customers, "van an", None).len(), 1);
        assert_eq!(filter_customers(&customers, "binh@", None).len(), 1);
        assert_eq!(
            filter_customers(&customers, "", Some(CustomerStatus::Active)).len(),
            1
        );
    }

    #[test]
    fn test_filter_orders_by_status() {
        let orders = vec![Order {
            id: OrderId::new("ORD-1"),
            user_id: CustomerId::new("USR001"),
            user_name: "Nguyễn Văn An".to_owned(),
            package_name: "Gói Tiêu Chuẩn".to_owned(),
            total: Price::from_vnd(300_000),
            created_at: "2024-12-15".to_owned(),
            status: OrderStatus::Completed,
            payment_method: caphe_core::PaymentMethod::Vnpay,
        }];

        assert_eq!(filter_orders(&orders, "goi tieu", None).len(), 1);
        assert!(filter_orders(&orders, "", Some(OrderStatus::Pending)).is_empty());
    }

    #[test]
    fn test_find_category_by_name_locale_normalizing() {
        let categories = vec![
            Category {
                category_id: CategoryId::new(1),
                name: "Cà phê".to_owned(),
            },
            Category {
                category_id: CategoryId::new(2),
                name: "Trà".to_owned(),
            },
        ];

        assert_eq!(
            find_category_by_name(&categories, "ca phe").map(|c| c.category_id),
            Some(CategoryId::new(1))
        );
        assert_eq!(
            find_category_by_name(&categories, "TRA").map(|c| c.category_id),
            Some(CategoryId::new(2))
        );
        assert!(find_category_by_name(&categories, "sinh tố").is_none());
    }
}
