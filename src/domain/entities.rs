//! Domain entities mirrored from persistent storage.

use time::OffsetDateTime;

/// A catalog product as stored in the `products` table and mirrored by the product cache.
///
/// The row's `created_at` column is not carried; only the admin listing orders by it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub wine_type: String,
    pub region: String,
    pub vintage: i32,
    pub price: f64,
    pub alcohol: f64,
    pub stock: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// A shop customer. The stored password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub joined_at: Option<OffsetDateTime>,
}

/// An order joined with the names of its customer and product.
///
/// `order_date` is `None` for rows written without a timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: f64,
    pub status: String,
    pub order_date: Option<OffsetDateTime>,
}
