//! Catalog domain: products, categories, and colors.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Product lifecycle status (stored as a string with a CHECK constraint)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Published,
    Sold,
    Blocked,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Published => "published",
            ProductStatus::Sold => "sold",
            ProductStatus::Blocked => "blocked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ProductStatus::Draft),
            "published" => Some(ProductStatus::Published),
            "sold" => Some(ProductStatus::Sold),
            "blocked" => Some(ProductStatus::Blocked),
            _ => None,
        }
    }
}

/// Target audience of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProductGender {
    Male,
    Female,
    Unisex,
    Kids,
}

impl ProductGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductGender::Male => "Male",
            ProductGender::Female => "Female",
            ProductGender::Unisex => "Unisex",
            ProductGender::Kids => "Kids",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(ProductGender::Male),
            "Female" => Some(ProductGender::Female),
            "Unisex" => Some(ProductGender::Unisex),
            "Kids" => Some(ProductGender::Kids),
            _ => None,
        }
    }
}

/// Product domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i32,
    pub seller_id: Uuid,
    pub category_id: i32,
    pub color_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub stock_qty: i32,
    pub gender: Option<ProductGender>,
    pub status: ProductStatus,
    pub is_free_shipping: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// A product can be traded or bought only while it is published.
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Published
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.seller_id == user_id
    }
}

/// Image attached to a product listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductImage {
    pub id: i32,
    pub product_id: i32,
    pub image_url: String,
    pub is_main: bool,
}

/// New listing payload
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub original_price: Option<Decimal>,
    pub category_id: i32,
    pub color_id: Option<i32>,
    pub gender: Option<ProductGender>,
    pub stock_qty: Option<i32>,
    pub is_free_shipping: Option<bool>,
    /// Image URLs; the first one becomes the main image
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Product response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub seller_id: Uuid,
    pub category_id: i32,
    pub color_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 149.90)]
    pub price: Decimal,
    #[schema(value_type = Option<f64>)]
    pub original_price: Option<Decimal>,
    pub stock_qty: i32,
    pub gender: Option<ProductGender>,
    pub status: ProductStatus,
    pub is_free_shipping: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<String>,
}

impl ProductResponse {
    pub fn from_product(product: Product, images: Vec<ProductImage>) -> Self {
        Self {
            id: product.id,
            seller_id: product.seller_id,
            category_id: product.category_id,
            color_id: product.color_id,
            title: product.title,
            description: product.description,
            price: product.price,
            original_price: product.original_price,
            stock_qty: product.stock_qty,
            gender: product.gender,
            status: product.status,
            is_free_shipping: product.is_free_shipping,
            created_at: product.created_at,
            images: images.into_iter().map(|i| i.image_url).collect(),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse::from_product(product, Vec::new())
    }
}

/// Category domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub parent_id: Option<i32>,
    pub image_url: Option<String>,
}

/// Category with its direct children, for the public category tree
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryTree {
    pub id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub children: Vec<Category>,
}

impl CategoryTree {
    pub fn new(parent: Category, children: Vec<Category>) -> Self {
        Self {
            id: parent.id,
            name: parent.name,
            image_url: parent.image_url,
            children,
        }
    }
}

/// Category create/update payload (admin only)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpsertCategory {
    pub name: String,
    pub parent_id: Option<i32>,
    pub image_url: Option<String>,
}

/// Color lookup entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Color {
    pub id: i32,
    pub name: String,
    pub hex_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for status in [
            ProductStatus::Draft,
            ProductStatus::Published,
            ProductStatus::Sold,
            ProductStatus::Blocked,
        ] {
            assert_eq!(ProductStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProductStatus::parse("available"), None);
    }

    #[test]
    fn only_published_products_are_available() {
        let mut product = Product {
            id: 1,
            seller_id: Uuid::new_v4(),
            category_id: 1,
            color_id: None,
            title: "Jacket".into(),
            description: None,
            price: Decimal::new(10000, 2),
            original_price: None,
            stock_qty: 1,
            gender: None,
            status: ProductStatus::Published,
            is_free_shipping: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        assert!(product.is_available());

        product.status = ProductStatus::Sold;
        assert!(!product.is_available());
    }
}
