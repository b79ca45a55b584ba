use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub price: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    pub stock: Option<i32>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub available: Option<bool>,
    pub stock: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}
