use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub available: bool,
    pub stock: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: Option<String>,
    pub delivery_method: String,
    pub payment_method: String,
    pub payment_status: String,
    pub order_status: String,
    pub total_amount: i64,
    pub notes: Option<String>,
    pub pickup_time: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: i64,
    pub product_name: String,
}

/// Back-office account. The raw row carries the password digest, so it is
/// never serialized directly; admin-facing responses use `dto::auth::AdminInfo`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<entity::orders::Model> for Order {
    fn from(model: entity::orders::Model) -> Self {
        Order {
            id: model.id,
            order_number: model.order_number,
            customer_name: model.customer_name,
            customer_phone: model.customer_phone,
            address: model.address,
            delivery_method: model.delivery_method,
            payment_method: model.payment_method,
            payment_status: model.payment_status,
            order_status: model.order_status,
            total_amount: model.total_amount,
            notes: model.notes,
            pickup_time: model.pickup_time,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<entity::order_items::Model> for OrderItem {
    fn from(model: entity::order_items::Model) -> Self {
        OrderItem {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            quantity: model.quantity,
            price: model.price,
            product_name: model.product_name,
        }
    }
}
