use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Order, OrderItem};

/// One cart line as submitted at checkout. Price and name are the client's
/// snapshot at purchase time and are stored as-is on the order item.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CheckoutItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub price: i64,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_phone: String,
    pub address: Option<String>,
    pub delivery_method: String,
    pub payment_method: String,
    pub notes: Option<String>,
    pub pickup_time: Option<String>,
    pub items: Vec<CheckoutItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub order_status: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: String,
}
