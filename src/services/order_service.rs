use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    dto::orders::{CheckoutRequest, OrderWithItems},
    entity::{
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems},
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    format::{format_phone_number, generate_order_number},
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const ORDER_STATUSES: [&str; 6] = [
    "pending",
    "confirmed",
    "processing",
    "ready",
    "completed",
    "cancelled",
];
pub const PAYMENT_STATUSES: [&str; 3] = ["pending", "paid", "failed"];
pub const DELIVERY_METHODS: [&str; 2] = ["pickup", "delivery"];

/// Membership check only: there is no transition graph, any status may
/// replace any other.
pub fn validate_order_status(status: &str) -> Result<(), AppError> {
    if ORDER_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid order status".into()))
    }
}

pub fn validate_payment_status(status: &str) -> Result<(), AppError> {
    if PAYMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Invalid payment status".into()))
    }
}

/// Create one order plus its line items from a submitted cart.
///
/// The order insert and the item inserts are two sequential steps with no
/// surrounding transaction. A failed item insert leaves the already-created
/// order behind without items; the caller gets a generic persistence error
/// and is expected to keep its cart and retry.
pub async fn checkout(
    state: &AppState,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    if payload.items.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::BadRequest("Customer name is required".into()));
    }
    if payload.customer_phone.trim().is_empty() {
        return Err(AppError::BadRequest("Customer phone is required".into()));
    }
    if !DELIVERY_METHODS.contains(&payload.delivery_method.as_str()) {
        return Err(AppError::BadRequest("Invalid delivery method".into()));
    }
    if payload.payment_method.trim().is_empty() {
        return Err(AppError::BadRequest("Payment method is required".into()));
    }
    for item in &payload.items {
        if item.quantity < 1 {
            return Err(AppError::BadRequest("Item quantity must be at least 1".into()));
        }
        if item.price < 0 {
            return Err(AppError::BadRequest("Item price must not be negative".into()));
        }
    }

    // Total is fixed at creation time from the submitted snapshots and is
    // never recomputed afterwards.
    let total_amount: i64 = payload
        .items
        .iter()
        .map(|item| item.price * i64::from(item.quantity))
        .sum();

    let order_number = generate_order_number();
    // Address only applies to deliveries; pickups always store none.
    let address = if payload.delivery_method == "delivery" {
        payload.address.filter(|a| !a.trim().is_empty())
    } else {
        None
    };

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        order_number: Set(order_number),
        customer_name: Set(payload.customer_name),
        customer_phone: Set(format_phone_number(&payload.customer_phone)),
        address: Set(address),
        delivery_method: Set(payload.delivery_method),
        payment_method: Set(payload.payment_method),
        payment_status: Set("pending".into()),
        order_status: Set("pending".into()),
        total_amount: Set(total_amount),
        notes: Set(payload.notes.filter(|n| !n.trim().is_empty())),
        pickup_time: Set(payload.pickup_time.filter(|t| !t.trim().is_empty())),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(payload.items.len());
    for line in &payload.items {
        let inserted = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price: Set(line.price),
            product_name: Set(line.product_name.clone()),
        }
        .insert(&state.orm)
        .await;

        match inserted {
            Ok(model) => items.push(OrderItem::from(model)),
            Err(err) => {
                tracing::warn!(
                    order_id = %order.id,
                    error = %err,
                    "order item insert failed, order left without its items"
                );
                return Err(err.into());
            }
        }
    }

    tracing::info!(
        order_id = %order.id,
        order_number = %order.order_number,
        total_amount,
        "order created"
    );

    Ok(ApiResponse::success(
        "Order created",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// Customer-facing lookup by order number. Read-only; a missing order is a
/// distinct not-found outcome.
pub async fn lookup_order(
    state: &AppState,
    order_number: &str,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find()
        .filter(OrderCol::OrderNumber.eq(order_number))
        .one(&state.orm)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(OrderItem::from)
        .collect();

    Ok(ApiResponse::success(
        "OK",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}
