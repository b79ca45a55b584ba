use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutRequest, OrderWithItems},
    error::AppResult,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout))
        .route("/{order_number}", get(lookup_order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order created with its line items", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Empty cart or missing required fields"),
        (status = 500, description = "Persistence failure; the submitted cart should be kept for retry"),
    ),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::checkout(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{order_number}",
    params(
        ("order_number" = String, Path, description = "Human-readable order number")
    ),
    responses(
        (status = 200, description = "Order with its line items", body = ApiResponse<OrderWithItems>),
        (status = 404, description = "No order with that number"),
    ),
    tag = "Orders"
)]
pub async fn lookup_order(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::lookup_order(&state, &order_number).await?;
    Ok(Json(resp))
}
