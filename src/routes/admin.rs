use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::{get, patch, put},
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::{
        orders::{
            OrderList, OrderWithItems, UpdateOrderStatusRequest, UpdatePaymentStatusRequest,
        },
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        reports::{DashboardStats, FinanceReport},
    },
    error::{AppError, AppResult},
    middleware::auth::AdminSession,
    models::{Order, Product},
    response::{ApiResponse, Meta},
    routes::{auth, params::{OrderListQuery, Pagination}},
    services::{admin_service, report_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .route("/orders", get(list_all_orders))
        .route("/orders/{id}", get(get_order_admin))
        .route("/orders/{id}/status", patch(update_order_status))
        .route("/orders/{id}/payment", patch(update_payment_status))
        .route("/dashboard", get(dashboard))
        .route("/finance", get(finance_report))
        .route("/finance/export", get(export_finance_csv))
        .route(
            "/products",
            get(list_products_admin).post(create_product),
        )
        .route("/products/{id}", put(update_product).delete(delete_product))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("order_status" = Option<String>, Query, description = "Filter by fulfillment status"),
        ("payment_status" = Option<String>, Query, description = "Filter by payment status"),
        ("sort_order" = Option<String>, Query, description = "Sort by creation time: asc, desc")
    ),
    responses(
        (status = 200, description = "All orders", body = ApiResponse<OrderList>),
        (status = 401, description = "No valid session"),
    ),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_all_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order with items", body = ApiResponse<OrderWithItems>),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Admin"
)]
pub async fn get_order_admin(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = admin_service::get_order_admin(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Fulfillment status updated", body = ApiResponse<Order>),
        (status = 400, description = "Unknown status value"),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Admin"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::update_order_status(&state, &session, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/payment",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdatePaymentStatusRequest,
    responses(
        (status = 200, description = "Payment status updated", body = ApiResponse<Order>),
        (status = 400, description = "Unknown status value"),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Admin"
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaymentStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::update_payment_status(&state, &session, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Today's numbers and recent orders", body = ApiResponse<DashboardStats>),
        (status = 401, description = "No valid session"),
    ),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let resp = report_service::dashboard_stats(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/finance",
    responses(
        (status = 200, description = "Finance totals and transaction list", body = ApiResponse<FinanceReport>),
        (status = 401, description = "No valid session"),
    ),
    tag = "Admin"
)]
pub async fn finance_report(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<Json<ApiResponse<FinanceReport>>> {
    let resp = report_service::finance_report(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/finance/export",
    responses(
        (status = 200, description = "Finance report as CSV", body = String, content_type = "text/csv"),
        (status = 401, description = "No valid session"),
    ),
    tag = "Admin"
)]
pub async fn export_finance_csv(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AppResult<impl IntoResponse> {
    let csv = report_service::export_finance_csv(&state).await?;
    let disposition = format!(
        "attachment; filename=\"finance-report-{}.csv\"",
        Utc::now().format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    ))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "All products, including unavailable ones", body = ApiResponse<ProductList>),
        (status = 401, description = "No valid session"),
    ),
    tag = "Admin"
)]
pub async fn list_products_admin(
    State(state): State<AppState>,
    _session: AdminSession,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let (page, limit, offset) = pagination.normalize();
    let items = sqlx::query_as::<_, Product>(
        "SELECT * FROM products ORDER BY created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(Json(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Negative price"),
        (status = 401, description = "No valid session"),
    ),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    session: AdminSession,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Product name is required".into()));
    }
    if payload.price < 0 {
        return Err(AppError::BadRequest("Price must not be negative".into()));
    }

    let id = Uuid::new_v4();
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (id, name, category, price, description, image, available, stock)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.name)
    .bind(payload.category)
    .bind(payload.price)
    .bind(payload.description)
    .bind(payload.image)
    .bind(payload.available)
    .bind(payload.stock)
    .fetch_one(&state.pool)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(session.admin_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(Json(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<Product>),
        (status = 400, description = "Negative price"),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let existing = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    // Merge semantics: an absent field keeps its stored value, so optional
    // fields can be overwritten but never cleared back to NULL.
    let name = payload.name.unwrap_or(existing.name);
    let category = payload.category.unwrap_or(existing.category);
    let price = payload.price.unwrap_or(existing.price);
    let description = payload.description.or(existing.description);
    let image = payload.image.or(existing.image);
    let available = payload.available.unwrap_or(existing.available);
    let stock = payload.stock.or(existing.stock);

    if price < 0 {
        return Err(AppError::BadRequest("Price must not be negative".into()));
    }

    let product = sqlx::query_as::<_, Product>(
        r#"
        UPDATE products
        SET name = $2, category = $3, price = $4, description = $5,
            image = $6, available = $7, stock = $8, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(category)
    .bind(price)
    .bind(description)
    .bind(image)
    .bind(available)
    .bind(stock)
    .fetch_one(&state.pool)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(session.admin_id),
        "product_update",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(Json(ApiResponse::success(
        "Product updated",
        product,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted; historical order item snapshots are untouched"),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(session.admin_id),
        "product_delete",
        Some("products"),
        Some(serde_json::json!({ "product_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(Json(ApiResponse::success(
        "Product deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
