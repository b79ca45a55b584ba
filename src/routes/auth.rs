use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
};

use crate::{
    dto::auth::{AdminInfo, LoginRequest},
    error::AppResult,
    middleware::auth::{AdminSession, clear_session_cookie},
    response::{ApiResponse, Meta},
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
}

#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login, sets the admin session cookie", body = ApiResponse<AdminInfo>),
        (status = 400, description = "Missing email or password"),
        (status = 401, description = "Wrong email or password"),
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let (body, cookie) = auth_service::login(&state, payload).await?;
    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Json(body)))
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    responses(
        (status = 200, description = "Logout, clears the admin session cookie"),
    ),
    tag = "Auth"
)]
pub async fn logout() -> impl IntoResponse {
    let body = ApiResponse::success("Logged out", serde_json::json!({}), Some(Meta::empty()));
    (
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Json(body),
    )
}

#[utoipa::path(
    get,
    path = "/api/admin/session",
    responses(
        (status = 200, description = "Currently authenticated admin", body = ApiResponse<AdminInfo>),
        (status = 401, description = "No valid session"),
    ),
    tag = "Auth"
)]
pub async fn session(session: AdminSession) -> Json<ApiResponse<AdminInfo>> {
    let info = AdminInfo {
        id: session.admin_id,
        email: session.email,
        name: session.name,
        role: session.role,
    };
    Json(ApiResponse::success("Session", info, Some(Meta::empty())))
}
