use sha2::{Digest, Sha256};

use crate::{
    audit::log_audit,
    dto::auth::{AdminInfo, LoginRequest},
    error::{AppError, AppResult},
    middleware::auth::{SessionData, session_cookie},
    models::Admin,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Fast unsalted digest, matching what the storefront has always stored.
/// Admin accounts are seeded out of band, so the weak scheme is a known and
/// accepted property of the current system.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Verify credentials and mint the session cookie. Returns the admin profile
/// plus the `Set-Cookie` value for the route layer to attach.
pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<(ApiResponse<AdminInfo>, String)> {
    let LoginRequest { email, password } = payload;
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let digest = hash_password(&password);
    let admin: Option<Admin> =
        sqlx::query_as("SELECT * FROM admins WHERE email = $1 AND password = $2")
            .bind(email.as_str())
            .bind(digest)
            .fetch_optional(&state.pool)
            .await?;

    let admin = match admin {
        Some(a) => a,
        None => return Err(AppError::Unauthorized),
    };

    if let Err(err) = log_audit(
        &state.pool,
        Some(admin.id),
        "admin_login",
        Some("admins"),
        Some(serde_json::json!({ "admin_id": admin.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    let cookie = session_cookie(&SessionData::new(admin.id));
    Ok((
        ApiResponse::success("Logged in", AdminInfo::from(admin), Some(Meta::empty())),
        cookie,
    ))
}
