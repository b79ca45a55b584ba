use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::AppError, models::Admin, state::AppState};

pub const SESSION_COOKIE: &str = "admin_session";
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Cookie payload: which admin, and when the session was issued
/// (milliseconds since the epoch).
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    pub admin_id: Uuid,
    pub timestamp: i64,
}

impl SessionData {
    pub fn new(admin_id: Uuid) -> Self {
        Self {
            admin_id,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp > SESSION_MAX_AGE_SECS * 1000
    }
}

pub fn encode_session(session: &SessionData) -> String {
    let raw = serde_json::json!({
        "admin_id": session.admin_id,
        "timestamp": session.timestamp,
    })
    .to_string();
    BASE64.encode(raw)
}

/// Pull the session out of a `Cookie` header value. Any malformed pair,
/// undecodable payload, or unknown shape yields `None` (treated upstream as
/// unauthenticated, never an error).
pub fn parse_session_cookie(cookie_header: &str) -> Option<SessionData> {
    for pair in cookie_header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let name = parts.next()?;
        let value = parts.next().unwrap_or("");
        if name == SESSION_COOKIE {
            let raw = BASE64.decode(value).ok()?;
            return serde_json::from_slice(&raw).ok();
        }
    }
    None
}

/// `Set-Cookie` value establishing the admin session for 7 days.
pub fn session_cookie(session: &SessionData) -> String {
    format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_MAX_AGE_SECS}",
        encode_session(session)
    )
}

/// `Set-Cookie` value dropping the admin session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Authenticated back-office admin, verified on every request by re-fetching
/// the admin record for the session's id.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_header = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let session = parse_session_cookie(cookie_header).ok_or(AppError::Unauthorized)?;
        if session.is_expired(Utc::now().timestamp_millis()) {
            return Err(AppError::Unauthorized);
        }

        let admin: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE id = $1")
            .bind(session.admin_id)
            .fetch_optional(&state.pool)
            .await?;
        let admin = admin.ok_or(AppError::Unauthorized)?;

        Ok(AdminSession {
            admin_id: admin.id,
            email: admin.email,
            name: admin.name,
            role: admin.role,
        })
    }
}
