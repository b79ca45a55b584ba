use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Admin;

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Admin as exposed to the back-office UI; never carries the password digest.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminInfo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<Admin> for AdminInfo {
    fn from(admin: Admin) -> Self {
        AdminInfo {
            id: admin.id,
            email: admin.email,
            name: admin.name,
            role: admin.role,
        }
    }
}
