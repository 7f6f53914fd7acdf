use serde::{Deserialize, Serialize};

use retailgate_auth::effective_permissions;
use retailgate_catalog::{CATALOG_VERSION, Permission, Role};
use retailgate_core::UserId;

use crate::directory::UserRecord;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

/// Full replacement of a user's access fields.
#[derive(Debug, Deserialize)]
pub struct UpdateAccessRequest {
    pub role: Role,
    pub active: bool,
    /// `null`/absent clears the custom list; role defaults apply again.
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    pub price_cents: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub price_cents: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub permission: String,
}

// -------------------------
// Response DTOs
// -------------------------

/// What the client needs to build its advisory permission mirror.
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub active: bool,
    pub permissions: Option<Vec<Permission>>,
    /// Resolved grant set; `null` for the admin bypass.
    pub effective_permissions: Option<Vec<Permission>>,
    pub catalog_version: u32,
}

impl From<UserRecord> for CurrentUserResponse {
    fn from(user: UserRecord) -> Self {
        let effective_permissions = effective_permissions(&user.auth_context());
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            active: user.active,
            permissions: user.permissions,
            effective_permissions,
            catalog_version: CATALOG_VERSION,
        }
    }
}
