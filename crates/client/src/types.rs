//! Wire types shared with the API (`GET /me`).

use serde::{Deserialize, Serialize};

use retailgate_catalog::{Permission, Role};

use crate::error::ClientError;

/// The signed-in user as returned by `GET /me`.
///
/// Only the access fields feed the mirror; unknown fields are ignored so a
/// newer server can add more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub active: bool,
    #[serde(default)]
    pub permissions: Option<Vec<Permission>>,
    #[serde(default)]
    pub catalog_version: u32,
}

impl CurrentUser {
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_me_payload_and_ignores_extra_fields() {
        let user = CurrentUser::from_json(
            r#"{
                "id": "0190c0de-0000-7000-8000-000000000001",
                "email": "ana@shop.test",
                "display_name": "Ana",
                "role": "staff",
                "active": true,
                "permissions": null,
                "effective_permissions": ["products.view"],
                "catalog_version": 1
            }"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::STAFF);
        assert!(user.permissions.is_none());
        assert_eq!(user.catalog_version, 1);
    }

    #[test]
    fn unknown_role_is_still_decoded() {
        let user = CurrentUser::from_json(
            r#"{ "id": "x", "email": "e@x", "display_name": "E", "role": "auditor", "active": true }"#,
        )
        .unwrap();
        assert_eq!(user.role.as_str(), "auditor");
        assert_eq!(user.catalog_version, 0);
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        assert!(matches!(
            CurrentUser::from_json("{"),
            Err(ClientError::Decode(_))
        ));
    }
}
