//! Enforcement decision for the request boundary.
//!
//! Transport-agnostic: the HTTP layer maps [`GateError`] to a status code and
//! serializes [`GateFailure`] as the response body.

use serde::Serialize;
use thiserror::Error;

use retailgate_catalog::{Permission, Role};

use crate::{UserAuthContext, resolve};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("account inactive")]
    InactiveAccount,

    #[error("no permission")]
    PermissionDenied {
        required_permission: Permission,
        user_role: Role,
    },
}

impl GateError {
    /// HTTP-equivalent status code.
    pub fn status_code(&self) -> u16 {
        match self {
            GateError::Unauthenticated => 401,
            GateError::InactiveAccount | GateError::PermissionDenied { .. } => 403,
        }
    }

    pub fn to_failure(&self) -> GateFailure {
        let (required_permission, user_role) = match self {
            GateError::PermissionDenied {
                required_permission,
                user_role,
            } => (Some(required_permission.clone()), Some(user_role.clone())),
            _ => (None, None),
        };

        GateFailure {
            success: false,
            message: self.to_string(),
            required_permission,
            user_role,
        }
    }
}

/// Wire shape of a gate rejection.
///
/// Carries the required permission and the caller's role for audit, never the
/// caller's override list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateFailure {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<Permission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
}

/// Decide whether a request may reach a handler guarded by `required`.
///
/// Checks run in order: identity present, account active, permission granted.
/// The active check runs before resolution, so a deactivated admin is rejected
/// here even though the engine's admin bypass would grant the permission.
pub fn enforce(identity: Option<&UserAuthContext>, required: &Permission) -> Result<(), GateError> {
    let ctx = identity.ok_or(GateError::Unauthenticated)?;

    if !ctx.active {
        return Err(GateError::InactiveAccount);
    }

    if resolve::allows(ctx, required.as_str()) {
        Ok(())
    } else {
        Err(GateError::PermissionDenied {
            required_permission: required.clone(),
            user_role: ctx.role.clone(),
        })
    }
}
