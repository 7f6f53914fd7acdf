//! User directory endpoints.
//!
//! Access changes (`PUT /users/:id/access`) take effect on the target's next
//! request: identities are re-derived from the directory every time.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use retailgate_catalog::{Role, permissions as p};
use retailgate_core::{DomainError, UserId};

use crate::app::{dto, errors, services::AppServices};
use crate::context::AuthenticatedUser;
use crate::directory::{UserRecord, validate_access};
use crate::gate::gated;

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            gated(get(list_users), p::USERS_VIEW).merge(gated(post(create_user), p::USERS_CREATE)),
        )
        .route(
            "/:id",
            gated(get(get_user), p::USERS_VIEW).merge(gated(delete(delete_user), p::USERS_DELETE)),
        )
        .route("/:id/access", gated(put(update_access), p::USERS_UPDATE))
}

fn parse_id(raw: &str) -> Result<UserId, axum::response::Response> {
    raw.parse::<UserId>().map_err(errors::domain_error_to_response)
}

/// Only admins may grant the admin role or change an admin account.
fn require_admin_for(caller: &AuthenticatedUser, role: &Role) -> Result<(), axum::response::Response> {
    if role.is_admin() && !caller.context().role.is_admin() {
        tracing::warn!(
            user_id = %caller.user_id(),
            role = %caller.context().role,
            "non-admin attempted to manage an admin account"
        );
        return Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "only admins can manage admin accounts",
        ));
    }
    Ok(())
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let users = services.users.list();
    (StatusCode::OK, Json(json!({ "users": users }))).into_response()
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match services.users.get(&id) {
        Some(user) => (StatusCode::OK, Json(json!({ "user": user }))).into_response(),
        None => errors::domain_error_to_response(DomainError::not_found()),
    }
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    caller: AuthenticatedUser,
    Json(body): Json<dto::CreateUserRequest>,
) -> axum::response::Response {
    if let Err(res) = require_admin_for(&caller, &body.role) {
        return res;
    }

    let mut user = UserRecord::new(body.email, body.display_name, body.role);
    user.permissions = body.permissions;

    if let Err(e) = services.add_user(user.clone()) {
        return errors::domain_error_to_response(e);
    }

    tracing::info!(
        user_id = %user.id,
        created_by = %caller.user_id(),
        role = %user.role,
        "user created"
    );
    (StatusCode::CREATED, Json(json!({ "user": user }))).into_response()
}

/// PUT /users/:id/access - replace role, active flag and custom permissions.
pub async fn update_access(
    Extension(services): Extension<Arc<AppServices>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateAccessRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    if let Err(e) = validate_access(&body.role, body.permissions.as_deref()) {
        return errors::domain_error_to_response(e);
    }

    if id == caller.user_id() {
        return errors::domain_error_to_response(DomainError::conflict(
            "cannot change your own access",
        ));
    }

    let Some(mut user) = services.users.get(&id) else {
        return errors::domain_error_to_response(DomainError::not_found());
    };

    for role in [&user.role, &body.role] {
        if let Err(res) = require_admin_for(&caller, role) {
            return res;
        }
    }

    user.role = body.role;
    user.active = body.active;
    user.permissions = body.permissions;
    services.users.upsert(user.clone());

    tracing::info!(
        user_id = %user.id,
        changed_by = %caller.user_id(),
        role = %user.role,
        active = user.active,
        custom_permissions = user.permissions.as_ref().is_some_and(|list| !list.is_empty()),
        "user access updated"
    );
    (StatusCode::OK, Json(json!({ "user": user }))).into_response()
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    if id == caller.user_id() {
        return errors::domain_error_to_response(DomainError::conflict("cannot delete yourself"));
    }

    let Some(target) = services.users.get(&id) else {
        return errors::domain_error_to_response(DomainError::not_found());
    };
    if let Err(res) = require_admin_for(&caller, &target.role) {
        return res;
    }

    match services.users.remove(&id) {
        Some(_) => {
            tracing::info!(user_id = %id, deleted_by = %caller.user_id(), "user deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        None => errors::domain_error_to_response(DomainError::not_found()),
    }
}
