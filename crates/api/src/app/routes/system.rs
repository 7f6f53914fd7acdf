use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::dto::CurrentUserResponse;
use crate::app::{errors, services::AppServices};
use crate::context::AuthenticatedUser;

pub async fn health() -> &'static str {
    "ok"
}

/// GET /me - the caller's record, as needed by the client-side mirror.
pub async fn me(
    Extension(services): Extension<Arc<AppServices>>,
    user: AuthenticatedUser,
) -> axum::response::Response {
    match services.users.get(&user.user_id()) {
        Some(record) => (StatusCode::OK, Json(CurrentUserResponse::from(record))).into_response(),
        // Deleted between identity resolution and this read.
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}
