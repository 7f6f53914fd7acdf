//! RBAC introspection endpoints.
//!
//! Catalog listings and a self-service "why was I denied?" explanation. The
//! explanation is always about the caller; it never exposes another user's
//! custom permission list.

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use retailgate_auth::explain;
use retailgate_catalog::{self as catalog, CATALOG_VERSION};

use crate::app::dto::ExplainQuery;
use crate::context::AuthenticatedUser;

pub fn router() -> Router {
    Router::new()
        .route("/permissions", get(list_permissions))
        .route("/roles", get(list_roles))
        .route("/explain", get(explain_decision))
}

/// GET /rbac/permissions
pub async fn list_permissions(_user: AuthenticatedUser) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(json!({
            "catalog_version": CATALOG_VERSION,
            "permissions": catalog::list_all(),
        })),
    )
        .into_response()
}

/// GET /rbac/roles
pub async fn list_roles(_user: AuthenticatedUser) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(json!({
            "catalog_version": CATALOG_VERSION,
            "roles": catalog::roles(),
        })),
    )
        .into_response()
}

/// GET /rbac/explain?permission=X
pub async fn explain_decision(
    user: AuthenticatedUser,
    Query(query): Query<ExplainQuery>,
) -> axum::response::Response {
    let explanation = explain(user.context(), &query.permission);
    (StatusCode::OK, Json(json!({ "explanation": explanation }))).into_response()
}
