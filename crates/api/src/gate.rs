//! Per-route permission enforcement.
//!
//! ```ignore
//! Router::new().route("/", gated(get(list_items), permissions::INVENTORY_VIEW))
//! ```
//!
//! The gate reads the identity attached by the identity middleware, decides
//! with [`retailgate_auth::enforce`] and either forwards the request untouched
//! or answers with the structured rejection. Nothing is cached between calls.

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};

use retailgate_auth::{GateError, Permission, enforce};

use crate::context::AuthenticatedUser;

/// Gate rejection as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateRejection(pub GateError);

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::FORBIDDEN);
        (status, Json(self.0.to_failure())).into_response()
    }
}

/// Guard `route` so that its handlers only run when `required` is granted.
pub fn gated<S>(route: MethodRouter<S>, required: Permission) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(required, require_permission))
}

pub async fn require_permission(
    State(required): State<Permission>,
    req: Request,
    next: Next,
) -> Response {
    let user = req.extensions().get::<AuthenticatedUser>();
    let user_id = user.map(AuthenticatedUser::user_id);
    let outcome = enforce(user.map(AuthenticatedUser::context), &required);

    match outcome {
        Ok(()) => {
            tracing::debug!(
                user_id = ?user_id,
                permission = %required,
                "permission granted"
            );
            next.run(req).await
        }
        Err(err) => {
            let role = match &err {
                GateError::PermissionDenied { user_role, .. } => Some(user_role.to_string()),
                _ => None,
            };
            tracing::warn!(
                user_id = ?user_id,
                permission = %required,
                role = ?role,
                reason = %err,
                "request rejected by permission gate"
            );
            GateRejection(err).into_response()
        }
    }
}
