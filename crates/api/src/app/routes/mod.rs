use axum::{Router, routing::get};

pub mod inventory;
pub mod rbac;
pub mod system;
pub mod users;

/// Router for every endpoint behind the identity middleware.
///
/// Permission requirements are attached per route with [`crate::gate::gated`];
/// routes without one only need an authenticated caller.
pub fn router() -> Router {
    Router::new()
        .route("/me", get(system::me))
        .nest("/rbac", rbac::router())
        .nest("/users", users::router())
        .nest("/inventory", inventory::router())
}
