//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: record stores shared by the handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::config::ApiConfig;
use crate::middleware::{BearerIdentityProvider, Hs256JwtValidator, IdentityState, identity_middleware};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router from process configuration (used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> anyhow::Result<Router> {
    retailgate_catalog::validate()?;
    let services = Arc::new(AppServices::from_config(config)?);
    Ok(build_app_with(services, config.jwt_secret.as_bytes()))
}

/// Build the router over pre-wired services.
pub fn build_app_with(services: Arc<AppServices>, jwt_secret: &[u8]) -> Router {
    let provider = BearerIdentityProvider::new(
        Arc::new(Hs256JwtValidator::new(jwt_secret)),
        services.users.clone(),
    );
    let identity = IdentityState {
        provider: Arc::new(provider),
    };

    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(identity, identity_middleware));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
