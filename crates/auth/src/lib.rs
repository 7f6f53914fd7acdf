//! `retailgate-auth`: permission resolution and the enforcement decision.
//!
//! This crate is intentionally decoupled from HTTP and storage: it consumes a
//! [`UserAuthContext`] snapshot and a permission name, and never performs IO.

pub mod claims;
pub mod context;
pub mod gate;
pub mod resolve;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use context::UserAuthContext;
pub use gate::{GateError, GateFailure, enforce};
pub use resolve::{
    AuthorizationExplanation, Decision, allows, allows_all, allows_any, decide, effective_permissions,
    explain,
};

pub use retailgate_catalog::{Permission, Role};
