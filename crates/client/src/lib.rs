//! `retailgate-client`
//!
//! **Responsibility:** client-side permission checks for UI gating.
//!
//! This crate provides:
//! - [`PermissionMirror`]: a local copy of the resolution rules
//! - [`ClientSession`]: holds the signed-in user's snapshot
//! - `ApiClient` (feature `http`): loads the snapshot from `GET /me`
//!
//! Every answer here is advisory. The server gate remains the authority and
//! may disagree while the snapshot is stale.

pub mod error;
pub mod mirror;
pub mod session;
pub mod types;

#[cfg(feature = "http")]
pub mod http;

pub use error::ClientError;
pub use mirror::PermissionMirror;
pub use session::ClientSession;
pub use types::CurrentUser;

#[cfg(feature = "http")]
pub use http::ApiClient;
