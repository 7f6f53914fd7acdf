use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use retailgate_auth::{GateError, UserAuthContext};
use retailgate_core::UserId;

use crate::directory::UserRecord;
use crate::gate::GateRejection;

/// Authenticated identity attached to a request by the identity middleware.
///
/// Built from the user record during the same request; `context` is never
/// reused across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: UserId,
    display_name: String,
    context: UserAuthContext,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId, display_name: impl Into<String>, context: UserAuthContext) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            context,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn context(&self) -> &UserAuthContext {
        &self.context
    }
}

impl From<&UserRecord> for AuthenticatedUser {
    fn from(record: &UserRecord) -> Self {
        Self::new(record.id, record.display_name.clone(), record.auth_context())
    }
}

/// Extracting `AuthenticatedUser` in a handler rejects anonymous requests
/// with the gate's 401 shape.
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(GateRejection(GateError::Unauthenticated))
    }
}
