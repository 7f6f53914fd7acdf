//! Identity middleware: resolves the bearer token to a user record and
//! attaches an [`AuthenticatedUser`] to the request.
//!
//! Anonymous requests pass through untouched; rejecting them is the gate's job.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use retailgate_auth::{JwtClaims, TokenValidationError, validate_claims};

use crate::context::AuthenticatedUser;
use crate::directory::UserRecord;
use crate::store::EntityStore;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token could not be decoded: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies a bearer token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// HMAC-SHA256 token verification.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: &[u8]) -> Self {
        // Expiry lives in our own claim names and is checked by `validate_claims`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

/// Yields the authenticated identity of a request, or `None`.
pub trait IdentityProvider: Send + Sync {
    fn identify(&self, headers: &HeaderMap) -> Option<AuthenticatedUser>;
}

/// Bearer token + user directory lookup on every request.
pub struct BearerIdentityProvider {
    jwt: Arc<dyn JwtValidator>,
    users: Arc<dyn EntityStore<UserRecord>>,
}

impl BearerIdentityProvider {
    pub fn new(jwt: Arc<dyn JwtValidator>, users: Arc<dyn EntityStore<UserRecord>>) -> Self {
        Self { jwt, users }
    }
}

impl IdentityProvider for BearerIdentityProvider {
    fn identify(&self, headers: &HeaderMap) -> Option<AuthenticatedUser> {
        let token = extract_bearer(headers)?;

        let claims = match self.jwt.validate(token, Utc::now()) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "bearer token rejected");
                return None;
            }
        };

        match self.users.get(&claims.sub) {
            Some(record) => Some(AuthenticatedUser::from(&record)),
            None => {
                tracing::debug!(user_id = %claims.sub, "token subject has no user record");
                None
            }
        }
    }
}

#[derive(Clone)]
pub struct IdentityState {
    pub provider: Arc<dyn IdentityProvider>,
}

pub async fn identity_middleware(
    State(state): State<IdentityState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(user) = state.provider.identify(req.headers()) {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    use retailgate_catalog::Role;

    use super::*;
    use crate::store::InMemoryStore;

    const SECRET: &[u8] = b"test-secret";

    fn mint(claims: &JwtClaims, secret: &[u8]) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    fn provider_with(user: &UserRecord) -> BearerIdentityProvider {
        let users: Arc<InMemoryStore<UserRecord>> = Arc::new(InMemoryStore::new());
        users.upsert(user.clone());
        BearerIdentityProvider::new(Arc::new(Hs256JwtValidator::new(SECRET)), users)
    }

    fn claims_for(user: &UserRecord) -> JwtClaims {
        let now = Utc::now();
        JwtClaims {
            sub: user.id,
            issued_at: now - Duration::seconds(5),
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn valid_token_resolves_current_record() {
        let user = UserRecord::new("ana@shop.test", "Ana", Role::STAFF);
        let provider = provider_with(&user);

        let identity = provider.identify(&bearer(&mint(&claims_for(&user), SECRET))).unwrap();
        assert_eq!(identity.user_id(), user.id);
        assert_eq!(identity.context().role, Role::STAFF);
    }

    #[test]
    fn record_changes_apply_without_new_token() {
        let mut user = UserRecord::new("ana@shop.test", "Ana", Role::STAFF);
        let users: Arc<InMemoryStore<UserRecord>> = Arc::new(InMemoryStore::new());
        users.upsert(user.clone());
        let provider =
            BearerIdentityProvider::new(Arc::new(Hs256JwtValidator::new(SECRET)), users.clone());
        let headers = bearer(&mint(&claims_for(&user), SECRET));

        user.active = false;
        users.upsert(user.clone());

        let identity = provider.identify(&headers).unwrap();
        assert!(!identity.context().active);
    }

    #[test]
    fn wrong_secret_expired_or_unknown_subject_is_anonymous() {
        let user = UserRecord::new("ana@shop.test", "Ana", Role::STAFF);
        let provider = provider_with(&user);

        assert!(provider.identify(&bearer(&mint(&claims_for(&user), b"other"))).is_none());

        let mut expired = claims_for(&user);
        expired.issued_at = Utc::now() - Duration::minutes(20);
        expired.expires_at = Utc::now() - Duration::minutes(10);
        assert!(provider.identify(&bearer(&mint(&expired, SECRET))).is_none());

        let stranger = UserRecord::new("eve@shop.test", "Eve", Role::ADMIN);
        assert!(provider.identify(&bearer(&mint(&claims_for(&stranger), SECRET))).is_none());
    }

    #[test]
    fn malformed_authorization_header_is_anonymous() {
        let user = UserRecord::new("ana@shop.test", "Ana", Role::STAFF);
        let provider = provider_with(&user);

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc"),
        );
        assert!(provider.identify(&headers).is_none());
        assert!(provider.identify(&bearer("")).is_none());
        assert!(provider.identify(&HeaderMap::new()).is_none());
    }
}
