//! `ApiClient` against the real router, end to end.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use retailgate_api::app::{AppServices, build_app_with};
use retailgate_api::directory::UserRecord;
use retailgate_auth::JwtClaims;
use retailgate_catalog::{Role, permissions as p};
use retailgate_client::{ApiClient, ClientError, ClientSession};
use retailgate_core::UserId;

const JWT_SECRET: &str = "test-secret";

async fn spawn(services: Arc<AppServices>) -> (String, tokio::task::JoinHandle<()>) {
    let app = build_app_with(services, JWT_SECRET.as_bytes());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), handle)
}

fn mint_jwt(sub: UserId) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub,
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

#[tokio::test]
async fn session_follows_server_side_changes_on_sync() {
    let services = Arc::new(AppServices::in_memory());
    let mut staff = UserRecord::new("ana@shop.test", "Ana", Role::STAFF);
    services.add_user(staff.clone()).unwrap();
    let (base_url, handle) = spawn(services.clone()).await;

    let client = ApiClient::new(base_url).with_token(mint_jwt(staff.id));
    let mut session = ClientSession::new();

    assert!(client.sync_session(&mut session).await.unwrap());
    assert!(session.can("sales.view"));
    assert!(!session.is_stale());

    staff.permissions = Some(vec![p::SALES_DELETE]);
    services.users.upsert(staff.clone());

    // Mirror is a snapshot until explicitly refreshed.
    assert!(session.can("sales.view"));
    assert!(client.sync_session(&mut session).await.unwrap());
    assert!(!session.can("sales.view"));
    assert!(session.can("sales.delete"));

    services.users.remove(&staff.id);
    let err = client.sync_session(&mut session).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
    assert!(!session.is_signed_in());

    handle.abort();
}

#[tokio::test]
async fn missing_token_is_not_signed_in() {
    let client = ApiClient::new("http://127.0.0.1:9");
    assert!(matches!(
        client.fetch_current_user().await,
        Err(ClientError::NotSignedIn)
    ));
}
