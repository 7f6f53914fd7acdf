//! Loading the current user from the API.

use crate::error::ClientError;
use crate::session::ClientSession;
use crate::types::CurrentUser;

pub struct ApiClient {
    api_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// GET /me
    pub async fn fetch_current_user(&self) -> Result<CurrentUser, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotSignedIn)?;
        let resp = self
            .http
            .get(format!("{}/me", self.api_url))
            .bearer_auth(token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        Ok(resp.json().await?)
    }

    /// Re-initialize `session` from the server.
    ///
    /// A 401 signs the session out; other failures leave the current snapshot
    /// in place.
    pub async fn sync_session(&self, session: &mut ClientSession) -> Result<bool, ClientError> {
        match self.fetch_current_user().await {
            Ok(user) => Ok(session.refresh(user)),
            Err(ClientError::Api { status: 401, message }) => {
                session.sign_out();
                Err(ClientError::Api {
                    status: 401,
                    message,
                })
            }
            Err(e) => Err(e),
        }
    }
}
