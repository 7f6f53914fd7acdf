use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to decode current user: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("not signed in")]
    NotSignedIn,

    #[cfg(feature = "http")]
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
