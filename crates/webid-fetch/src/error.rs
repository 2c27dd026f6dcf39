use webid_core::AuthError;

/// Identity document retrieval errors.
///
/// All of these are recoverable at the matcher level: a candidate whose
/// document cannot be fetched simply contributes zero keys.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected HTTP status {0}")]
    BadStatus(u16),

    #[error("no document published at {0}")]
    NotFound(String),

    #[error("identity document exceeds {0} bytes")]
    TooLarge(usize),

    #[error("cannot load secretary identity: {0}")]
    Identity(String),

    #[error("http client setup failed: {0}")]
    Setup(String),
}

impl From<FetchError> for AuthError {
    fn from(err: FetchError) -> Self {
        AuthError::IdentityFetch(err.to_string())
    }
}
