/// Cryptographic operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("cannot load signing key: {0}")]
    KeyLoad(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("signature verification failed")]
    SignatureVerificationFailed,
}
