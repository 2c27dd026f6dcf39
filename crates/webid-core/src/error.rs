/// Authentication protocol errors.
///
/// Every variant maps to a wire code sent back to the relying service
/// as `?error=<code>`, matching codes that deployed verifiers already
/// understand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no certificate presented by the client")]
    NoCertificate,

    #[error("cannot parse client certificate: {0}")]
    ParseError(String),

    #[error("private key ownership was not confirmed by the TLS layer")]
    CertNotOwned,

    #[error("no WebID URIs found in the certificate")]
    NoUriFound,

    #[error("identity document fetch failed: {0}")]
    IdentityFetch(String),

    #[error("no candidate WebID matches the certificate key")]
    NoVerifiedWebId,

    #[error("signing failed: {0}")]
    Signing(String),
}

impl AuthError {
    /// Wire code carried in the `error=` redirect parameter.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::NoCertificate => "nocert",
            AuthError::ParseError(_) => "parseError",
            AuthError::CertNotOwned => "certNoOwnership",
            AuthError::NoUriFound => "noURI",
            AuthError::IdentityFetch(_) => "fetchError",
            AuthError::NoVerifiedWebId => "noVerifiedWebId",
            AuthError::Signing(_) => "signingError",
        }
    }

    /// Whether this error aborts the whole session. Per-candidate fetch
    /// failures are the only recoverable kind: the matcher records them
    /// as diagnostics and moves on to the next candidate.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AuthError::IdentityFetch(_))
    }
}
