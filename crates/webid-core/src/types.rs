use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::hexnorm::normalize_modulus_hex;

/// Outcome of the TLS layer's client-key ownership check, as reported
/// by the terminating proxy (`SSL_CLIENT_VERIFY` and friends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TlsVerifyStatus {
    /// The handshake proved possession of the private key.
    Confirmed,
    /// Verified against a permissive trust anchor ("GENEROUS" in
    /// mod_ssl terms). Accepted: the key binding itself still held.
    Probable,
    /// Verification was attempted and failed.
    Failed,
    /// No verdict was supplied at all.
    Absent,
}

impl TlsVerifyStatus {
    /// Parse a terminator verdict header value.
    pub fn from_verdict(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => TlsVerifyStatus::Confirmed,
            "GENEROUS" => TlsVerifyStatus::Probable,
            "" | "NONE" => TlsVerifyStatus::Absent,
            _ => TlsVerifyStatus::Failed,
        }
    }

    /// Whether the TLS layer confirmed that the client controls the
    /// certificate's private key.
    pub fn is_owned(self) -> bool {
        matches!(self, TlsVerifyStatus::Confirmed | TlsVerifyStatus::Probable)
    }
}

/// An RSA public key declared inside a remote identity document.
///
/// Only the modulus participates in matching; exponents in the wild are
/// too inconsistently published to be load-bearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    /// Normalized (lower-case, no whitespace) hex modulus.
    pub modulus_hex: String,
    /// Normalized hex exponent, usually `10001`.
    pub exponent_hex: String,
}

impl KeyDescriptor {
    /// Build a descriptor, normalizing both fields.
    pub fn new(modulus_hex: &str, exponent_hex: &str) -> Self {
        Self {
            modulus_hex: normalize_modulus_hex(modulus_hex),
            exponent_hex: exponent_hex
                .trim()
                .trim_start_matches("0x")
                .to_ascii_lowercase(),
        }
    }

    /// Whether this key's modulus equals an already-normalized modulus.
    pub fn matches_modulus(&self, normalized_modulus_hex: &str) -> bool {
        self.modulus_hex == normalized_modulus_hex
    }
}

/// Terminal result of one authentication session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    /// The visitor controls `webid`; redirect them to the signed URL.
    Authenticated {
        webid: String,
        redirect_url: String,
    },
    /// Authentication failed; `error` carries the wire code and reason.
    Rejected { error: AuthError },
}

impl AuthenticationOutcome {
    /// The verified identity, when authenticated.
    pub fn identity(&self) -> Option<&str> {
        match self {
            AuthenticationOutcome::Authenticated { webid, .. } => Some(webid),
            AuthenticationOutcome::Rejected { .. } => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthenticationOutcome::Authenticated { .. })
    }
}
