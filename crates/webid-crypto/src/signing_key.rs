use std::fmt;
use std::path::Path;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::{SigningKey, VerifyingKey};
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::Sha256;
use rsa::signature::Keypair;
use rsa::RsaPrivateKey;
use zeroize::Zeroize;

use crate::error::CryptoError;

/// The authority's private RSA signing key.
///
/// Loaded once at startup from a protected path and shared read-only
/// across sessions. The key material never leaves this type: `Debug`
/// is redacted and the type is deliberately not serializable.
pub struct AuthoritySigningKey {
    signing_key: SigningKey<Sha256>,
}

impl AuthoritySigningKey {
    /// Wrap an already-parsed private key.
    pub fn from_private_key(key: RsaPrivateKey) -> Self {
        Self {
            signing_key: SigningKey::new(key),
        }
    }

    /// Parse a PEM-encoded private key (PKCS#8, with PKCS#1 fallback
    /// for keys produced by older openssl deployments).
    pub fn from_pem(pem: &str) -> Result<Self, CryptoError> {
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| CryptoError::KeyLoad(format!("unparsable private key: {e}")))?;
        Ok(Self::from_private_key(key))
    }

    /// Load the key from a PEM file. The intermediate buffer is wiped
    /// after parsing.
    pub fn load(path: &Path) -> Result<Self, CryptoError> {
        let mut pem = std::fs::read_to_string(path)
            .map_err(|e| CryptoError::KeyLoad(format!("{}: {e}", path.display())))?;
        let result = Self::from_pem(&pem);
        pem.zeroize();
        if result.is_ok() {
            tracing::info!(path = %path.display(), "loaded authority signing key");
        }
        result
    }

    /// The matching public verification key, safe to hand out to
    /// relying services.
    pub fn verifying_key(&self) -> VerifyingKey<Sha256> {
        self.signing_key.verifying_key()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey<Sha256> {
        &self.signing_key
    }
}

impl fmt::Debug for AuthoritySigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthoritySigningKey(redacted)")
    }
}
