use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};

use crate::error::CryptoError;
use crate::signing_key::AuthoritySigningKey;

/// RSASSA-PKCS1-v1_5/SHA-256 signature over a redirect payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSignature {
    bytes: Vec<u8>,
}

impl RedirectSignature {
    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encode as URL-safe base64 without padding, the form carried in
    /// the `sig=` redirect parameter.
    pub fn to_url_safe_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.bytes)
    }

    /// Decode from the `sig=` parameter form.
    pub fn from_url_safe_base64(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|e| CryptoError::InvalidInput(format!("bad signature encoding: {e}")))?;
        Ok(Self { bytes })
    }

    /// Wrap raw signature bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

/// Sign a redirect payload with the authority key.
pub fn sign(payload: &[u8], key: &AuthoritySigningKey) -> Result<RedirectSignature, CryptoError> {
    let signature = key
        .signing_key()
        .try_sign(payload)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    Ok(RedirectSignature {
        bytes: signature.to_bytes().as_ref().to_vec(),
    })
}

/// Verify a redirect signature against the authority public key.
pub fn verify(
    payload: &[u8],
    signature: &RedirectSignature,
    key: &VerifyingKey<Sha256>,
) -> Result<(), CryptoError> {
    let signature = Signature::try_from(signature.as_bytes())
        .map_err(|_| CryptoError::SignatureVerificationFailed)?;
    key.verify(payload, &signature)
        .map_err(|_| CryptoError::SignatureVerificationFailed)
}
