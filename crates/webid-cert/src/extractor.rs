use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

use webid_core::hexnorm::normalize_modulus_bytes;
use webid_core::{AuthError, TlsVerifyStatus};

/// Structured fields of the TLS client certificate, immutable once
/// extracted. Lives only for the duration of one authentication
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCertificate {
    /// `URI:` Subject-Alternative-Name entries, in certificate order.
    /// These are the identities the certificate claims; zero entries is
    /// valid here and rejected later by the matcher.
    pub san_uris: Vec<String>,
    /// Normalized (lower-case, no sign padding) hex RSA modulus.
    pub modulus_hex: String,
    /// Hex RSA public exponent, leading zeros stripped.
    pub exponent_hex: String,
    /// The TLS layer's key-ownership verdict for this certificate.
    pub tls_verify: TlsVerifyStatus,
}

/// Extract the protocol-relevant fields from a PEM client certificate.
///
/// Fails with `NoCertificate` on empty input and `ParseError` when the
/// PEM or X.509 structure cannot be decoded, or when the public key is
/// not RSA.
pub fn extract(pem: &[u8], tls_verify: TlsVerifyStatus) -> Result<ClientCertificate, AuthError> {
    if pem.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(AuthError::NoCertificate);
    }

    let der = first_certificate_der(pem)?;
    let (_, cert) = X509Certificate::from_der(&der)
        .map_err(|e| AuthError::ParseError(format!("invalid X.509 structure: {e}")))?;

    let san_uris = extract_san_uris(&cert);
    let (modulus_hex, exponent_hex) = extract_rsa_key(&cert)?;

    tracing::debug!(
        uris = san_uris.len(),
        modulus_bits = modulus_hex.len() * 4,
        "extracted client certificate"
    );

    Ok(ClientCertificate {
        san_uris,
        modulus_hex,
        exponent_hex,
        tls_verify,
    })
}

/// Decode the first CERTIFICATE block from a PEM buffer.
fn first_certificate_der(pem: &[u8]) -> Result<Vec<u8>, AuthError> {
    for pem_result in Pem::iter_from_buffer(pem) {
        let block =
            pem_result.map_err(|e| AuthError::ParseError(format!("invalid PEM: {e}")))?;
        if block.label == "CERTIFICATE" || block.label == "TRUSTED CERTIFICATE" {
            return Ok(block.contents);
        }
    }
    Err(AuthError::ParseError(
        "no CERTIFICATE block in PEM input".into(),
    ))
}

/// Collect `URI:` SAN entries in certificate order. Other SAN kinds
/// (DNS names, emails) are not identities in this protocol.
fn extract_san_uris(cert: &X509Certificate) -> Vec<String> {
    let mut uris = Vec::new();
    if let Ok(Some(san)) = cert.subject_alternative_name() {
        for gn in &san.value.general_names {
            if let GeneralName::URI(uri) = gn {
                uris.push(uri.to_string());
            }
        }
    }
    uris
}

/// Pull the RSA modulus and exponent out of the subject public key.
fn extract_rsa_key(cert: &X509Certificate) -> Result<(String, String), AuthError> {
    let parsed = cert
        .public_key()
        .parsed()
        .map_err(|e| AuthError::ParseError(format!("unparsable public key: {e}")))?;

    match parsed {
        PublicKey::RSA(rsa) => Ok((
            normalize_modulus_bytes(rsa.modulus),
            normalize_exponent(rsa.exponent),
        )),
        _ => Err(AuthError::ParseError(
            "unsupported public key algorithm (RSA required)".into(),
        )),
    }
}

fn normalize_exponent(raw: &[u8]) -> String {
    let hex = hex::encode(raw);
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".into()
    } else {
        trimmed.into()
    }
}
