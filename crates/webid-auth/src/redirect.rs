//! Signed redirect construction.
//!
//! The payload string built here is the exact byte sequence that gets
//! signed; relying services reconstruct and verify it, so its shape is
//! a wire-format commitment, not a formatting preference.

use chrono::{DateTime, SecondsFormat, Utc};

use webid_core::AuthError;
use webid_crypto::{sign, AuthoritySigningKey};

/// Authentication timestamp: RFC 3339 with seconds precision and `Z`
/// suffix, e.g. `2024-01-01T00:00:00Z`.
///
/// The original deployment's format string left the `T` separator
/// unescaped and produced a timezone name in its place; this emits the
/// corrected ISO-8601 form.
pub fn auth_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build the canonical payload:
/// `referrer` + `?`/`&` + `webid=<encoded uri>` + `&ts=<encoded ts>`.
///
/// `?` is used when the referrer has no query component, `&` otherwise.
pub fn build_payload(referrer: &str, webid: &str, timestamp: &str) -> String {
    let joiner = if referrer.contains('?') { '&' } else { '?' };
    format!(
        "{referrer}{joiner}webid={}&ts={}",
        urlencoding::encode(webid),
        urlencoding::encode(timestamp)
    )
}

/// Sign the payload and assemble the final redirect URL:
/// `payload&sig=<url-safe-base64>&referer=https://<authority host>`.
///
/// Fails with `Signing` if the signature cannot be produced; an
/// unsigned redirect is never emitted.
pub fn build_signed_redirect(
    webid: &str,
    referrer: &str,
    timestamp: &str,
    key: &AuthoritySigningKey,
    authority_host: &str,
) -> Result<String, AuthError> {
    let payload = build_payload(referrer, webid, timestamp);
    let signature =
        sign(payload.as_bytes(), key).map_err(|e| AuthError::Signing(e.to_string()))?;
    Ok(format!(
        "{payload}&sig={}&referer=https://{authority_host}",
        signature.to_url_safe_base64()
    ))
}
