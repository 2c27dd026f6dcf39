use webid_cert::ClientCertificate;
use webid_core::AuthError;
use webid_fetch::DocumentFetcher;

/// Maximum number of claimed URIs examined per certificate.
///
/// Each candidate costs this authority an outbound fetch; a hostile
/// certificate listing hundreds of URIs would otherwise turn the IdP
/// into a request amplifier.
pub const CANDIDATE_LIMIT: usize = 3;

/// Find the first claimed URI whose identity document declares the
/// certificate's RSA modulus.
///
/// Candidates are tried strictly in certificate order and the first
/// match wins. A candidate whose fetch fails contributes zero keys and
/// a diagnostic entry; it never aborts the pass.
pub async fn find_matching_identity(
    cert: &ClientCertificate,
    fetcher: &dyn DocumentFetcher,
    diagnostics: &mut Vec<String>,
) -> Result<String, AuthError> {
    // Ownership gate comes before any network IO.
    if !cert.tls_verify.is_owned() {
        return Err(AuthError::CertNotOwned);
    }

    if cert.san_uris.is_empty() {
        return Err(AuthError::NoUriFound);
    }

    let limit = cert.san_uris.len().min(CANDIDATE_LIMIT);
    for uri in &cert.san_uris[..limit] {
        let keys = match fetcher.fetch_keys(uri, Some(uri)).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::debug!(uri, error = %e, "candidate fetch failed, skipping");
                diagnostics.push(format!("candidate {uri}: {e}"));
                continue;
            }
        };

        if keys.iter().any(|k| k.matches_modulus(&cert.modulus_hex)) {
            tracing::info!(webid = uri, "verified identity");
            return Ok(uri.clone());
        }
    }

    Err(AuthError::NoVerifiedWebId)
}
