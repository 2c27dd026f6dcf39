//! Integration test: the relying-service side of the protocol.
//!
//! A relying service receives the signed redirect, splits off the
//! signature and the issuer, and verifies the payload against the
//! authority's public key. This exercises the same parsing a real
//! callback endpoint would do.

use std::sync::Arc;

use webid_auth::{AuthRequest, AuthenticationSession};
use webid_core::{AuthenticationOutcome, TlsVerifyStatus};
use webid_crypto::{verify, RedirectSignature};
use webid_fetch::{parse_key_descriptors, DocumentFetcher, StaticDocumentFetcher};
use webid_integration_tests::{authority_key, client_cert_pem};

const ALICE: &str = "https://alice.example/card#me";
const REFERRER: &str = "https://sp.example/cb";

/// Alice's profile document in Turtle, declaring the browser key.
fn alice_profile_turtle() -> String {
    let cert = webid_cert::extract(
        client_cert_pem(&[ALICE]).as_bytes(),
        TlsVerifyStatus::Confirmed,
    )
    .expect("extract");
    format!(
        "@prefix cert: <http://www.w3.org/ns/auth/cert#> .\n\
         <#me> cert:key [\n\
    \x20   cert:modulus \"{}\"^^<http://www.w3.org/2001/XMLSchema#hexBinary> ;\n\
    \x20   cert:exponent 65537 ;\n\
         ] .\n",
        cert.modulus_hex
    )
}

async fn signed_redirect() -> String {
    let keys = parse_key_descriptors(&alice_profile_turtle());
    assert_eq!(keys.len(), 1, "profile should declare exactly one key");

    let fetcher = StaticDocumentFetcher::new().with_document(ALICE, keys);
    let mut session =
        AuthenticationSession::new(Arc::new(fetcher), authority_key(), "idp.example");
    let outcome = session
        .authenticate(&AuthRequest {
            certificate_pem: client_cert_pem(&[ALICE]).into_bytes(),
            tls_verify: TlsVerifyStatus::Confirmed,
            referrer: Some(REFERRER.into()),
        })
        .await;
    match outcome {
        AuthenticationOutcome::Authenticated { redirect_url, .. } => redirect_url,
        other => panic!("expected success, got {other:?}"),
    }
}

/// Split a redirect URL into (signed payload, signature, issuer host),
/// the way a relying service's callback endpoint would.
fn split_redirect(url: &str) -> (String, String, String) {
    let (payload, rest) = url.split_once("&sig=").expect("sig parameter");
    let (sig, referer) = rest.split_once("&referer=").expect("referer parameter");
    (payload.to_string(), sig.to_string(), referer.to_string())
}

#[tokio::test]
async fn test_relying_service_verifies_redirect_signature() {
    let redirect = signed_redirect().await;
    let (payload, sig, referer) = split_redirect(&redirect);

    assert!(payload.starts_with("https://sp.example/cb?webid="));
    assert_eq!(referer, "https://idp.example");

    let signature = RedirectSignature::from_url_safe_base64(&sig).expect("decode signature");
    verify(
        payload.as_bytes(),
        &signature,
        &authority_key().verifying_key(),
    )
    .expect("signature must verify over the payload");
}

#[tokio::test]
async fn test_tampered_webid_fails_verification() {
    let redirect = signed_redirect().await;
    let (payload, sig, _) = split_redirect(&redirect);

    let forged = payload.replace("alice", "mallory");
    assert_ne!(forged, payload);

    let signature = RedirectSignature::from_url_safe_base64(&sig).expect("decode signature");
    verify(
        forged.as_bytes(),
        &signature,
        &authority_key().verifying_key(),
    )
    .expect_err("a rewritten identity must not verify");
}

#[tokio::test]
async fn test_turtle_profile_authenticates_through_static_fetcher() {
    // sanity on the document pipeline itself: the parsed descriptors
    // are retrievable through the fetcher trait
    let keys = parse_key_descriptors(&alice_profile_turtle());
    let fetcher = StaticDocumentFetcher::new().with_document(ALICE, keys.clone());
    let fetched = fetcher
        .fetch_keys(ALICE, Some(ALICE))
        .await
        .expect("fetch");
    assert_eq!(fetched, keys);
    assert_eq!(fetched[0].exponent_hex, "10001");
}
