//! Integration test: full authentication flow across crates.
//!
//! Drives real certificate extraction (webid-cert), candidate matching
//! against declared keys (webid-fetch + webid-auth), and redirect
//! signing (webid-crypto) together, end to end.

use std::sync::Arc;

use webid_auth::{AuthRequest, AuthenticationSession};
use webid_cert::extract;
use webid_core::{AuthError, AuthenticationOutcome, KeyDescriptor, TlsVerifyStatus};
use webid_fetch::StaticDocumentFetcher;
use webid_integration_tests::{authority_key, client_cert_pem};

const ALICE: &str = "https://alice.example/card#me";
const BACKUP: &str = "https://alice.example/backup#me";
const REFERRER: &str = "https://sp.example/cb";

/// The browser key's modulus as the extractor reports it.
fn browser_modulus() -> String {
    let pem = client_cert_pem(&[ALICE]);
    extract(pem.as_bytes(), TlsVerifyStatus::Confirmed)
        .expect("extract")
        .modulus_hex
}

fn matching_key() -> KeyDescriptor {
    KeyDescriptor::new(&browser_modulus(), "10001")
}

fn wrong_key() -> KeyDescriptor {
    KeyDescriptor::new(&"ab".repeat(256), "10001")
}

async fn authenticate(
    fetcher: StaticDocumentFetcher,
    uris: &[&str],
    tls_verify: TlsVerifyStatus,
) -> (AuthenticationOutcome, Vec<String>) {
    let mut session =
        AuthenticationSession::new(Arc::new(fetcher), authority_key(), "idp.example");
    let outcome = session
        .authenticate(&AuthRequest {
            certificate_pem: client_cert_pem(uris).into_bytes(),
            tls_verify,
            referrer: Some(REFERRER.into()),
        })
        .await;
    (outcome, session.diagnostics().to_vec())
}

#[tokio::test]
async fn test_authenticates_first_matching_candidate() {
    let fetcher = StaticDocumentFetcher::new().with_document(ALICE, vec![matching_key()]);
    let (outcome, diags) = authenticate(fetcher, &[ALICE], TlsVerifyStatus::Confirmed).await;

    match outcome {
        AuthenticationOutcome::Authenticated {
            webid,
            redirect_url,
        } => {
            assert_eq!(webid, ALICE);
            assert!(redirect_url.starts_with(
                "https://sp.example/cb?webid=https%3A%2F%2Falice.example%2Fcard%23me&ts="
            ));
            assert!(redirect_url.contains("&sig="));
            assert!(redirect_url.ends_with("&referer=https://idp.example"));
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert!(diags.is_empty());
}

#[tokio::test]
async fn test_failed_tls_verdict_rejects_regardless_of_keys() {
    // the document would match, but ownership was never proven
    let fetcher = StaticDocumentFetcher::new().with_document(ALICE, vec![matching_key()]);
    let (outcome, _) = authenticate(fetcher, &[ALICE], TlsVerifyStatus::Failed).await;
    assert_eq!(
        outcome,
        AuthenticationOutcome::Rejected {
            error: AuthError::CertNotOwned
        }
    );
}

#[tokio::test]
async fn test_certificate_without_uris_rejects() {
    let (outcome, _) = authenticate(
        StaticDocumentFetcher::new(),
        &[],
        TlsVerifyStatus::Confirmed,
    )
    .await;
    assert_eq!(
        outcome,
        AuthenticationOutcome::Rejected {
            error: AuthError::NoUriFound
        }
    );
}

#[tokio::test]
async fn test_candidate_limit_excludes_fourth_of_five() {
    let uris = [
        "https://one.example/#me",
        "https://two.example/#me",
        "https://three.example/#me",
        "https://four.example/#me",
        "https://five.example/#me",
    ];
    // only the 4th document matches; the limit of 3 never reaches it
    let fetcher = StaticDocumentFetcher::new()
        .with_document(uris[0], vec![wrong_key()])
        .with_document(uris[1], vec![wrong_key()])
        .with_document(uris[2], vec![wrong_key()])
        .with_document(uris[3], vec![matching_key()])
        .with_document(uris[4], vec![matching_key()]);
    let (outcome, _) = authenticate(fetcher, &uris, TlsVerifyStatus::Confirmed).await;
    assert_eq!(
        outcome,
        AuthenticationOutcome::Rejected {
            error: AuthError::NoVerifiedWebId
        }
    );
}

#[tokio::test]
async fn test_failed_first_fetch_still_matches_second() {
    // ALICE's profile server is down (unknown to the fetcher); the
    // backup identity matches
    let fetcher = StaticDocumentFetcher::new().with_document(BACKUP, vec![matching_key()]);
    let (outcome, diags) =
        authenticate(fetcher, &[ALICE, BACKUP], TlsVerifyStatus::Confirmed).await;

    match outcome {
        AuthenticationOutcome::Authenticated { webid, .. } => assert_eq!(webid, BACKUP),
        other => panic!("expected success via backup URI, got {other:?}"),
    }
    assert_eq!(diags.len(), 1);
    assert!(diags[0].contains(ALICE));
}

#[tokio::test]
async fn test_no_referrer_cannot_emit_redirect() {
    let fetcher = StaticDocumentFetcher::new().with_document(ALICE, vec![matching_key()]);
    let mut session =
        AuthenticationSession::new(Arc::new(fetcher), authority_key(), "idp.example");
    let outcome = session
        .authenticate(&AuthRequest {
            certificate_pem: client_cert_pem(&[ALICE]).into_bytes(),
            tls_verify: TlsVerifyStatus::Confirmed,
            referrer: None,
        })
        .await;
    match outcome {
        AuthenticationOutcome::Rejected {
            error: AuthError::Signing(_),
        } => {}
        other => panic!("expected signing rejection, got {other:?}"),
    }
}
