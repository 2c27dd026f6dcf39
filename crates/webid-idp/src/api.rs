//! HTTP surface of the identity provider.
//!
//! `/auth` is the delegated-authentication endpoint the relying
//! service redirects visitors to; the TLS terminator in front of this
//! process forwards the client certificate and its verification
//! verdict as headers.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use webid_auth::{rejection_location, AuthRequest, AuthenticationSession};
use webid_core::{AuthenticationOutcome, TlsVerifyStatus};

use crate::state::AppState;

/// PEM client certificate forwarded by the terminator
/// (`$ssl_client_escaped_cert` in nginx terms).
const CERT_HEADER: &str = "x-ssl-client-cert";
/// The terminator's ownership verdict (`SSL_CLIENT_VERIFY`).
const VERIFY_HEADER: &str = "x-ssl-client-verify";

#[derive(Deserialize)]
pub struct AuthParams {
    /// The relying service's callback URL.
    pub authreqissuer: Option<String>,
    /// Legacy alias for `authreqissuer`.
    pub referrer: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth", get(handle_auth).post(handle_auth))
        .route("/health", get(handle_health))
        .with_state(state)
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_auth(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthParams>,
    headers: HeaderMap,
) -> Response {
    let referrer = params
        .authreqissuer
        .or(params.referrer)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    // Never redirect a visitor to something that does not parse as a URL.
    if let Some(r) = &referrer {
        if Url::parse(r).is_err() {
            return (StatusCode::BAD_REQUEST, "invalid authreqissuer URL").into_response();
        }
    }

    let certificate_pem = client_certificate_pem(&headers);
    let tls_verify = headers
        .get(VERIFY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(TlsVerifyStatus::from_verdict)
        .unwrap_or(TlsVerifyStatus::Absent);

    let mut session = AuthenticationSession::new(
        Arc::clone(&state.fetcher),
        Arc::clone(&state.signing_key),
        state.authority_host.clone(),
    );
    let request = AuthRequest {
        certificate_pem,
        tls_verify,
        referrer: referrer.clone(),
    };

    match session.authenticate(&request).await {
        AuthenticationOutcome::Authenticated {
            webid,
            redirect_url,
        } => {
            tracing::info!(
                identity = %webid,
                issuer = referrer.as_deref().unwrap_or("-"),
                "authenticated"
            );
            found_redirect(&redirect_url)
        }
        AuthenticationOutcome::Rejected { error } => {
            tracing::warn!(
                code = error.code(),
                issuer = referrer.as_deref().unwrap_or("-"),
                diagnostics = ?session.diagnostics(),
                "authentication failed: {error}"
            );
            match &referrer {
                Some(_) => found_redirect(&rejection_location(&error, referrer.as_deref())),
                None => {
                    (StatusCode::FORBIDDEN, rejection_location(&error, None)).into_response()
                }
            }
        }
    }
}

fn found_redirect(location: &str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

/// Recover the PEM certificate from the forwarded header. Terminators
/// percent-escape it or fold newlines into tabs; both are undone here.
fn client_certificate_pem(headers: &HeaderMap) -> Vec<u8> {
    let Some(raw) = headers.get(CERT_HEADER).and_then(|v| v.to_str().ok()) else {
        return Vec::new();
    };
    let decoded = if raw.contains('%') {
        urlencoding::decode(raw)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| raw.to_string())
    } else {
        raw.to_string()
    };
    decoded.replace('\t', "\n").into_bytes()
}
