use std::sync::Arc;

use chrono::Utc;

use webid_core::{AuthError, AuthenticationOutcome, TlsVerifyStatus};
use webid_crypto::AuthoritySigningKey;
use webid_fetch::DocumentFetcher;

use crate::matcher::find_matching_identity;
use crate::redirect::{auth_timestamp, build_signed_redirect};

/// Inputs of one authentication request, as handed over by the TLS
/// terminator and the HTTP layer. Everything is explicit; the session
/// reads no ambient state.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// PEM client certificate, possibly empty when the browser sent
    /// none.
    pub certificate_pem: Vec<u8>,
    /// The terminator's key-ownership verdict.
    pub tls_verify: TlsVerifyStatus,
    /// The relying service's callback URL (`authreqissuer`), when one
    /// was supplied. Without it a successful match still has nowhere to
    /// redirect to, which surfaces as a signing-stage rejection.
    pub referrer: Option<String>,
}

/// One authentication session: certificate extraction, candidate
/// matching, redirect signing. Produces exactly one terminal outcome
/// and accumulates non-fatal diagnostics along the way.
pub struct AuthenticationSession {
    fetcher: Arc<dyn DocumentFetcher>,
    signing_key: Arc<AuthoritySigningKey>,
    authority_host: String,
    diagnostics: Vec<String>,
    outcome: Option<AuthenticationOutcome>,
}

impl AuthenticationSession {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        signing_key: Arc<AuthoritySigningKey>,
        authority_host: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            signing_key,
            authority_host: authority_host.into(),
            diagnostics: Vec::new(),
            outcome: None,
        }
    }

    /// Run the full authentication flow. The outcome is also retained
    /// on the session for later inspection via [`outcome`].
    ///
    /// [`outcome`]: AuthenticationSession::outcome
    pub async fn authenticate(&mut self, request: &AuthRequest) -> AuthenticationOutcome {
        let outcome = match self.try_authenticate(request).await {
            Ok((webid, redirect_url)) => AuthenticationOutcome::Authenticated {
                webid,
                redirect_url,
            },
            Err(error) => {
                tracing::info!(code = error.code(), "authentication rejected: {error}");
                AuthenticationOutcome::Rejected { error }
            }
        };
        self.outcome = Some(outcome.clone());
        outcome
    }

    async fn try_authenticate(&mut self, request: &AuthRequest) -> Result<(String, String), AuthError> {
        let cert = webid_cert::extract(&request.certificate_pem, request.tls_verify)?;

        let webid =
            find_matching_identity(&cert, self.fetcher.as_ref(), &mut self.diagnostics).await?;

        let referrer = request
            .referrer
            .as_deref()
            .ok_or_else(|| AuthError::Signing("no referrer to return the visitor to".into()))?;

        let timestamp = auth_timestamp(Utc::now());
        let redirect_url = build_signed_redirect(
            &webid,
            referrer,
            &timestamp,
            &self.signing_key,
            &self.authority_host,
        )?;

        Ok((webid, redirect_url))
    }

    /// Terminal outcome, once [`authenticate`] has run.
    ///
    /// [`authenticate`]: AuthenticationSession::authenticate
    pub fn outcome(&self) -> Option<&AuthenticationOutcome> {
        self.outcome.as_ref()
    }

    /// Non-fatal notices accumulated during matching (per-candidate
    /// fetch failures and the like).
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// The verified identity, when the session authenticated.
    pub fn identity(&self) -> Option<&str> {
        self.outcome.as_ref().and_then(|o| o.identity())
    }
}

/// Where to send a rejected visitor: back to the relying service with
/// an `error=` code when a referrer is known, otherwise a textual
/// message.
pub fn rejection_location(error: &AuthError, referrer: Option<&str>) -> String {
    match referrer {
        Some(referrer) => format!("{referrer}?error={}", error.code()),
        None => format!("WebID authentication error: {}", error.code()),
    }
}
