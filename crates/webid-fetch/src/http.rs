use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Identity};

use webid_core::KeyDescriptor;

use crate::error::FetchError;
use crate::fetcher::DocumentFetcher;
use crate::keys::parse_key_descriptors;

/// Header naming the subject a delegated ("secretary") fetch is made
/// for.
const ON_BEHALF_HEADER: &str = "Acting-On-Behalf-Of";

/// Largest identity document read into memory. Profiles are a few KB;
/// anything near this limit is not a profile.
pub const MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

/// HTTP fetcher configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout. A hung profile server must not stall the
    /// session beyond this.
    pub timeout: Duration,
    /// PEM bundle (certificate + key) presented as the authority's own
    /// TLS client identity when fetching third-party profiles.
    pub secretary_identity_pem: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            secretary_identity_pem: None,
        }
    }
}

/// Fetches identity documents over HTTP(S) with a bounded timeout.
pub struct HttpDocumentFetcher {
    client: Client,
}

impl HttpDocumentFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("webid-idp/", env!("CARGO_PKG_VERSION")));

        if let Some(path) = &config.secretary_identity_pem {
            let pem = std::fs::read(path)
                .map_err(|e| FetchError::Identity(format!("{}: {e}", path.display())))?;
            let identity =
                Identity::from_pem(&pem).map_err(|e| FetchError::Identity(e.to_string()))?;
            builder = builder.identity(identity);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Setup(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch_keys(
        &self,
        uri: &str,
        acting_on_behalf_of: Option<&str>,
    ) -> Result<Vec<KeyDescriptor>, FetchError> {
        let mut request = self
            .client
            .get(uri)
            .header(ACCEPT, "text/turtle, application/rdf+xml;q=0.8");
        if let Some(subject) = acting_on_behalf_of {
            request = request.header(ON_BEHALF_HEADER, subject);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        if let Some(length) = response.content_length() {
            if length > MAX_DOCUMENT_BYTES as u64 {
                return Err(FetchError::TooLarge(MAX_DOCUMENT_BYTES));
            }
        }

        // Read incrementally; a chunked response can exceed any
        // advertised length.
        let mut body = Vec::new();
        let mut response = response;
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e.to_string())
            }
        })? {
            if body.len() + chunk.len() > MAX_DOCUMENT_BYTES {
                return Err(FetchError::TooLarge(MAX_DOCUMENT_BYTES));
            }
            body.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&body);

        let keys = parse_key_descriptors(&body);
        tracing::debug!(uri, keys = keys.len(), "fetched identity document");
        Ok(keys)
    }
}
