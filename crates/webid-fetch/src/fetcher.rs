use std::collections::HashMap;

use async_trait::async_trait;

use webid_core::KeyDescriptor;

use crate::error::FetchError;

/// Trait for retrieving the RSA keys an identity document declares.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the identity document at `uri` and return its declared
    /// keys. `acting_on_behalf_of` identifies the subject the authority
    /// is doing this retrieval for, so the profile server can apply its
    /// own access control.
    async fn fetch_keys(
        &self,
        uri: &str,
        acting_on_behalf_of: Option<&str>,
    ) -> Result<Vec<KeyDescriptor>, FetchError>;
}

/// In-memory fetcher backed by a URI → keys map.
///
/// Used by tests and by embedding callers that already hold the
/// documents; unknown URIs behave like a dead profile server.
#[derive(Debug, Default)]
pub struct StaticDocumentFetcher {
    documents: HashMap<String, Vec<KeyDescriptor>>,
}

impl StaticDocumentFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the declared keys for a URI.
    pub fn with_document(mut self, uri: &str, keys: Vec<KeyDescriptor>) -> Self {
        self.documents.insert(uri.to_string(), keys);
        self
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}

#[async_trait]
impl DocumentFetcher for StaticDocumentFetcher {
    async fn fetch_keys(
        &self,
        uri: &str,
        _acting_on_behalf_of: Option<&str>,
    ) -> Result<Vec<KeyDescriptor>, FetchError> {
        self.documents
            .get(uri)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(uri.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_uri_returns_keys() {
        let fetcher = StaticDocumentFetcher::new().with_document(
            "https://alice.example/card#me",
            vec![KeyDescriptor::new("cafebabe", "10001")],
        );
        let keys = fetcher
            .fetch_keys("https://alice.example/card#me", None)
            .await
            .unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].modulus_hex, "cafebabe");
    }

    #[tokio::test]
    async fn test_unknown_uri_fails() {
        let fetcher = StaticDocumentFetcher::new();
        let result = fetcher.fetch_keys("https://nobody.example/", None).await;
        assert!(matches!(result, Err(FetchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_document_is_zero_keys() {
        let fetcher =
            StaticDocumentFetcher::new().with_document("https://bob.example/card#me", vec![]);
        let keys = fetcher
            .fetch_keys("https://bob.example/card#me", None)
            .await
            .unwrap();
        assert!(keys.is_empty());
    }
}
