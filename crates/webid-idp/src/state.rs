use std::sync::Arc;

use webid_crypto::AuthoritySigningKey;
use webid_fetch::DocumentFetcher;

/// Shared, read-only service state. One instance for the process; each
/// request builds its own session on top of it.
pub struct AppState {
    /// Identity document fetcher (HTTP in production, swappable in
    /// tests).
    pub fetcher: Arc<dyn DocumentFetcher>,
    /// The authority's redirect-signing key, loaded once at startup.
    pub signing_key: Arc<AuthoritySigningKey>,
    /// Public hostname carried in the `referer=` redirect parameter.
    pub authority_host: String,
}
