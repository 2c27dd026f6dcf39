//! Identity document retrieval.
//!
//! The matcher only ever sees a `Vec<KeyDescriptor>` per candidate
//! URI; how the document is fetched and which serialization it uses
//! stays behind the [`DocumentFetcher`] trait. The shipped
//! implementations are an HTTP fetcher (reqwest, bounded timeout,
//! optional secretary client identity) and an in-memory fetcher for
//! tests and embedding callers.

pub mod error;
pub mod fetcher;
pub mod http;
pub mod keys;

pub use error::FetchError;
pub use fetcher::{DocumentFetcher, StaticDocumentFetcher};
pub use http::{FetchConfig, HttpDocumentFetcher, MAX_DOCUMENT_BYTES};
pub use keys::parse_key_descriptors;
