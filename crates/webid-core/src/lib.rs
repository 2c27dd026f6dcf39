//! Shared types and error model for the WebID delegated-authentication
//! identity provider.

pub mod error;
pub mod hexnorm;
pub mod types;

pub use error::AuthError;
pub use hexnorm::normalize_modulus_hex;
pub use types::{AuthenticationOutcome, KeyDescriptor, TlsVerifyStatus};
