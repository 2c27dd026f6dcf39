//! Authority-side cryptography: the redirect-signing RSA key and the
//! PKCS#1 v1.5 / SHA-256 signatures carried in the `sig=` parameter.

pub mod error;
pub mod signing;
pub mod signing_key;

pub use error::CryptoError;
pub use signing::{sign, verify, RedirectSignature};
pub use signing_key::AuthoritySigningKey;
