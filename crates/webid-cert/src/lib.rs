//! Client certificate extraction.
//!
//! Parses the PEM certificate handed over by the TLS terminator into
//! the fields the authentication protocol needs: the ordered list of
//! `URI:` Subject-Alternative-Name entries (the claimed WebIDs) and
//! the RSA public key modulus/exponent. Everything happens in memory;
//! certificate material is never written anywhere.

pub mod extractor;

pub use extractor::{extract, ClientCertificate};
