//! Shared helpers for the cross-crate integration tests.

use std::sync::{Arc, OnceLock};

use rcgen::string::Ia5String;
use rcgen::{CertificateParams, KeyPair, SanType};
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;

use webid_crypto::AuthoritySigningKey;

/// The browser keypair, generated once and shared across tests (RSA
/// keygen is the slow part; certificate issuance is cheap).
pub fn browser_key_pkcs8() -> &'static str {
    static PEM: OnceLock<String> = OnceLock::new();
    PEM.get_or_init(|| {
        let key = RsaPrivateKey::new(&mut rand::rng(), 2048).expect("keygen");
        key.to_pkcs8_pem(LineEnding::LF).expect("pkcs8").to_string()
    })
}

/// Self-signed client certificate carrying `uris` as SAN entries, in
/// order, signed with the shared browser key.
pub fn client_cert_pem(uris: &[&str]) -> String {
    let key_pair =
        KeyPair::from_pkcs8_pem_and_sign_algo(browser_key_pkcs8(), &rcgen::PKCS_RSA_SHA256)
            .expect("rcgen key");
    let mut params = CertificateParams::new(Vec::default()).expect("params");
    params.subject_alt_names = uris
        .iter()
        .map(|u| SanType::URI(Ia5String::try_from(u.to_string()).unwrap()))
        .collect();
    params.self_signed(&key_pair).expect("self sign").pem()
}

/// The authority signing key, generated once per test run.
pub fn authority_key() -> Arc<AuthoritySigningKey> {
    static KEY: OnceLock<Arc<AuthoritySigningKey>> = OnceLock::new();
    KEY.get_or_init(|| {
        let key = RsaPrivateKey::new(&mut rand::rng(), 2048).expect("keygen");
        Arc::new(AuthoritySigningKey::from_private_key(key))
    })
    .clone()
}
