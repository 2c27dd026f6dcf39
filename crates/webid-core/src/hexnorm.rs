//! Modulus normalization.
//!
//! Certificate moduli and document-declared moduli arrive in different
//! dressings: upper or lower case, whitespace-folded literals, and an
//! optional leading zero octet from the ASN.1 INTEGER sign bit. All
//! comparisons in the matcher happen on the normalized form.

/// Normalize a hex-encoded RSA modulus for comparison.
///
/// Lower-cases, strips all whitespace, and drops leading `00` octets so
/// the value matches what `openssl x509 -modulus` prints for the same
/// key.
pub fn normalize_modulus_hex(raw: &str) -> String {
    let mut hex: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    while hex.len() > 2 && hex.starts_with("00") {
        hex.drain(..2);
    }

    hex
}

/// Normalize a big-endian modulus byte string (as parsed from DER).
///
/// Skips the sign-padding zero octets before hex-encoding.
pub fn normalize_modulus_bytes(raw: &[u8]) -> String {
    let mut bytes = raw;
    while bytes.len() > 1 && bytes[0] == 0 {
        bytes = &bytes[1..];
    }
    hex::encode(bytes)
}
