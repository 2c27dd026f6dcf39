//! Declared-key extraction from identity documents.
//!
//! This is deliberately not an RDF parser. WebID profiles publish RSA
//! keys as `cert:modulus` / `cert:exponent` literals and the matcher
//! only compares moduli, so a narrow literal scanner that understands
//! the Turtle and RDF/XML spellings covers deployed profiles. Anything
//! richer plugs in behind `DocumentFetcher`.

use webid_core::KeyDescriptor;

const MODULUS_PROPERTY: &str = "cert:modulus";
const EXPONENT_PROPERTY: &str = "cert:exponent";

/// Shortest plausible modulus: 64 hex chars (256-bit). Anything
/// shorter is an attribute value or stray token, not a key.
const MIN_MODULUS_HEX: usize = 64;

/// One declared key as it accumulates during the scan. A modulus that
/// failed validation still opens an entry so its exponent stays paired
/// with it instead of shifting onto a later key.
#[derive(Default)]
struct KeyEntry {
    has_modulus: bool,
    modulus: Option<String>,
    exponent: Option<String>,
}

/// Extract every declared RSA public key from an identity document.
///
/// Properties are walked in document order and grouped per key entry:
/// each modulus opens a new key and an exponent attaches to the
/// nearest key still missing one, in either property order. A key
/// missing an exponent gets the conventional `10001`; a key whose
/// modulus is unusable is dropped together with its exponent.
pub fn parse_key_descriptors(document: &str) -> Vec<KeyDescriptor> {
    let mut entries: Vec<KeyEntry> = Vec::new();

    for (property, value) in property_stream(document) {
        match property {
            Property::Modulus => {
                let validated =
                    (is_hex(&value) && value.len() >= MIN_MODULUS_HEX).then_some(value);
                match entries.last_mut() {
                    Some(last) if !last.has_modulus => {
                        last.has_modulus = true;
                        last.modulus = validated;
                    }
                    _ => entries.push(KeyEntry {
                        has_modulus: true,
                        modulus: validated,
                        exponent: None,
                    }),
                }
            }
            Property::Exponent => {
                let normalized = normalize_exponent(&value);
                match entries.last_mut() {
                    Some(last) if last.exponent.is_none() => last.exponent = normalized,
                    _ => entries.push(KeyEntry {
                        exponent: normalized,
                        ..KeyEntry::default()
                    }),
                }
            }
        }
    }

    entries
        .into_iter()
        .filter_map(|entry| {
            let modulus = entry.modulus?;
            let exponent = entry.exponent.unwrap_or_else(|| "10001".into());
            Some(KeyDescriptor::new(&modulus, &exponent))
        })
        .collect()
}

#[derive(Clone, Copy)]
enum Property {
    Modulus,
    Exponent,
}

/// All `cert:modulus` / `cert:exponent` values in document order.
///
/// Tries the Turtle forms first (`cert:modulus "hex"`, with or without
/// a `^^` datatype, and bare tokens like `cert:exponent 65537`), then
/// the RDF/XML element form (`<cert:modulus ...>hex</cert:modulus>`).
fn property_stream(document: &str) -> Vec<(Property, String)> {
    let mut values = Vec::new();
    let mut rest = document;

    loop {
        let (pos, property, name) = match (
            rest.find(MODULUS_PROPERTY),
            rest.find(EXPONENT_PROPERTY),
        ) {
            (Some(m), Some(e)) if m < e => (m, Property::Modulus, MODULUS_PROPERTY),
            (Some(m), None) => (m, Property::Modulus, MODULUS_PROPERTY),
            (_, Some(e)) => (e, Property::Exponent, EXPONENT_PROPERTY),
            (None, None) => break,
        };

        let after = &rest[pos + name.len()..];
        if let Some((value, consumed)) = take_value(after) {
            // XML closing tags scan as an empty value; not a property
            if !value.is_empty() {
                values.push((property, value));
            }
            rest = &after[consumed..];
        } else {
            rest = after;
        }
    }

    values
}

/// Read one property value from the text following the property name.
/// Returns the value and how many bytes were consumed.
fn take_value(after: &str) -> Option<(String, usize)> {
    let trimmed = after.trim_start();
    let skipped = after.len() - trimmed.len();

    if let Some(body) = trimmed.strip_prefix('"') {
        // Turtle quoted literal
        let end = body.find('"')?;
        return Some((body[..end].to_string(), skipped + 1 + end + 1));
    }

    // Bare Turtle token (integer exponents): runs up to delimiter
    let bare: String = trimmed
        .chars()
        .take_while(|c| !c.is_whitespace() && !matches!(c, ';' | ',' | '.' | '<' | '>'))
        .collect();
    if !bare.is_empty() && bare.chars().all(|c| c.is_ascii_alphanumeric()) {
        let len = bare.len();
        return Some((bare, skipped + len));
    }

    // RDF/XML element content: skip attributes to '>', read up to '<'
    let close = trimmed.find('>')?;
    let content = &trimmed[close + 1..];
    let end = content.find('<')?;
    Some((
        content[..end].trim().to_string(),
        skipped + close + 1 + end,
    ))
}

fn is_hex(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    !compact.is_empty() && compact.chars().all(|c| c.is_ascii_hexdigit())
}

/// Exponents appear as decimal integers (`65537`) or hex literals.
/// Output is always hex.
fn normalize_exponent(value: &str) -> Option<String> {
    let cleaned = value.trim();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.chars().all(|c| c.is_ascii_digit()) {
        let decimal: u64 = cleaned.parse().ok()?;
        return Some(format!("{decimal:x}"));
    }
    if cleaned.chars().all(|c| c.is_ascii_hexdigit()) {
        return Some(cleaned.to_ascii_lowercase());
    }
    None
}
