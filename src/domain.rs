use crate::error::HostError;

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if a domain contains a Punycode label (xn-- prefix)
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if bytes.len() < 4 {
        return false;
    }

    if is_punycode_prefix(bytes) {
        return true;
    }

    memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// Validate a domain and map it to its ASCII form.
///
/// The IDNA pipeline (Unicode normalization, punycode, UTS46) lives in
/// the `idna` crate; this wrapper only short-circuits the common
/// all-ASCII case.
pub fn validate_domain(domain: &str) -> Result<String, HostError> {
    if domain.is_ascii() && !has_punycode(domain) {
        // Already lowercase: pass through without allocation games
        if domain
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-'))
        {
            return Ok(domain.to_string());
        }
        // ASCII letters only need lowercasing
        if domain
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-'))
        {
            return Ok(domain.to_ascii_lowercase());
        }
    }

    idna::domain_to_ascii(domain).map_err(|_| HostError::InvalidDomain)
}
