/// WHATWG IPv4 address parser supporting decimal, octal, and hexadecimal
/// notation, including compressed and single-number forms.
use crate::error::HostError;

/// Candidate test used by the host dispatch: a special-scheme host is
/// handed to the IPv4 parser when every byte is a hex digit, dot, or x/X.
pub fn is_ipv4_candidate(input: &str) -> bool {
    !input.is_empty()
        && input
            .bytes()
            .all(|b| b.is_ascii_hexdigit() || matches!(b, b'.' | b'x' | b'X'))
}

/// Parse an IPv4 address string into a u32.
/// Supports:
/// - Decimal: 192.168.1.1
/// - Hex: 0xC0A80101
/// - Octal: 0300.0250.01.01
/// - Mixed and compressed: 192.0xA80001
pub fn parse_ipv4(input: &str) -> Result<u32, HostError> {
    if input.is_empty() {
        return Err(HostError::InvalidIpv4);
    }

    // A single trailing dot is allowed and ignored
    let input = input.strip_suffix('.').unwrap_or(input);

    // Each leading part contributes one octet; the final part spans
    // whatever remains of the four bytes
    let mut address: u64 = 0;
    let mut leading = 0u32;
    let mut parts = input.split('.').peekable();

    while let Some(part) = parts.next() {
        let value = parse_ipv4_number(part)?;

        if parts.peek().is_none() {
            let span = 4 - leading;
            if value >= 1u64 << (8 * span) {
                return Err(HostError::InvalidIpv4);
            }
            return Ok(((address << (8 * span)) | value) as u32);
        }

        if value > 0xFF || leading == 3 {
            return Err(HostError::InvalidIpv4);
        }
        address = (address << 8) | value;
        leading += 1;
    }

    // split() always yields at least one part
    Err(HostError::InvalidIpv4)
}

/// Parse a single IPv4 number component with radix inference:
/// "0x"/"0X" prefix with at least one digit is hex, a leading zero is
/// octal, anything else decimal.
fn parse_ipv4_number(input: &str) -> Result<u64, HostError> {
    if input.is_empty() {
        return Err(HostError::InvalidIpv4);
    }

    if input.len() >= 3
        && let Some(hex_part) = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
    {
        return u64::from_str_radix(hex_part, 16).map_err(|_| HostError::InvalidIpv4);
    }

    if input.len() >= 2 && input.starts_with('0') {
        return u64::from_str_radix(input, 8).map_err(|_| HostError::InvalidIpv4);
    }

    input.parse::<u64>().map_err(|_| HostError::InvalidIpv4)
}

/// Serialize an IPv4 address (u32) to dotted decimal notation
pub fn serialize_ipv4(ipv4: u32) -> String {
    format!(
        "{}.{}.{}.{}",
        (ipv4 >> 24) & 0xFF,
        (ipv4 >> 16) & 0xFF,
        (ipv4 >> 8) & 0xFF,
        ipv4 & 0xFF
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreadable_literal)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate() {
        assert!(is_ipv4_candidate("192.168.1.1"));
        assert!(is_ipv4_candidate("0xC0A80101"));
        assert!(is_ipv4_candidate("0300.0250.01.01"));
        assert!(is_ipv4_candidate("192.168.1.1."));
        assert!(is_ipv4_candidate("deadbeef"));

        assert!(!is_ipv4_candidate(""));
        assert!(!is_ipv4_candidate("example.com"));
        assert!(!is_ipv4_candidate("127.0.0.1:80"));
        assert!(!is_ipv4_candidate("192.168.1.g"));
    }

    #[test]
    fn test_parse_ipv4_decimal() {
        assert_eq!(parse_ipv4("192.168.1.1").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("127.0.0.1").unwrap(), 0x7F000001);
        assert_eq!(parse_ipv4("0.0.0.0").unwrap(), 0);
        assert_eq!(parse_ipv4("255.255.255.255").unwrap(), 0xFFFFFFFF);
    }

    #[test]
    fn test_parse_ipv4_hex() {
        assert_eq!(parse_ipv4("0xC0A80101").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("0xC0.0xA8.0x1.0x1").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("192.0x00A80001").unwrap(), 0xC0A80001);
    }

    #[test]
    fn test_parse_ipv4_octal() {
        assert_eq!(parse_ipv4("0300.0250.01.01").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("017700000001").unwrap(), 0x7F000001);
    }

    #[test]
    fn test_parse_ipv4_compressed() {
        // Fewer than four parts: the last one fills the remaining bytes
        assert_eq!(parse_ipv4("192.168.257").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("192.11010305").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("3232235777").unwrap(), 0xC0A80101);
        assert_eq!(parse_ipv4("4294967295").unwrap(), 0xFFFFFFFF);
    }

    #[test]
    fn test_parse_ipv4_trailing_dot() {
        assert_eq!(parse_ipv4("192.168.1.1.").unwrap(), 0xC0A80101);
        assert!(parse_ipv4("192.168.1.1..").is_err());
    }

    #[test]
    fn test_parse_ipv4_overflow() {
        assert!(parse_ipv4("4294967296").is_err());
        assert!(parse_ipv4("192.168.1.256").is_err());
        assert!(parse_ipv4("256.0.0.1").is_err());
        assert!(parse_ipv4("192.16777216").is_err());
        assert!(parse_ipv4("999999999999999999999").is_err());
    }

    #[test]
    fn test_parse_ipv4_malformed() {
        assert!(parse_ipv4("").is_err());
        assert!(parse_ipv4("1.2.3.4.5").is_err());
        assert!(parse_ipv4("1..3").is_err());
        // Bare "0x" selects the octal branch, where 'x' is rejected
        assert!(parse_ipv4("0x").is_err());
        // Octal part with non-octal digit
        assert!(parse_ipv4("08").is_err());
        assert!(parse_ipv4("abc").is_err());
    }

    #[test]
    fn test_serialize_ipv4() {
        assert_eq!(serialize_ipv4(0xC0A80101), "192.168.1.1");
        assert_eq!(serialize_ipv4(0x7F000001), "127.0.0.1");
        assert_eq!(serialize_ipv4(0), "0.0.0.0");
    }
}
