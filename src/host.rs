use std::fmt;

use crate::domain::validate_domain;
use crate::error::HostError;
use crate::ipv4::{is_ipv4_candidate, parse_ipv4, serialize_ipv4};
use crate::ipv6::{parse_ipv6, serialize_ipv6};
use crate::percent::{C0_CONTROL, percent_decode_string, percent_encode_with_set};

/// A parsed URL host.
///
/// Special schemes carry a `Domain`, `Ipv4`, or `Ipv6` host; non-special
/// schemes an `Opaque` one. `Empty` is the empty host permitted for
/// `file:` and non-special schemes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    Domain(String),
    Ipv4(u32),
    Ipv6([u16; 8]),
    Opaque(String),
    Empty,
}

impl Host {
    /// Check if this is the empty host
    pub fn is_empty(&self) -> bool {
        *self == Self::Empty
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(domain) => f.write_str(domain),
            Self::Ipv4(address) => f.write_str(&serialize_ipv4(*address)),
            Self::Ipv6(groups) => write!(f, "[{}]", serialize_ipv6(groups)),
            Self::Opaque(host) => f.write_str(host),
            Self::Empty => Ok(()),
        }
    }
}

/// Code points that may never appear in an opaque host.
fn is_forbidden_host_code_point(c: char) -> bool {
    matches!(
        c,
        '\0' | '\t' | '\n' | '\r' | ' ' | '#' | '/' | ':' | '<' | '>' | '?' | '@' | '[' | '\\'
            | ']' | '^' | '|'
    )
}

/// Code points that may never appear in a domain: the opaque-host set
/// plus C0 controls, '%', and DEL.
fn is_forbidden_domain_code_point(c: char) -> bool {
    is_forbidden_host_code_point(c) || c <= '\u{1F}' || c == '%' || c == '\u{7F}'
}

/// Parse a host string taken from the authority section.
///
/// Dispatch per scheme specialness: bracketed input is an IPv6 literal;
/// special-scheme hosts that look like numbers go through the WHATWG
/// IPv4 parser, all other special hosts are percent-decoded and
/// validated as domains; non-special hosts stay opaque.
pub fn parse_host(input: &str, is_special: bool) -> Result<Host, HostError> {
    if input.is_empty() {
        return Ok(Host::Empty);
    }

    if input.starts_with('[') {
        if !input.ends_with(']') {
            return Err(HostError::Ipv6BracketMismatch);
        }
        let literal = &input[1..input.len() - 1];
        return parse_ipv6(literal).map(Host::Ipv6);
    }

    if is_special {
        if is_ipv4_candidate(input) {
            return parse_ipv4(input).map(Host::Ipv4);
        }

        let decoded = percent_decode_string(input);
        if let Some(c) = decoded.chars().find(|&c| is_forbidden_domain_code_point(c)) {
            return Err(HostError::ForbiddenHostCodePoint(c));
        }
        let domain = validate_domain(&decoded)?;
        if domain.is_empty() {
            return Err(HostError::InvalidDomain);
        }
        return Ok(Host::Domain(domain));
    }

    if let Some(c) = input.chars().find(|&c| is_forbidden_host_code_point(c)) {
        return Err(HostError::ForbiddenHostCodePoint(c));
    }
    Ok(Host::Opaque(percent_encode_with_set(input, C0_CONTROL)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_host() {
        assert_eq!(parse_host("", true).unwrap(), Host::Empty);
        assert_eq!(parse_host("", false).unwrap(), Host::Empty);
        assert_eq!(Host::Empty.to_string(), "");
    }

    #[test]
    fn test_domain_host() {
        assert_eq!(
            parse_host("example.com", true).unwrap(),
            Host::Domain("example.com".into())
        );
        assert_eq!(
            parse_host("EXAMPLE.com", true).unwrap(),
            Host::Domain("example.com".into())
        );
        // Percent-encoded domains are decoded before validation
        assert_eq!(
            parse_host("ex%61mple.com", true).unwrap(),
            Host::Domain("example.com".into())
        );
    }

    #[test]
    fn test_idna_domain() {
        let host = parse_host("日本.jp", true).unwrap();
        assert_eq!(host, Host::Domain("xn--wgv71a.jp".into()));
    }

    #[test]
    fn test_ipv4_host() {
        assert_eq!(
            parse_host("192.168.1.1", true).unwrap(),
            Host::Ipv4(0xC0A8_0101)
        );
        assert_eq!(
            parse_host("0xC0.0xA8.0x1.0x1", true).unwrap(),
            Host::Ipv4(0xC0A8_0101)
        );
        assert_eq!(Host::Ipv4(0xC0A8_0101).to_string(), "192.168.1.1");
        // Looks numeric but does not parse
        assert_eq!(
            parse_host("1.2.3.4.5", true),
            Err(HostError::InvalidIpv4)
        );
    }

    #[test]
    fn test_ipv4_only_for_special() {
        // Non-special schemes keep numeric hosts opaque
        assert_eq!(
            parse_host("192.168.1.1", false).unwrap(),
            Host::Opaque("192.168.1.1".into())
        );
    }

    #[test]
    fn test_ipv6_host() {
        let host = parse_host("[2001:db8::1]", true).unwrap();
        assert_eq!(host, Host::Ipv6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]));
        assert_eq!(host.to_string(), "[2001:db8::1]");
        // Allowed for non-special schemes too
        assert!(parse_host("[::1]", false).is_ok());
    }

    #[test]
    fn test_ipv6_bracket_mismatch() {
        assert_eq!(
            parse_host("[::1", true),
            Err(HostError::Ipv6BracketMismatch)
        );
        assert_eq!(
            parse_host("[not-ipv6]", true),
            Err(HostError::InvalidIpv6)
        );
    }

    #[test]
    fn test_opaque_host() {
        assert_eq!(
            parse_host("Example.Com", false).unwrap(),
            Host::Opaque("Example.Com".into())
        );
        // Percent escapes pass through untouched
        assert_eq!(
            parse_host("a%2Fb", false).unwrap(),
            Host::Opaque("a%2Fb".into())
        );
    }

    #[test]
    fn test_forbidden_code_points() {
        assert_eq!(
            parse_host("a^b", false),
            Err(HostError::ForbiddenHostCodePoint('^'))
        );
        assert_eq!(
            parse_host("a b", false),
            Err(HostError::ForbiddenHostCodePoint(' '))
        );
        // '%' is forbidden in domains once decoding leaves it literal
        assert_eq!(
            parse_host("ex%ample.com", true),
            Err(HostError::ForbiddenHostCodePoint('%'))
        );
        assert_eq!(
            parse_host("a<b", true),
            Err(HostError::ForbiddenHostCodePoint('<'))
        );
    }
}
