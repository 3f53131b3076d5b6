/// Errors that can occur during URL parsing.
///
/// The set is closed: callers discriminate on the variant, never on
/// message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Trimmed input was empty and no base URL was given
    EmptyInput,
    /// Scheme rejected; carries the offending text
    InvalidScheme(String),
    /// Special scheme not followed by "//"
    MissingSchemeSeparator,
    /// Host parser failed; carries the host sub-kind
    InvalidHost(HostError),
    /// Port exceeds 65535 or is non-numeric
    InvalidPort(String),
    /// Reserved; not raised by current rules
    InvalidPath(String),
    /// A %XX sequence was truncated or non-hex (form decoder)
    InvalidPercentEncoding { position: usize, found: u8 },
    /// Trailing '%' in the form decoder
    UnexpectedEndOfInput,
    /// Userinfo attached to an absent/empty host or a file: URL
    CannotHaveCredentials,
}

/// Host parser failure sub-kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostError {
    InvalidDomain,
    InvalidIpv4,
    InvalidIpv6,
    InvalidOpaque,
    EmptyHostNotAllowed,
    ForbiddenHostCodePoint(char),
    Ipv6BracketMismatch,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("Empty input without a base URL"),
            Self::InvalidScheme(text) => write!(f, "Invalid scheme: {text:?}"),
            Self::MissingSchemeSeparator => f.write_str("Missing \"//\" after special scheme"),
            Self::InvalidHost(kind) => write!(f, "Invalid host: {kind}"),
            Self::InvalidPort(text) => write!(f, "Invalid port: {text:?}"),
            Self::InvalidPath(text) => write!(f, "Invalid path: {text:?}"),
            Self::InvalidPercentEncoding { position, found } => write!(
                f,
                "Invalid percent encoding at byte {position} (found {:?})",
                *found as char
            ),
            Self::UnexpectedEndOfInput => f.write_str("Unexpected end of input"),
            Self::CannotHaveCredentials => {
                f.write_str("Credentials are not allowed for this URL")
            }
        }
    }
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDomain => f.write_str("invalid domain"),
            Self::InvalidIpv4 => f.write_str("invalid IPv4 address"),
            Self::InvalidIpv6 => f.write_str("invalid IPv6 address"),
            Self::InvalidOpaque => f.write_str("invalid opaque host"),
            Self::EmptyHostNotAllowed => f.write_str("empty host not allowed"),
            Self::ForbiddenHostCodePoint(c) => {
                write!(f, "forbidden host code point {c:?}")
            }
            Self::Ipv6BracketMismatch => f.write_str("unmatched bracket in IPv6 literal"),
        }
    }
}

impl std::error::Error for ParseError {}

impl std::error::Error for HostError {}

impl From<HostError> for ParseError {
    fn from(kind: HostError) -> Self {
        Self::InvalidHost(kind)
    }
}

/// Result type for URL parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
