//! WHATWG URL parsing and serialization.
//!
//! Parses a URL string (optionally against a base URL) into a
//! structured [`Url`] value, normalizes it, and serializes it back to
//! canonical ASCII form. Also implements the
//! `application/x-www-form-urlencoded` codec used for query strings
//! and HTML form payloads.
//!
//! ```
//! use whurl::{Host, Url};
//!
//! let url = Url::parse("http://0xC0.0xA8.0x1.0x1/a/../b?q=1", None)?;
//! assert_eq!(url.host(), Some(&Host::Ipv4(0xC0A8_0101)));
//! assert_eq!(url.to_string(), "http://192.168.1.1/b?q=1");
//! # Ok::<(), whurl::ParseError>(())
//! ```

// Internal modules
mod domain;
mod error;
mod helpers;
mod host;
mod ipv4;
mod ipv6;
mod parser;
mod percent;
mod scheme;
mod url;

pub mod form_urlencoded;

// Public API
pub use error::{HostError, ParseError};
pub use form_urlencoded::SearchParams;
pub use host::Host;
pub use url::{Path, Url};

pub type Result<T> = std::result::Result<T, ParseError>;
