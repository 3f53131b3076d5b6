//! The `application/x-www-form-urlencoded` codec.
//!
//! Serializes and parses ordered (name, value) pair lists, and backs
//! the query-string handling of [`Url`](crate::Url). Output uses the
//! form-component rule: ASCII alphanumerics and `* - . _` pass
//! literally, space becomes `+`, everything else is `%XX` (uppercase
//! hex) over the UTF-8 bytes.

use std::fmt::{self, Write};

use crate::error::{ParseError, Result};

/// Serialize an ordered sequence of (name, value) pairs.
///
/// # Examples
///
/// ```
/// let encoded = whurl::form_urlencoded::serialize([
///     ("name", "John Doe"),
///     ("email", "john@example.com"),
/// ]);
/// assert_eq!(encoded, "name=John+Doe&email=john%40example.com");
/// ```
pub fn serialize<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (i, (name, value)) in pairs.into_iter().enumerate() {
        if i > 0 {
            out.push('&');
        }
        encode_component_into(&mut out, name);
        out.push('=');
        encode_component_into(&mut out, value);
    }
    out
}

/// Parse a form-urlencoded string into (name, value) pairs.
///
/// Empty runs between '&' separators are discarded; a run without '='
/// yields an empty value. Pairs whose percent sequences are malformed
/// are dropped; use [`decode`] to surface those as errors. Input
/// ordering is preserved.
pub fn parse(input: &str) -> Vec<(String, String)> {
    input
        .split('&')
        .filter(|run| !run.is_empty())
        .filter_map(|run| {
            let (name, value) = run.split_once('=').unwrap_or((run, ""));
            Some((decode(name, true).ok()?, decode(value, true).ok()?))
        })
        .collect()
}

/// Strictly percent-decode a form component, optionally mapping '+' to
/// space.
///
/// # Errors
///
/// A '%' without two following characters is
/// [`ParseError::UnexpectedEndOfInput`]; a non-hex digit after '%' is
/// [`ParseError::InvalidPercentEncoding`] with its byte position.
pub fn decode(input: &str, plus_as_space: bool) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if i + 2 >= bytes.len() {
                    return Err(ParseError::UnexpectedEndOfInput);
                }
                let hi = hex_digit(bytes[i + 1]).ok_or(ParseError::InvalidPercentEncoding {
                    position: i + 1,
                    found: bytes[i + 1],
                })?;
                let lo = hex_digit(bytes[i + 2]).ok_or(ParseError::InvalidPercentEncoding {
                    position: i + 2,
                    found: bytes[i + 2],
                })?;
                out.push((hi << 4) | lo);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn encode_component_into(out: &mut String, input: &str) {
    for byte in input.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
}

/// An ordered multimap over form-urlencoded pairs.
///
/// Thin convenience wrapper around [`serialize`] and [`parse`] for
/// query-string manipulation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parse from a query string, with or without the leading '?'
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: parse(query),
        }
    }

    pub fn append(&mut self, name: &str, value: &str) {
        self.pairs.push((name.to_string(), value.to_string()));
    }

    /// Delete pairs with the given name; with a value, only pairs
    /// matching both.
    pub fn delete(&mut self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => self.pairs.retain(|(n, v)| n != name || v != value),
            None => self.pairs.retain(|(n, _)| n != name),
        }
    }

    /// Get the first value for a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get all values for a name.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Check if a name exists; with a value, check for the exact pair.
    pub fn has(&self, name: &str, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.pairs.iter().any(|(n, v)| n == name && v == value),
            None => self.pairs.iter().any(|(n, _)| n == name),
        }
    }

    /// Set a name to a single value, replacing all existing values.
    pub fn set(&mut self, name: &str, value: &str) {
        let mut found_first = false;
        self.pairs.retain_mut(|(n, v)| {
            if n != name {
                return true;
            }
            if found_first {
                return false;
            }
            found_first = true;
            *v = value.to_string();
            true
        });
        if !found_first {
            self.pairs.push((name.to_string(), value.to_string()));
        }
    }

    /// Stable sort by name; pairs with equal names keep their order.
    pub fn sort(&mut self) {
        self.pairs.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(n, _)| n.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self.iter()))
    }
}

impl From<&str> for SearchParams {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}
