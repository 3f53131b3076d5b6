use super::State;
use crate::error::{HostError, ParseError, Result};
use crate::helpers::is_windows_drive_letter;
use crate::host::{Host, parse_host};
use crate::percent::{
    FRAGMENT, OPAQUE_PATH, PATH, QUERY, SPECIAL_QUERY, USERINFO, percent_decode_bytes,
    percent_encode_with_set,
};
use crate::scheme::{SchemeType, get_scheme_type, is_scheme_byte};
use crate::url::{Path, Url};

/// Run the basic URL parser over pre-trimmed, non-empty input.
///
/// The machine consumes bytes left to right; where a state's exit
/// delimiters are fixed, a batch scan replaces the per-code-point
/// loop. The base URL is never mutated: inheriting states copy the
/// components they need.
pub(crate) fn run(input: &str, base: Option<&Url>) -> Result<Url> {
    let bytes = input.as_bytes();
    let mut pointer = 0usize;
    let mut state = State::SchemeStart;

    let mut scheme = String::new();
    let mut scheme_type = SchemeType::NotSpecial;
    let mut username = String::new();
    let mut password = String::new();
    let mut host: Option<Host> = None;
    let mut port: Option<u16> = None;
    let mut segments: Vec<String> = Vec::new();
    let mut opaque_path: Option<String> = None;
    let mut query: Option<String> = None;
    let mut fragment: Option<String> = None;

    'machine: loop {
        match state {
            State::SchemeStart => {
                if pointer < bytes.len() && bytes[pointer].is_ascii_alphabetic() {
                    state = State::Scheme;
                } else if base.is_some() {
                    state = State::NoScheme;
                } else {
                    return Err(invalid_scheme(input));
                }
            }

            State::Scheme => {
                let start = pointer;
                let mut end = pointer;
                while end < bytes.len() && is_scheme_byte(bytes[end]) {
                    end += 1;
                }

                if end < bytes.len() && bytes[end] == b':' {
                    scheme = input[start..end].to_ascii_lowercase();
                    scheme_type = get_scheme_type(&scheme);
                    pointer = end + 1;

                    if scheme_type.is_special() {
                        state = State::SpecialAuthoritySlashes;
                    } else if bytes.get(pointer) == Some(&b'/') {
                        pointer += 1;
                        state = State::PathOrAuthority;
                    } else {
                        state = State::OpaquePath;
                    }
                } else if base.is_some() {
                    // Not a scheme after all: rewind and resolve as a
                    // relative reference
                    scheme.clear();
                    pointer = 0;
                    state = State::NoScheme;
                } else {
                    return Err(invalid_scheme(input));
                }
            }

            State::NoScheme => {
                let Some(base_url) = base else {
                    return Err(invalid_scheme(input));
                };

                let c = bytes.get(pointer).copied();

                // An opaque-path base can only absorb fragment updates
                if base_url.path().is_opaque() && c.is_some() && c != Some(b'#') {
                    return Err(invalid_scheme(input));
                }

                scheme = base_url.scheme().to_string();
                scheme_type = get_scheme_type(&scheme);

                match c {
                    None => return Ok(base_url.clone()),
                    Some(b'/') => {
                        if bytes.get(pointer + 1) == Some(&b'/') {
                            // Protocol-relative reference: the authority
                            // is re-parsed, nothing is inherited
                            pointer += 2;
                            state = State::Authority;
                        } else {
                            host = base_url.host().cloned();
                            port = base_url.port();
                            state = State::PathStart;
                        }
                    }
                    Some(b'?') => {
                        host = base_url.host().cloned();
                        port = base_url.port();
                        inherit_path(base_url, &mut segments, &mut opaque_path);
                        pointer += 1;
                        state = State::Query;
                    }
                    Some(b'#') => {
                        host = base_url.host().cloned();
                        port = base_url.port();
                        inherit_path(base_url, &mut segments, &mut opaque_path);
                        query = base_url.query().map(str::to_string);
                        pointer += 1;
                        state = State::Fragment;
                    }
                    Some(_) => {
                        host = base_url.host().cloned();
                        port = base_url.port();
                        inherit_path(base_url, &mut segments, &mut opaque_path);
                        state = State::RelativePath;
                    }
                }
            }

            State::SpecialAuthoritySlashes => {
                if pointer + 1 < bytes.len()
                    && bytes[pointer] == b'/'
                    && bytes[pointer + 1] == b'/'
                {
                    pointer += 2;
                    state = State::Authority;
                } else {
                    return Err(ParseError::MissingSchemeSeparator);
                }
            }

            State::PathOrAuthority => {
                if bytes.get(pointer) == Some(&b'/') {
                    pointer += 1;
                    state = State::Authority;
                } else {
                    state = State::Path;
                }
            }

            State::Authority => {
                let auth_start = pointer;
                let auth_end = auth_start
                    + memchr::memchr3(b'/', b'?', b'#', &bytes[auth_start..])
                        .unwrap_or(bytes.len() - auth_start);

                // Credentials end at the last '@'; earlier at-signs are
                // literal and get encoded into the username
                if let Some(at) = memchr::memrchr(b'@', &bytes[auth_start..auth_end]) {
                    let credentials = &input[auth_start..auth_start + at];
                    if !credentials.is_empty() && credentials != ":" {
                        match credentials.split_once(':') {
                            Some((user, pass)) => {
                                username = percent_encode_with_set(user, USERINFO);
                                password = percent_encode_with_set(pass, USERINFO);
                            }
                            None => {
                                username = percent_encode_with_set(credentials, USERINFO);
                            }
                        }
                    }
                    pointer = auth_start + at + 1;
                }

                state = State::Host;
            }

            State::Host => {
                let host_start = pointer;
                let mut end = pointer;
                let mut inside_brackets = false;

                while end < bytes.len() {
                    match bytes[end] {
                        b'[' => inside_brackets = true,
                        b']' => inside_brackets = false,
                        b':' if !inside_brackets => break,
                        b'/' | b'?' | b'#' => break,
                        _ => {}
                    }
                    end += 1;
                }

                let parsed = parse_host(&input[host_start..end], scheme_type.is_special())?;

                let has_credentials = !username.is_empty() || !password.is_empty();
                if has_credentials && (parsed.is_empty() || scheme_type == SchemeType::File) {
                    return Err(ParseError::CannotHaveCredentials);
                }
                if parsed.is_empty()
                    && scheme_type.is_special()
                    && scheme_type != SchemeType::File
                {
                    return Err(HostError::EmptyHostNotAllowed.into());
                }

                host = Some(parsed);
                pointer = end;

                if bytes.get(pointer) == Some(&b':') {
                    pointer += 1;
                    state = State::Port;
                } else {
                    state = State::PathStart;
                }
            }

            State::Port => {
                let start = pointer;
                let mut end = pointer;
                while end < bytes.len() && !matches!(bytes[end], b'/' | b'?' | b'#') {
                    end += 1;
                }

                let text = &input[start..end];
                if !text.is_empty() {
                    if !text.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(ParseError::InvalidPort(text.to_string()));
                    }
                    let value: u16 = text
                        .parse()
                        .map_err(|_| ParseError::InvalidPort(text.to_string()))?;
                    if scheme_type.default_port() != Some(value) {
                        port = Some(value);
                    }
                }

                // An empty host cannot carry a port
                if port.is_some() && host.as_ref().is_some_and(Host::is_empty) {
                    return Err(HostError::EmptyHostNotAllowed.into());
                }

                pointer = end;
                state = State::PathStart;
            }

            State::PathStart => match bytes.get(pointer).copied() {
                None => break 'machine,
                Some(b'/') => {
                    pointer += 1;
                    state = State::Path;
                }
                Some(b'?') => {
                    pointer += 1;
                    state = State::Query;
                }
                Some(b'#') => {
                    pointer += 1;
                    state = State::Fragment;
                }
                Some(_) => state = State::Path,
            },

            State::RelativePath => {
                // The reference replaces the last segment of the base path
                shorten_path(&mut segments, scheme_type);
                state = State::Path;
            }

            State::Path => loop {
                let start = pointer;
                let mut end = pointer;
                while end < bytes.len() && !matches!(bytes[end], b'/' | b'?' | b'#') {
                    end += 1;
                }

                let segment = &input[start..end];
                // Dot segments are recognized on the decoded bytes so
                // %2E spellings normalize too
                let decoded = percent_decode_bytes(segment);
                if decoded.as_ref() == b".." {
                    shorten_path(&mut segments, scheme_type);
                } else if decoded.as_ref() != b"." {
                    segments.push(percent_encode_with_set(segment, PATH));
                }

                pointer = end;
                match bytes.get(pointer).copied() {
                    None => break 'machine,
                    Some(b'/') => pointer += 1,
                    Some(b'?') => {
                        pointer += 1;
                        state = State::Query;
                        continue 'machine;
                    }
                    _ => {
                        pointer += 1;
                        state = State::Fragment;
                        continue 'machine;
                    }
                }
            },

            State::OpaquePath => {
                let start = pointer;
                let mut end = pointer;
                while end < bytes.len() && !matches!(bytes[end], b'?' | b'#') {
                    end += 1;
                }

                opaque_path = Some(percent_encode_with_set(&input[start..end], OPAQUE_PATH));

                pointer = end;
                match bytes.get(pointer).copied() {
                    None => break 'machine,
                    Some(b'?') => {
                        pointer += 1;
                        state = State::Query;
                    }
                    _ => {
                        pointer += 1;
                        state = State::Fragment;
                    }
                }
            }

            State::Query => {
                let start = pointer;
                let end = start
                    + memchr::memchr(b'#', &bytes[start..]).unwrap_or(bytes.len() - start);

                let encode_set = if scheme_type.is_special() {
                    SPECIAL_QUERY
                } else {
                    QUERY
                };
                query = Some(percent_encode_with_set(&input[start..end], encode_set));

                pointer = end;
                if pointer < bytes.len() {
                    pointer += 1;
                    state = State::Fragment;
                } else {
                    break 'machine;
                }
            }

            State::Fragment => {
                fragment = Some(percent_encode_with_set(&input[pointer..], FRAGMENT));
                break 'machine;
            }
        }
    }

    let path = match opaque_path {
        Some(path) => Path::Opaque(path),
        None => Path::List(segments),
    };

    Ok(Url {
        scheme,
        username,
        password,
        host,
        port,
        path,
        query,
        fragment,
    })
}

/// Copy the base URL's path into the working state.
fn inherit_path(base: &Url, segments: &mut Vec<String>, opaque_path: &mut Option<String>) {
    match base.path() {
        Path::List(list) => *segments = list.clone(),
        Path::Opaque(path) => *opaque_path = Some(path.clone()),
    }
}

/// Drop the last path segment. A sole Windows drive letter in a file:
/// URL is kept so ".." cannot climb above the drive root.
fn shorten_path(segments: &mut Vec<String>, scheme_type: SchemeType) {
    if scheme_type == SchemeType::File
        && segments.len() == 1
        && is_windows_drive_letter(&segments[0])
    {
        return;
    }
    segments.pop();
}

fn invalid_scheme(input: &str) -> ParseError {
    // Carry the scheme-shaped prefix for diagnostics
    let end = input.find([':', '/', '?', '#']).unwrap_or(input.len());
    ParseError::InvalidScheme(input[..end].to_string())
}
