use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

// Encode sets following the WHATWG URL spec
// https://url.spec.whatwg.org/#percent-encoded-bytes

/// C0 control percent-encode set: bytes <= 0x1F and bytes > 0x7E
pub const C0_CONTROL: &AsciiSet = CONTROLS;

/// Fragment percent-encode set: C0 control + space, ", <, >, \`
pub const FRAGMENT: &AsciiSet = &C0_CONTROL
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Query percent-encode set: C0 control + space, ", #, <, >
pub const QUERY: &AsciiSet = &C0_CONTROL
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// Special-query percent-encode set: query + '
/// Used for queries of the six special schemes.
pub const SPECIAL_QUERY: &AsciiSet = &QUERY.add(b'\'');

/// Path percent-encode set: query + ?, \`, {, }
pub const PATH: &AsciiSet = &QUERY.add(b'?').add(b'`').add(b'{').add(b'}');

/// Opaque-path percent-encode set: C0 control + space.
/// Keeps printable ASCII literal while the serialized output stays
/// in 0x21..=0x7E.
pub const OPAQUE_PATH: &AsciiSet = &C0_CONTROL.add(b' ');

/// Userinfo percent-encode set: path + /, :, ;, =, @, [, \, ], ^, |
pub const USERINFO: &AsciiSet = &PATH
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Percent-encode a string using the provided encode set.
/// Escapes are emitted with uppercase hex digits.
pub fn percent_encode_with_set(input: &str, encode_set: &'static AsciiSet) -> String {
    utf8_percent_encode(input, encode_set).to_string()
}

/// Percent-decode into raw bytes. Invalid %XX sequences (truncated or
/// non-hex) are left literal; hex digits are accepted in either case.
pub fn percent_decode_bytes(input: &str) -> Cow<'_, [u8]> {
    percent_encoding::percent_decode_str(input).into()
}

/// Percent-decode a string, interpreting the decoded bytes as UTF-8.
/// Runs of escapes that do not decode to valid UTF-8 are preserved as
/// their original %XX text; invalid escapes are copied through.
pub fn percent_decode_string(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            // Gather a maximal run of escapes so multi-byte sequences
            // decode as a unit.
            let run_start = i;
            let mut decoded = Vec::new();
            while i + 2 < bytes.len()
                && bytes[i] == b'%'
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit()
            {
                decoded.push(hex_pair(bytes[i + 1], bytes[i + 2]));
                i += 3;
            }
            push_decoded_run(&mut out, &decoded, &input[run_start..i]);
        } else {
            // Copy one (possibly multi-byte) character through
            let rest = &input[i..];
            if let Some(c) = rest.chars().next() {
                out.push(c);
                i += c.len_utf8();
            } else {
                break;
            }
        }
    }

    out
}

/// Append a decoded escape run, falling back to the original escape
/// text wherever the bytes are not valid UTF-8.
fn push_decoded_run(out: &mut String, decoded: &[u8], escaped: &str) {
    let mut pos = 0;
    while pos < decoded.len() {
        match std::str::from_utf8(&decoded[pos..]) {
            Ok(s) => {
                out.push_str(s);
                break;
            }
            Err(e) => {
                let valid = e.valid_up_to();
                out.push_str(std::str::from_utf8(&decoded[pos..pos + valid]).unwrap_or_default());
                let bad = e.error_len().unwrap_or(decoded.len() - pos - valid).max(1);
                for k in 0..bad {
                    let offset = 3 * (pos + valid + k);
                    out.push_str(&escaped[offset..offset + 3]);
                }
                pos += valid + bad;
            }
        }
    }
}

fn hex_pair(hi: u8, lo: u8) -> u8 {
    let digit = |b: u8| match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    };
    (digit(hi) << 4) | digit(lo)
}
