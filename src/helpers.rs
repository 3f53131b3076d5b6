/// Trim leading and trailing ASCII space and horizontal tab.
/// These are the only code points removed before parsing.
pub fn trim_input(input: &str) -> &str {
    input.trim_matches([' ', '\t'])
}

/// Check if a path segment is a Windows drive letter ("C:" or "C|").
/// A sole drive-letter segment in a file: URL survives ".." popping.
pub fn is_windows_drive_letter(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && matches!(bytes[1], b':' | b'|')
}
