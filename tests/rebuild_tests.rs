#![allow(clippy::unwrap_used)]

/// URL values are immutable; updates rebuild a new value. These tests
/// cover the rebuild surface: join() and the with_* methods.
use whurl::{HostError, ParseError, Url};

fn parse(input: &str) -> Url {
    Url::parse(input, None).unwrap()
}

#[test]
fn test_join_relative() {
    let base = parse("http://example.com/a/b/c");
    assert_eq!(base.join("d").unwrap().to_string(), "http://example.com/a/b/d");
    assert_eq!(base.join("../d").unwrap().to_string(), "http://example.com/a/d");
    assert_eq!(base.join("/d").unwrap().to_string(), "http://example.com/d");
    assert_eq!(base.join("?q").unwrap().to_string(), "http://example.com/a/b/c?q");
    assert_eq!(
        base.join("//other.test/x").unwrap().to_string(),
        "http://other.test/x"
    );
    // The base itself is untouched
    assert_eq!(base.to_string(), "http://example.com/a/b/c");
}

#[test]
fn test_join_absolute() {
    let base = parse("http://example.com/");
    let joined = base.join("ftp://files.example/pub").unwrap();
    assert_eq!(joined.scheme(), "ftp");
}

#[test]
fn test_join_error() {
    let base = parse("mailto:a@b");
    assert!(matches!(base.join("x"), Err(ParseError::InvalidScheme(_))));
}

#[test]
fn test_with_query() {
    let url = parse("http://example.com/p?old#f");

    let updated = url.with_query(Some("a=b c"));
    assert_eq!(updated.query(), Some("a=b%20c"));
    // The fragment is untouched
    assert_eq!(updated.to_string(), "http://example.com/p?a=b%20c#f");

    let removed = url.with_query(None);
    assert_eq!(removed.query(), None);
    assert_eq!(removed.to_string(), "http://example.com/p#f");

    // The original value is unchanged
    assert_eq!(url.query(), Some("old"));
}

#[test]
fn test_with_query_encode_set_follows_scheme() {
    // The single quote is only encoded for special schemes
    let special = parse("http://example.com/").with_query(Some("it's"));
    assert_eq!(special.query(), Some("it%27s"));

    let non_special = parse("sc://h/").with_query(Some("it's"));
    assert_eq!(non_special.query(), Some("it's"));
}

#[test]
fn test_with_fragment() {
    let url = parse("http://example.com/p");
    let updated = url.with_fragment(Some("sec tion"));
    assert_eq!(updated.to_string(), "http://example.com/p#sec%20tion");
    assert_eq!(updated.with_fragment(None).to_string(), "http://example.com/p");
}

#[test]
fn test_with_port() {
    let url = parse("http://example.com/");
    assert_eq!(
        url.with_port(Some(8080)).unwrap().to_string(),
        "http://example.com:8080/"
    );
    // Default ports normalize away
    assert_eq!(
        url.with_port(Some(80)).unwrap().to_string(),
        "http://example.com/"
    );
    assert_eq!(
        parse("http://example.com:8080/").with_port(None).unwrap().port(),
        None
    );
}

#[test]
fn test_with_port_requires_host() {
    let url = parse("file:///x");
    assert_eq!(
        url.with_port(Some(8080)),
        Err(ParseError::InvalidHost(HostError::EmptyHostNotAllowed))
    );
    let url = parse("mailto:a@b");
    assert!(url.with_port(Some(8080)).is_err());
    // Removing a port never fails
    assert!(url.with_port(None).is_ok());
}

#[test]
fn test_rebuilt_values_round_trip() {
    let url = parse("http://example.com/p")
        .with_query(Some("k=v"))
        .with_fragment(Some("top"))
        .with_port(Some(81))
        .unwrap();
    let reparsed = Url::parse(&url.to_string(), None).unwrap();
    assert_eq!(reparsed, url);
}
