/// Basic URL parser states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Scheme start state
    SchemeStart,
    /// Scheme state
    Scheme,
    /// No scheme state (relative reference against a base)
    NoScheme,
    /// Special authority slashes state
    SpecialAuthoritySlashes,
    /// Path or authority state (non-special schemes)
    PathOrAuthority,
    /// Authority state
    Authority,
    /// Host state
    Host,
    /// Port state
    Port,
    /// Path start state
    PathStart,
    /// Path state (list paths)
    Path,
    /// Relative path state (shortens the inherited base path first)
    RelativePath,
    /// Opaque path state (non-special schemes without authority)
    OpaquePath,
    /// Query state
    Query,
    /// Fragment state
    Fragment,
}
