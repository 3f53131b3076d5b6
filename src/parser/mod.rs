mod machine;
mod state;

pub(crate) use state::State;

use crate::error::{ParseError, Result};
use crate::helpers::trim_input;
use crate::url::Url;

/// Parse a URL string, optionally against a base URL.
///
/// Leading and trailing ASCII space and horizontal tab are removed
/// before the state machine runs. An empty trimmed input resolves to a
/// copy of the base.
pub(crate) fn parse_url(input: &str, base: Option<&Url>) -> Result<Url> {
    let trimmed = trim_input(input);
    if trimmed.is_empty() {
        return match base {
            Some(base) => Ok(base.clone()),
            None => Err(ParseError::EmptyInput),
        };
    }
    machine::run(trimmed, base)
}
