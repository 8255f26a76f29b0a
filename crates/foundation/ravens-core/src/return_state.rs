//! Controller decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a controller decided after looking at a submitted form.
///
/// `ValidationError` redisplays the current page. Every other variant moves
/// the visitor forward along the matching entry of the page's `NextPaths`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnState {
    ValidationError,
    Primary,
    Secondary,
    Tertiary,
    Quaternary,
    Quinary,
}

impl ReturnState {
    /// Does this decision move the visitor on to another page?
    pub fn is_advancing(self) -> bool {
        !matches!(self, ReturnState::ValidationError)
    }

    pub fn label(self) -> &'static str {
        match self {
            ReturnState::ValidationError => "validation-error",
            ReturnState::Primary => "primary",
            ReturnState::Secondary => "secondary",
            ReturnState::Tertiary => "tertiary",
            ReturnState::Quaternary => "quaternary",
            ReturnState::Quinary => "quinary",
        }
    }
}

impl fmt::Display for ReturnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
