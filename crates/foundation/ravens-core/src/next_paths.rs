//! Where a page can send the visitor next.

use serde::{Deserialize, Serialize};

use crate::return_state::ReturnState;

/// Target used when a decision names an alternative path the page never set.
pub const ROOT_PATH: &str = "/";

/// A page's onward routes, one per advancing `ReturnState`.
///
/// Paths are relative to the configured path prefix, e.g. `/intro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPaths {
    /// The main forward direction.
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quaternary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quinary: Option<String>,
}

impl NextPaths {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: None,
            tertiary: None,
            quaternary: None,
            quinary: None,
        }
    }

    pub fn with_secondary(mut self, path: impl Into<String>) -> Self {
        self.secondary = Some(path.into());
        self
    }

    pub fn with_tertiary(mut self, path: impl Into<String>) -> Self {
        self.tertiary = Some(path.into());
        self
    }

    pub fn with_quaternary(mut self, path: impl Into<String>) -> Self {
        self.quaternary = Some(path.into());
        self
    }

    pub fn with_quinary(mut self, path: impl Into<String>) -> Self {
        self.quinary = Some(path.into());
        self
    }

    /// Pick the target for a decision.
    ///
    /// Alternative targets that were never configured resolve to `ROOT_PATH`.
    /// `Primary` and `ValidationError` both land on `primary`, though the
    /// page engine never resolves a validation error.
    pub fn resolve(&self, decision: ReturnState) -> &str {
        let alternative = match decision {
            ReturnState::Quinary => &self.quinary,
            ReturnState::Quaternary => &self.quaternary,
            ReturnState::Tertiary => &self.tertiary,
            ReturnState::Secondary => &self.secondary,
            ReturnState::Primary | ReturnState::ValidationError => return &self.primary,
        };
        alternative.as_deref().unwrap_or(ROOT_PATH)
    }
}
