//! What a page sees of an incoming request.

use axum::http::Method;

/// Query action asking a page to step the visitor backwards.
pub const BACK_ACTION: &str = "back";

/// Decoded `name=value` pairs in the order they arrived. Names may repeat,
/// as they do for checkbox groups.
pub type Pairs = Vec<(String, String)>;

/// A GET or POST made to a page, reduced to the parts pages use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageRequest {
    pub method: Method,
    pub query: Pairs,
    pub form: Pairs,
}

fn first<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

impl PageRequest {
    pub fn get(query: Pairs) -> Self {
        Self {
            method: Method::GET,
            query,
            form: Pairs::new(),
        }
    }

    pub fn post(form: Pairs) -> Self {
        Self {
            method: Method::POST,
            query: Pairs::new(),
            form,
        }
    }

    /// A GET carrying `?action=back`.
    pub fn back() -> Self {
        Self::get(vec![("action".to_string(), BACK_ACTION.to_string())])
    }

    pub fn action(&self) -> Option<&str> {
        first(&self.query, "action")
    }

    pub fn is_back(&self) -> bool {
        self.action() == Some(BACK_ACTION)
    }

    /// A submitted form field, trimmed. Blank fields read as `None`. For a
    /// repeated name this is the first value.
    pub fn field(&self, name: &str) -> Option<&str> {
        first(&self.form, name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// Every non-blank value submitted under `name`, trimmed, in order.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.form
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|v| !v.is_empty())
            .collect()
    }
}
