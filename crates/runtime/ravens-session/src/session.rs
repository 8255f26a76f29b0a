//! Key/value access to one visitor's session.

use ravens_core::{ApplicationModel, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Pages the visitor has submitted, oldest first.
pub const PREVIOUS_PAGES: &str = "previousPages";

/// The visitor's answers so far.
pub const APPLICATION_MODEL: &str = "applicationModel";

/// One visitor's session values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    id: Option<String>,
    values: Map<String, Value>,
    changed: bool,
}

impl Session {
    /// A blank session that has never been stored.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn restore(id: String, values: Map<String, Value>) -> Self {
        Self {
            id: Some(id),
            values,
            changed: false,
        }
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Map<String, Value>, bool) {
        (self.id, self.values, self.changed)
    }

    /// Store id, once the session has been committed at least once.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Read a value. Missing and malformed values both read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, "Ignoring malformed session value: {}", e);
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_string(), value);
            self.changed = true;
        }
        Ok(())
    }

    pub fn is_blank(&self) -> bool {
        self.values.is_empty()
    }

    /// Has anything been written since the session was loaded?
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn previous_pages(&self) -> Vec<String> {
        self.get(PREVIOUS_PAGES).unwrap_or_default()
    }

    pub fn set_previous_pages(&mut self, pages: &[String]) -> Result<()> {
        self.set(PREVIOUS_PAGES, pages)
    }

    pub fn application_model(&self) -> ApplicationModel {
        self.get(APPLICATION_MODEL).unwrap_or_default()
    }

    pub fn set_application_model(&mut self, model: &ApplicationModel) -> Result<()> {
        self.set(APPLICATION_MODEL, model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_reads_defaults() {
        let session = Session::new();
        assert!(session.previous_pages().is_empty());
        assert!(session.application_model().is_empty());
        assert!(session.is_blank());
        assert!(!session.is_changed());
        assert_eq!(session.id(), None);
    }

    #[test]
    fn previous_pages_keep_order_and_duplicates() {
        let mut session = Session::new();
        let pages = vec!["/intro".to_string(), "/name".to_string(), "/intro".to_string()];
        session.set_previous_pages(&pages).unwrap();

        assert_eq!(session.previous_pages(), pages);
        assert!(session.is_changed());
    }

    #[test]
    fn writing_same_value_is_not_a_change() {
        let mut values = Map::new();
        values.insert(PREVIOUS_PAGES.into(), serde_json::json!(["/intro"]));
        let mut session = Session::restore("abc".into(), values);

        session
            .set_previous_pages(&["/intro".to_string()])
            .unwrap();
        assert!(!session.is_changed());
    }

    #[test]
    fn malformed_history_reads_as_empty() {
        let mut values = Map::new();
        values.insert(PREVIOUS_PAGES.into(), serde_json::json!({"not": "a list"}));
        let session = Session::restore("abc".into(), values);

        assert!(session.previous_pages().is_empty());
    }

    #[test]
    fn application_model_round_trip() {
        let mut model = ApplicationModel::new();
        model.set("licenceType", "individual").unwrap();

        let mut session = Session::new();
        session.set_application_model(&model).unwrap();
        assert_eq!(session.application_model(), model);
        assert!(session.previous_pages().is_empty());
    }
}
