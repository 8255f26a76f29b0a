//! Models passed between the session, controllers and views.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Named error flags raised while checking a submission. `true` means the
/// error is present.
pub type Errors = BTreeMap<String, bool>;

/// The visitor's accumulated answers.
///
/// Opaque to the page engine: controllers write it, view-model builders read
/// it, the session stores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationModel(Map<String, Value>);

impl ApplicationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> crate::Result<()> {
        self.0.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Application state filtered and mapped for rendering a view.
///
/// Every view gets `back_url` and `error`; pages that need more put it in
/// `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// Where the '< Back' link goes. `None` hides the link.
    pub back_url: Option<String>,

    /// Errors found by the controller. `None` hides both the error summary
    /// and the in-line messages.
    pub error: Option<Errors>,

    /// Page-specific values.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ViewModel {
    pub fn new(back_url: Option<String>, error: Option<Errors>) -> Self {
        Self {
            back_url,
            error,
            fields: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Names of the errors that are switched on, in name order.
    pub fn active_errors(&self) -> Vec<&str> {
        self.error
            .iter()
            .flat_map(|errors| errors.iter())
            .filter(|(_, present)| **present)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_round_trips_typed_values() {
        let mut model = ApplicationModel::new();
        model.set("ravensCount", 3u32).unwrap();
        model.set("applicant", "A. Crow").unwrap();

        assert_eq!(model.get::<u32>("ravensCount"), Some(3));
        assert_eq!(model.get::<String>("applicant").as_deref(), Some("A. Crow"));
        assert_eq!(model.get::<u32>("applicant"), None);
        assert_eq!(model.get::<String>("missing"), None);
    }

    #[test]
    fn view_model_serializes_with_base_fields() {
        let vm = ViewModel::new(Some("/intro".into()), None).with_field("heading", "Apply");
        let json = serde_json::to_value(&vm).unwrap();
        assert_eq!(json["backUrl"], "/intro");
        assert!(json["error"].is_null());
        assert_eq!(json["heading"], "Apply");
    }

    #[test]
    fn active_errors_skips_cleared_flags() {
        let mut errors = Errors::new();
        errors.insert("noName".into(), true);
        errors.insert("noEmail".into(), false);
        errors.insert("badPostcode".into(), true);

        let vm = ViewModel::new(None, Some(errors));
        assert_eq!(vm.active_errors(), vec!["badPostcode", "noName"]);
        assert!(ViewModel::default().active_errors().is_empty());
    }
}
