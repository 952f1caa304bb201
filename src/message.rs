use crate::error::PreviewResult;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UiSection {
    #[serde(default)]
    pub encrypted_previews: Option<Vec<String>>,
}

/// What the host delivers after a node run. Either the bare `ui` section or
/// the backend's whole `{"ui": {...}}` envelope.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ExecutionResult {
    #[serde(default)]
    pub encrypted_previews: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<UiSection>,
}

impl ExecutionResult {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_js(value: JsValue) -> PreviewResult<Self> {
        if value.is_null() || value.is_undefined() {
            return Ok(Self::default());
        }
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    pub fn previews(&self) -> &[String] {
        self.encrypted_previews
            .as_deref()
            .or_else(|| self.ui.as_ref().and_then(|ui| ui.encrypted_previews.as_deref()))
            .unwrap_or(&[])
    }

    /// Payloads to show, or `None` when there is nothing to preview.
    pub fn into_previews(self) -> Option<Vec<String>> {
        let previews = match self.encrypted_previews {
            Some(previews) => previews,
            None => self.ui.and_then(|ui| ui.encrypted_previews).unwrap_or_default(),
        };
        (!previews.is_empty()).then_some(previews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flat_message() {
        let result = ExecutionResult::from_json(r#"{"encrypted_previews": ["a", "b"]}"#).unwrap();
        assert_eq!(result.previews(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn envelope_message() {
        let result =
            ExecutionResult::from_json(r#"{"ui": {"encrypted_previews": ["a"]}}"#).unwrap();
        assert_eq!(result.previews(), ["a".to_string()]);
        assert_eq!(result.into_previews(), Some(vec!["a".to_string()]));
    }

    #[test]
    fn flat_field_wins_over_envelope() {
        let result = ExecutionResult::from_json(
            r#"{"encrypted_previews": ["flat"], "ui": {"encrypted_previews": ["nested"]}}"#,
        )
        .unwrap();
        assert_eq!(result.previews(), ["flat".to_string()]);
    }

    #[test]
    fn missing_field_means_no_preview() {
        let result = ExecutionResult::from_json(r#"{"images": []}"#).unwrap();
        assert!(result.previews().is_empty());
        assert_eq!(result.into_previews(), None);
    }

    #[test]
    fn null_and_empty_mean_no_preview() {
        let null = ExecutionResult::from_json(r#"{"encrypted_previews": null}"#).unwrap();
        assert_eq!(null.into_previews(), None);
        let empty = ExecutionResult::from_json(r#"{"encrypted_previews": []}"#).unwrap();
        assert_eq!(empty.into_previews(), None);
    }

    #[test]
    fn keeps_payload_order() {
        let result =
            ExecutionResult::from_json(r#"{"encrypted_previews": ["3", "1", "2"]}"#).unwrap();
        assert_eq!(
            result.into_previews().unwrap(),
            vec!["3".to_string(), "1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(ExecutionResult::from_json(r#"{"encrypted_previews": "abc"}"#).is_err());
    }
}
