use serde::{Deserialize, Serialize};

const LOCALSTORAGE_KEY: &str = "encrypt-preview-config";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    pub min_cell_width: f64,
    pub gap: f64,
    pub max_columns: usize,
    pub widget_height: f64,
    pub revoke_delay_ms: u32,
    pub log_level: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            min_cell_width: 80.0,
            gap: 4.0,
            max_columns: 8,
            widget_height: 300.0,
            revoke_delay_ms: 30_000,
            log_level: "info".to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    fn sanitized(mut self) -> Self {
        self.min_cell_width = self.min_cell_width.max(1.0);
        self.gap = self.gap.max(0.0);
        self.max_columns = self.max_columns.max(1);
        self
    }

    /// Defaults, overridden by whatever JSON sits in local storage.
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(LOCALSTORAGE_KEY).ok().flatten());

        match stored {
            Some(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(
                    key = LOCALSTORAGE_KEY,
                    error = %e,
                    "ignoring invalid preview config"
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
