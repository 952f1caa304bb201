use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreviewError {
    #[error("Malformed image payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid image data URI: {0}")]
    InvalidDataUri(String),

    #[error("Preview container not found")]
    MissingSurface,

    #[error("Modal already open")]
    ModalAlreadyOpen,

    #[error("Invalid execution result: {0}")]
    InvalidMessage(String),

    #[error("Browser call failed: {0}")]
    Js(String),
}

pub type PreviewResult<T> = Result<T, PreviewError>;

impl From<JsValue> for PreviewError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        PreviewError::Js(message)
    }
}

impl From<base64::DecodeError> for PreviewError {
    fn from(e: base64::DecodeError) -> Self {
        PreviewError::MalformedPayload(e.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for PreviewError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        PreviewError::InvalidMessage(e.to_string())
    }
}
