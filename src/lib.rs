//! Preview widget for the `EncryptPreviewImage` node.
//!
//! Renders base64 PNG payloads from a node run as a single image or a grid,
//! and opens any of them full size in a modal, or in a new tab through a
//! short-lived blob URL.

pub mod browser;
pub mod components;
pub mod config;
pub mod data_uri;
pub mod decode;
pub mod error;
pub mod layout;
pub mod logging;
pub mod message;
pub mod modal;
pub mod presenter;
pub mod widget;

pub use config::PreviewConfig;
pub use data_uri::DataUri;
pub use decode::{base64_to_blob, decode_payload};
pub use error::{PreviewError, PreviewResult};
pub use message::ExecutionResult;
pub use layout::{PreviewLayout, PreviewState};
pub use modal::{close_image_modal, is_modal_open, show_image_modal, ModalLayer, OverlayHost};
pub use presenter::{BlobHost, ModalContent, Presenter, PresenterSession};
pub use widget::PreviewWidget;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = base64ToBlob)]
pub fn base64_to_blob_js(data: &str, content_type: &str) -> Result<web_sys::Blob, JsValue> {
    base64_to_blob(data, content_type).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Returns `false` when the modal was not shown (one is already open).
#[wasm_bindgen(js_name = showImageModal)]
pub fn show_image_modal_js(data_uri: &str) -> bool {
    match show_image_modal(data_uri) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "modal not shown");
            false
        }
    }
}
