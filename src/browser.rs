use crate::decode::blob_from_bytes;
use crate::error::{PreviewError, PreviewResult};
use crate::presenter::BlobHost;
use gloo_timers::callback::Timeout;
use web_sys::Url;

/// `BlobHost` backed by the page's window.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebHost;

impl BlobHost for WebHost {
    fn create_object_url(&self, bytes: &[u8], content_type: &str) -> PreviewResult<String> {
        let blob = blob_from_bytes(bytes, content_type)?;
        Ok(Url::create_object_url_with_blob(&blob)?)
    }

    fn revoke_object_url(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            let error = PreviewError::from(e);
            tracing::warn!(url, error = %error, "revoking blob URL failed");
        }
    }

    fn open_tab(&self, url: &str) -> PreviewResult<()> {
        let window = web_sys::window().ok_or_else(|| PreviewError::Js("no window".to_string()))?;
        window.open_with_url_and_target(url, "_blank")?;
        Ok(())
    }

    fn notify(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            tracing::warn!(message, "no window to show notice in");
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            let error = PreviewError::from(e);
            tracing::warn!(message, error = %error, "could not show notice");
        }
    }

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}
