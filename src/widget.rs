use crate::components::PreviewPanel;
use crate::config::PreviewConfig;
use crate::error::PreviewError;
use crate::layout::{container_style, PreviewLayout, PreviewState};
use crate::logging;
use crate::message::ExecutionResult;
use leptos::mount::mount_to;
use leptos::prelude::*;
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Display surface for one `EncryptPreviewImage` node. The host creates it
/// with the widget's container element and forwards execution results.
#[wasm_bindgen]
pub struct PreviewWidget {
    id: Uuid,
    config: PreviewConfig,
    container: Option<HtmlElement>,
    unmount: Option<Box<dyn FnOnce()>>,
    state: PreviewState,
}

#[wasm_bindgen]
impl PreviewWidget {
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement) -> PreviewWidget {
        console_error_panic_hook::set_once();
        let config = PreviewConfig::load();
        logging::init(&config.log_level);

        container.set_class_name("encrypt-preview-outer-container");
        if let Err(e) = container.set_attribute("style", container_style()) {
            let error = PreviewError::from(e);
            tracing::warn!(error = %error, "could not style preview container");
        }

        let mut widget = PreviewWidget {
            id: Uuid::new_v4(),
            config,
            container: Some(container.clone()),
            unmount: None,
            state: PreviewState::default(),
        };
        widget.render(&container, PreviewLayout::Waiting, Vec::new());
        tracing::debug!(widget = %widget.id, "preview widget created");
        widget
    }

    #[wasm_bindgen(js_name = onResult)]
    pub fn on_result(&mut self, message: JsValue) {
        let previews = match ExecutionResult::from_js(message) {
            Ok(result) => result.into_previews(),
            Err(e) => {
                tracing::warn!(widget = %self.id, error = %e, "unreadable execution result");
                None
            }
        };
        self.show(previews);
    }

    #[wasm_bindgen(js_name = onDestroy)]
    pub fn on_destroy(&mut self) {
        self.unmount_panel();
        self.container = None;
        self.state.clear();
        tracing::debug!(widget = %self.id, "preview widget destroyed");
    }

    /// Current payloads, or `null` when nothing is previewed.
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> JsValue {
        match self.state.previews() {
            Some(previews) => serde_wasm_bindgen::to_value(previews).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    /// Called by the host when the node is resized; the same payloads are
    /// laid out again for the new width.
    #[wasm_bindgen(js_name = computeSize)]
    pub fn compute_size(&mut self, width: f64) -> Vec<f64> {
        self.on_resize(width);
        vec![width, self.config.widget_height]
    }

    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&mut self, width: f64) {
        let Some(container) = self.container.clone() else {
            return;
        };
        let measured = container.client_width() as f64;
        let width = if measured > 0.0 { measured } else { width };

        if let Some(layout) = self.state.relayout(width, &self.config) {
            tracing::debug!(widget = %self.id, width, ?layout, "relayout previews");
            let previews = self.state.previews().map(<[String]>::to_vec).unwrap_or_default();
            self.render(&container, layout, previews);
        }
    }
}

impl PreviewWidget {
    fn show(&mut self, previews: Option<Vec<String>>) {
        let Some(container) = self.container.clone() else {
            let error = PreviewError::MissingSurface;
            tracing::warn!(widget = %self.id, error = %error, "dropping execution result");
            return;
        };

        let width = container.client_width() as f64;
        let layout = self.state.set_previews(previews, width, &self.config);
        let previews = self.state.previews().map(<[String]>::to_vec).unwrap_or_default();
        tracing::debug!(widget = %self.id, count = previews.len(), ?layout, "showing previews");

        self.render(&container, layout, previews);
    }

    fn render(&mut self, container: &HtmlElement, layout: PreviewLayout, previews: Vec<String>) {
        self.unmount_panel();
        let gap = self.config.gap;
        let handle = mount_to(container.clone(), move || {
            view! { <PreviewPanel previews=previews layout=layout gap=gap /> }
        });
        self.unmount = Some(Box::new(move || drop(handle)));
    }

    fn unmount_panel(&mut self) {
        if let Some(unmount) = self.unmount.take() {
            unmount();
        }
    }
}
