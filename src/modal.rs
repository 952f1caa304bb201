use crate::browser::WebHost;
use crate::components::ImageModal;
use crate::config::PreviewConfig;
use crate::error::{PreviewError, PreviewResult};
use crate::presenter::{BlobHost, ModalContent, Presenter};
use gloo_timers::callback::Timeout;
use leptos::ev;
use leptos::mount::mount_to;
use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub const CLOSE_KEY: &str = "Escape";

thread_local! {
    static LAYER: ModalLayer<WebOverlay, WebHost> = ModalLayer::new(
        WebOverlay,
        Presenter::new(Rc::new(WebHost), PreviewConfig::load().revoke_delay_ms),
    );
}

/// DOM services the modal layer needs. `WebOverlay` is the real one.
pub trait OverlayHost {
    /// Mounts the overlay and returns what unmounts it.
    fn mount(&self, content: ModalContent) -> PreviewResult<Box<dyn FnOnce()>>;
    /// Starts forwarding key presses to the layer; returns what stops it.
    fn listen_keydown(&self) -> Box<dyn FnOnce()>;
    /// Runs `task` after the current event handler has returned.
    fn defer(&self, task: Box<dyn FnOnce()>);
}

/// Overlay on the page body, Escape wired through a window listener.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebOverlay;

impl OverlayHost for WebOverlay {
    fn mount(&self, content: ModalContent) -> PreviewResult<Box<dyn FnOnce()>> {
        let body = document().body().ok_or(PreviewError::MissingSurface)?;
        let handle = mount_to(body, move || view! { <ImageModal content=content /> });
        Ok(Box::new(move || drop(handle)))
    }

    fn listen_keydown(&self) -> Box<dyn FnOnce()> {
        let handle = window_event_listener(ev::keydown, |ev| {
            LAYER.with(|layer| layer.handle_key(&ev.key()));
        });
        Box::new(move || handle.remove())
    }

    fn defer(&self, task: Box<dyn FnOnce()>) {
        Timeout::new(0, task).forget();
    }
}

struct MountedOverlay {
    unmount: Box<dyn FnOnce()>,
    stop_keydown: Box<dyn FnOnce()>,
}

/// The page's one modal: presenter state plus the overlay showing it.
pub struct ModalLayer<O: OverlayHost, H: BlobHost + 'static> {
    host: O,
    presenter: Presenter<H>,
    overlay: RefCell<Option<MountedOverlay>>,
}

impl<O: OverlayHost, H: BlobHost + 'static> ModalLayer<O, H> {
    pub fn new(host: O, presenter: Presenter<H>) -> Self {
        Self {
            host,
            presenter,
            overlay: RefCell::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.presenter.is_open()
    }

    pub fn show(&self, data_uri: &str) -> PreviewResult<()> {
        let session = self.presenter.present(data_uri)?;
        let unmount = match self.host.mount(session.content().clone()) {
            Ok(unmount) => unmount,
            Err(e) => {
                tracing::error!(error = %e, "could not mount modal overlay");
                self.presenter.close();
                return Err(e);
            }
        };
        let stop_keydown = self.host.listen_keydown();

        *self.overlay.borrow_mut() = Some(MountedOverlay {
            unmount,
            stop_keydown,
        });
        Ok(())
    }

    /// Returns whether a modal was open.
    pub fn close(&self) -> bool {
        let closed = self.presenter.close();
        let overlay = self.overlay.borrow_mut().take();
        if let Some(MountedOverlay {
            unmount,
            stop_keydown,
        }) = overlay
        {
            stop_keydown();
            // Close runs inside the overlay's own handlers; unmount afterwards.
            self.host.defer(unmount);
        }
        closed
    }

    /// Closes on Escape. Returns whether the key closed a modal.
    pub fn handle_key(&self, key: &str) -> bool {
        key == CLOSE_KEY && self.close()
    }

    pub fn open_in_new_tab(&self) {
        if let Some(session) = self.presenter.active() {
            session.open_in_new_tab();
        }
    }
}

/// Shows `data_uri` full size. Refused while another modal is open.
pub fn show_image_modal(data_uri: &str) -> PreviewResult<()> {
    LAYER.with(|layer| layer.show(data_uri))
}

/// Closes the open modal, if any, releasing its blob URL.
pub fn close_image_modal() -> bool {
    LAYER.with(|layer| layer.close())
}

pub fn is_modal_open() -> bool {
    LAYER.with(|layer| layer.is_open())
}

pub(crate) fn open_active_in_new_tab() {
    LAYER.with(|layer| layer.open_in_new_tab());
}
