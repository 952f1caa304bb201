use crate::data_uri::{looks_like_image, DataUri};
use crate::decode::decode_payload;
use crate::error::{PreviewError, PreviewResult};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const LOAD_ERROR_TEXT: &str = "Error loading image.";
pub const OPEN_FAILED_TEXT: &str = "Could not open image in a new tab.";

/// Browser services the presenter needs. `WebHost` is the real one.
pub trait BlobHost {
    fn create_object_url(&self, bytes: &[u8], content_type: &str) -> PreviewResult<String>;
    fn revoke_object_url(&self, url: &str);
    fn open_tab(&self, url: &str) -> PreviewResult<()>;
    /// Non-blocking user-visible notice.
    fn notify(&self, message: &str);
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalContent {
    Image(String),
    Error(&'static str),
}

/// One open modal. Holds at most one live object URL.
pub struct PresenterSession<H: BlobHost + 'static> {
    host: Rc<H>,
    content: ModalContent,
    blob_url: Rc<RefCell<Option<String>>>,
    open: Cell<bool>,
    revoke_delay_ms: u32,
}

impl<H: BlobHost + 'static> PresenterSession<H> {
    fn new(host: Rc<H>, content: ModalContent, revoke_delay_ms: u32) -> Self {
        Self {
            host,
            content,
            blob_url: Rc::new(RefCell::new(None)),
            open: Cell::new(true),
            revoke_delay_ms,
        }
    }

    pub fn content(&self) -> &ModalContent {
        &self.content
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn live_blob_url(&self) -> Option<String> {
        self.blob_url.borrow().clone()
    }

    /// Opens the image in a new tab through a fresh object URL. Falls back to
    /// the raw data URI, then to a notice; never fails outward.
    pub fn open_in_new_tab(&self) {
        if !self.open.get() {
            return;
        }
        let ModalContent::Image(data_uri) = &self.content else {
            return;
        };

        let Some(parsed) = DataUri::parse(data_uri) else {
            tracing::warn!("data URI has no blob-convertible shape, opening it directly");
            self.open_raw(data_uri);
            return;
        };

        let opened = self
            .replace_blob_url(&parsed)
            .and_then(|url| self.host.open_tab(&url));
        if let Err(e) = opened {
            tracing::warn!(error = %e, "could not open blob URL, falling back to data URI");
            self.open_raw(data_uri);
        }
    }

    /// Close-time cleanup. Safe to call more than once.
    pub fn release(&self) {
        self.open.set(false);
        self.revoke_live();
    }

    fn replace_blob_url(&self, parsed: &DataUri<'_>) -> PreviewResult<String> {
        self.revoke_live();

        let bytes = decode_payload(parsed.payload)?;
        let url = self.host.create_object_url(&bytes, parsed.mime)?;
        *self.blob_url.borrow_mut() = Some(url.clone());
        self.schedule_revocation(url.clone());
        Ok(url)
    }

    fn schedule_revocation(&self, url: String) {
        let slot = Rc::clone(&self.blob_url);
        let host = Rc::clone(&self.host);
        self.host.schedule(
            self.revoke_delay_ms,
            Box::new(move || {
                let mut slot = slot.borrow_mut();
                // A close or a newer click may already have revoked it.
                if slot.as_deref() == Some(url.as_str()) {
                    host.revoke_object_url(&url);
                    *slot = None;
                    tracing::debug!(url = %url, "revoked blob URL after delay");
                }
            }),
        );
    }

    fn revoke_live(&self) {
        let live = self.blob_url.borrow_mut().take();
        if let Some(url) = live {
            self.host.revoke_object_url(&url);
        }
    }

    fn open_raw(&self, target: &str) {
        if let Err(e) = self.host.open_tab(target) {
            tracing::error!(error = %e, "opening data URI also failed");
            self.host.notify(OPEN_FAILED_TEXT);
        }
    }
}

/// Owns the single modal slot.
pub struct Presenter<H: BlobHost + 'static> {
    host: Rc<H>,
    revoke_delay_ms: u32,
    active: RefCell<Option<Rc<PresenterSession<H>>>>,
}

impl<H: BlobHost + 'static> Presenter<H> {
    pub fn new(host: Rc<H>, revoke_delay_ms: u32) -> Self {
        Self {
            host,
            revoke_delay_ms,
            active: RefCell::new(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.active.borrow().is_some()
    }

    pub fn active(&self) -> Option<Rc<PresenterSession<H>>> {
        self.active.borrow().clone()
    }

    pub fn present(&self, data_uri: &str) -> PreviewResult<Rc<PresenterSession<H>>> {
        if self.is_open() {
            tracing::warn!("modal already open");
            return Err(PreviewError::ModalAlreadyOpen);
        }

        let content = if looks_like_image(data_uri) {
            ModalContent::Image(data_uri.to_string())
        } else {
            let error = PreviewError::InvalidDataUri(data_uri.chars().take(32).collect());
            tracing::error!(error = %error, "showing error modal");
            ModalContent::Error(LOAD_ERROR_TEXT)
        };

        let session = Rc::new(PresenterSession::new(
            Rc::clone(&self.host),
            content,
            self.revoke_delay_ms,
        ));
        *self.active.borrow_mut() = Some(Rc::clone(&session));
        Ok(session)
    }

    /// Returns whether a modal was open.
    pub fn close(&self) -> bool {
        let session = self.active.borrow_mut().take();
        match session {
            Some(session) => {
                session.release();
                true
            }
            None => false,
        }
    }
}
