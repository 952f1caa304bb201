mod image_modal;
mod preview_panel;

pub use image_modal::ImageModal;
pub use preview_panel::PreviewPanel;
