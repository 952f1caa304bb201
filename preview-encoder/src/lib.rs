use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NODE_NAME: &str = "EncryptPreviewImage";
pub const DISPLAY_NAME: &str = "Encrypt Preview Image (No File)";
pub const CATEGORY: &str = "image/preview";

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Frame is {width}x{height}x{channels} but carries {actual} values")]
    ShapeMismatch {
        width: u32,
        height: u32,
        channels: u8,
        actual: usize,
    },

    #[error("Unsupported channel count {0}, expected 1 to 4")]
    UnsupportedChannels(u8),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, EncodeError>;

/// One image of a batch, row-major HWC with values nominally in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<f32>,
}

impl Frame {
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<f32>) -> Self {
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    fn color_type(&self) -> Result<ExtendedColorType> {
        match self.channels {
            1 => Ok(ExtendedColorType::L8),
            2 => Ok(ExtendedColorType::La8),
            3 => Ok(ExtendedColorType::Rgb8),
            4 => Ok(ExtendedColorType::Rgba8),
            other => Err(EncodeError::UnsupportedChannels(other)),
        }
    }

    fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }

    /// Scale to 0..=255 and truncate, the way the node always has.
    fn to_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .map(|v| {
                let scaled = v * 255.0;
                if scaled.is_nan() {
                    0
                } else {
                    scaled.clamp(0.0, 255.0) as u8
                }
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Previews {
    pub encrypted_previews: Vec<String>,
}

/// Message returned to the host after a node run.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PreviewOutput {
    pub ui: Previews,
}

impl PreviewOutput {
    pub fn payloads(&self) -> &[String] {
        &self.ui.encrypted_previews
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn encode_frame(frame: &Frame) -> Result<String> {
    let color_type = frame.color_type()?;
    if frame.pixels.len() != frame.expected_len() {
        return Err(EncodeError::ShapeMismatch {
            width: frame.width,
            height: frame.height,
            channels: frame.channels,
            actual: frame.pixels.len(),
        });
    }

    let bytes = frame.to_bytes();
    let mut png = Vec::new();
    PngEncoder::new_with_quality(&mut png, CompressionType::Fast, FilterType::Adaptive)
        .write_image(&bytes, frame.width, frame.height, color_type)?;

    Ok(BASE64.encode(&png))
}

/// Encodes frames in order. The first failure ends the batch; whatever was
/// encoded before it is still returned.
pub fn encode_batch(frames: &[Frame]) -> PreviewOutput {
    let mut encrypted_previews = Vec::with_capacity(frames.len());

    for (index, frame) in frames.iter().enumerate() {
        match encode_frame(frame) {
            Ok(payload) => encrypted_previews.push(payload),
            Err(e) => {
                tracing::error!(node = NODE_NAME, index, error = %e, "error encoding image");
                break;
            }
        }
    }

    tracing::debug!(node = NODE_NAME, count = encrypted_previews.len(), "encoded previews");
    PreviewOutput {
        ui: Previews { encrypted_previews },
    }
}
