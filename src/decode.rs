use crate::error::PreviewResult;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use js_sys::{Array, Uint8Array};
use std::borrow::Cow;
use web_sys::{Blob, BlobPropertyBag};

pub const CHUNK_SIZE: usize = 512;

/// Accepts what `atob` accepts: padding optional, whitespace ignored, spare
/// bits in the last symbol discarded.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Payload part of `data`: everything after the first comma, or all of it.
pub fn strip_prefix(data: &str) -> &str {
    match data.split_once(',') {
        Some((_, payload)) => payload,
        None => data,
    }
}

pub fn decode_payload(data: &str) -> PreviewResult<Vec<u8>> {
    let payload = strip_prefix(data);
    let payload: Cow<'_, str> = if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(payload.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(payload)
    };
    Ok(LENIENT.decode(payload.as_bytes())?)
}

pub fn payload_chunks(bytes: &[u8], size: usize) -> impl Iterator<Item = &[u8]> {
    bytes.chunks(size.max(1))
}

pub fn blob_from_bytes(bytes: &[u8], content_type: &str) -> PreviewResult<Blob> {
    let parts = Array::new();
    for chunk in payload_chunks(bytes, CHUNK_SIZE) {
        parts.push(&Uint8Array::from(chunk));
    }

    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(|e| {
        tracing::error!(content_type, "blob construction failed");
        e.into()
    })
}

pub fn base64_to_blob(data: &str, content_type: &str) -> PreviewResult<Blob> {
    let bytes = decode_payload(data)?;
    blob_from_bytes(&bytes, content_type)
}
