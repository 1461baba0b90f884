//! Photo decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@photoprint/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const photo = decode_image(bytes);
//! console.log(`${photo.width}x${photo.height}, landscape: ${photo.is_landscape}`);
//! ```

use crate::types::{filter_from_u8, to_js_error, JsDecodedImage};
use photoprint_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG photo from bytes.
///
/// EXIF orientation is applied, so `width`/`height` of the result are the
/// dimensions the photo is meant to be viewed at.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or are corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}

/// EXIF orientation tag of a photo (1-8, 1 when absent).
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `filter` - Resize algorithm: 0=Nearest (fastest), 1=Bilinear (default), 2=Lanczos3 (best quality)
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(to_js_error)
}
