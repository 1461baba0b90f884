//! Raster encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { render_print, encode_png_from_image } from '@photoprint/wasm';
//!
//! const raster = render_print(photo, settings, 'fill');
//! const blob = new Blob([encode_png_from_image(raster)], { type: 'image/png' });
//! ```

use crate::types::{to_js_error, JsDecodedImage};
use photoprint_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel, row-major order)
/// * `quality` - JPEG quality (1-100, clamped)
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(to_js_error)
}

/// Encode RGB pixel data to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(pixels, width, height).map_err(to_js_error)
}

/// Encode a rendered raster to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode_jpeg(&image.pixels(), image.width(), image.height(), quality)
}

/// Encode a rendered raster to PNG bytes, the format sent to the printer.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsDecodedImage) -> Result<Vec<u8>, JsValue> {
    encode_png(&image.pixels(), image.width(), image.height())
}

/// WASM-specific tests that require JsValue.
///
/// The encoders themselves are covered by `photoprint_core::encode`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_from_image() {
        let img = JsDecodedImage::new(50, 50, vec![128u8; 50 * 50 * 3]);
        let jpeg = encode_jpeg_from_image(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_png_from_image() {
        let img = JsDecodedImage::new(12, 18, vec![255u8; 12 * 18 * 3]);
        let png = encode_png_from_image(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_invalid_pixel_data() {
        assert!(encode_jpeg(&[128u8; 30], 100, 100, 90).is_err());
        assert!(encode_png(&[], 0, 10).is_err());
    }
}
