//! Compositor WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { render_preview, JsPrintSettings } from '@photoprint/wasm';
//!
//! const preview = render_preview(photo, widget.clientWidth, widget.clientHeight, 'fit', settings);
//! ctx.putImageData(
//!   new ImageData(new Uint8ClampedArray(preview.rgba_pixels()), preview.width, preview.height),
//!   0, 0,
//! );
//! ```

use crate::settings::JsPrintSettings;
use crate::types::{filter_from_u8, parse_mode, parse_policy, to_js_error, JsDecodedImage};
use photoprint_core::compose::{self, CompositeOptions};
use photoprint_core::paper::Canvas;
use wasm_bindgen::prelude::*;

fn composite_impl(
    image: &JsDecodedImage,
    canvas_width: u32,
    canvas_height: u32,
    mode: &str,
    policy: &str,
    filter: u8,
) -> Result<JsDecodedImage, String> {
    let canvas = Canvas::new(canvas_width, canvas_height).map_err(|e| e.to_string())?;
    let options = CompositeOptions {
        mode: parse_mode(mode)?,
        policy: parse_policy(policy)?,
        filter: filter_from_u8(filter),
    };
    compose::composite_with(&image.to_decoded(), canvas, &options)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| e.to_string())
}

fn preview_impl(
    image: &JsDecodedImage,
    available_width: u32,
    available_height: u32,
    mode: &str,
    settings: &JsPrintSettings,
) -> Result<JsDecodedImage, String> {
    let settings = settings.inner();
    let options = CompositeOptions {
        // Preview resampling ignores the print quality
        filter: photoprint_core::FilterType::Bilinear,
        ..CompositeOptions::from_settings(settings, parse_mode(mode)?)
    };
    compose::render_preview(
        &image.to_decoded(),
        available_width,
        available_height,
        settings.paper_size,
        &options,
    )
    .map(JsDecodedImage::from_decoded)
    .map_err(|e| e.to_string())
}

fn print_impl(
    image: &JsDecodedImage,
    settings: &JsPrintSettings,
    mode: &str,
) -> Result<JsDecodedImage, String> {
    compose::render_print(&image.to_decoded(), settings.inner(), parse_mode(mode)?)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| e.to_string())
}

/// Draw a photo onto a white canvas of the given size.
///
/// # Arguments
///
/// * `mode` - `"fill"` or `"fit"`
/// * `policy` - `"rotate_image"` (default when empty) or `"follow_image"`
/// * `filter` - Resize algorithm: 0=Nearest, 1=Bilinear, 2=Lanczos3
#[wasm_bindgen]
pub fn composite(
    image: &JsDecodedImage,
    canvas_width: u32,
    canvas_height: u32,
    mode: &str,
    policy: &str,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    composite_impl(image, canvas_width, canvas_height, mode, policy, filter).map_err(to_js_error)
}

/// Render the preview for a widget of the given size, using the paper and
/// orientation policy from `settings`.
#[wasm_bindgen]
pub fn render_preview(
    image: &JsDecodedImage,
    available_width: u32,
    available_height: u32,
    mode: &str,
    settings: &JsPrintSettings,
) -> Result<JsDecodedImage, JsValue> {
    preview_impl(image, available_width, available_height, mode, settings).map_err(to_js_error)
}

/// Render the full-resolution print raster described by `settings`.
#[wasm_bindgen]
pub fn render_print(
    image: &JsDecodedImage,
    settings: &JsPrintSettings,
    mode: &str,
) -> Result<JsDecodedImage, JsValue> {
    print_impl(image, settings, mode).map_err(to_js_error)
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_render_print_default_is_1200_by_1800() {
        let photo = JsDecodedImage::new(60, 40, vec![10u8; 60 * 40 * 3]);
        let out = render_print(&photo, &JsPrintSettings::new(), "fill").unwrap();
        assert_eq!((out.width(), out.height()), (1200, 1800));
    }

    #[wasm_bindgen_test]
    fn test_composite_bad_mode() {
        let photo = JsDecodedImage::new(6, 4, vec![10u8; 72]);
        assert!(composite(&photo, 10, 10, "nope", "", 1).is_err());
    }
}
