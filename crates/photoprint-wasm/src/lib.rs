//! Photoprint WASM - WebAssembly bindings for photoprint
//!
//! This crate exposes the photoprint-core layout engine and compositor to a
//! browser print-preview surface.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Photo decoding with EXIF orientation applied
//! - `layout` - Placement geometry and preview/print canvas sizes
//! - `compose` - Rendering preview and print rasters
//! - `encode` - PNG/JPEG output
//! - `settings` - Print preferences
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, render_preview, JsPrintSettings } from '@photoprint/wasm';
//!
//! await init();
//!
//! const photo = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const preview = render_preview(photo, 600, 400, 'fill', new JsPrintSettings());
//! console.log(`Preview ${preview.width}x${preview.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod compose;
mod decode;
mod encode;
mod layout;
mod settings;
mod types;

pub use compose::{composite, render_preview, render_print};
pub use decode::{decode_image, get_orientation, resize};
pub use encode::{encode_jpeg, encode_jpeg_from_image, encode_png, encode_png_from_image};
pub use layout::{
    compute_placement, compute_placement_with_policy, preview_canvas, print_canvas, JsCanvas,
    JsPlacement,
};
pub use settings::JsPrintSettings;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
