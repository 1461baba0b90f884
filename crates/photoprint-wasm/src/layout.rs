//! Layout engine WASM bindings.
//!
//! The browser preview calls these to size its canvas and to draw the photo
//! itself with `drawImage`, using the same geometry the print raster uses.
//!
//! # Example
//!
//! ```typescript
//! import { preview_canvas, compute_placement } from '@photoprint/wasm';
//!
//! const canvas = preview_canvas(widget.clientWidth, widget.clientHeight, '4x6');
//! const p = compute_placement(photo.width, photo.height, canvas.width, canvas.height, 'fill');
//! ctx.save();
//! if (p.rotate_image_90) {
//!   ctx.translate(canvas.width, 0);
//!   ctx.rotate(Math.PI / 2);
//! }
//! ctx.drawImage(bitmap, p.x_offset, p.y_offset, p.scaled_width, p.scaled_height);
//! ctx.restore();
//! ```

use crate::types::{parse_mode, parse_paper, parse_policy, to_js_error};
use photoprint_core::layout::{self, PlacementGeometry};
use photoprint_core::paper::Canvas;
use wasm_bindgen::prelude::*;

/// Placement of a photo on a canvas, in working-canvas coordinates.
///
/// When `rotate_image_90` is set the working canvas is the target canvas
/// with width and height exchanged.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsPlacement {
    inner: PlacementGeometry,
}

#[wasm_bindgen]
impl JsPlacement {
    #[wasm_bindgen(getter)]
    pub fn rotate_image_90(&self) -> bool {
        self.inner.rotate_image_90
    }

    #[wasm_bindgen(getter)]
    pub fn scaled_width(&self) -> f64 {
        self.inner.scaled_width
    }

    #[wasm_bindgen(getter)]
    pub fn scaled_height(&self) -> f64 {
        self.inner.scaled_height
    }

    #[wasm_bindgen(getter)]
    pub fn x_offset(&self) -> f64 {
        self.inner.x_offset
    }

    #[wasm_bindgen(getter)]
    pub fn y_offset(&self) -> f64 {
        self.inner.y_offset
    }

    #[wasm_bindgen(getter)]
    pub fn working_width(&self) -> f64 {
        self.inner.working_width
    }

    #[wasm_bindgen(getter)]
    pub fn working_height(&self) -> f64 {
        self.inner.working_height
    }

    /// True when part of the photo falls outside the canvas (fill mode).
    #[wasm_bindgen(getter)]
    pub fn crops(&self) -> bool {
        self.inner.crops()
    }

    /// True when paper shows around the photo (fit mode).
    #[wasm_bindgen(getter)]
    pub fn has_border(&self) -> bool {
        self.inner.has_border()
    }
}

/// Canvas size in pixels.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCanvas {
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsCanvas {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl From<Canvas> for JsCanvas {
    fn from(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
        }
    }
}

fn placement(
    image_width: f64,
    image_height: f64,
    canvas_width: f64,
    canvas_height: f64,
    mode: &str,
    policy: &str,
) -> Result<JsPlacement, String> {
    let inner = layout::compute_placement_with_policy(
        image_width,
        image_height,
        canvas_width,
        canvas_height,
        parse_mode(mode)?,
        parse_policy(policy)?,
    )
    .map_err(|e| e.to_string())?;
    Ok(JsPlacement { inner })
}

/// Compute where a photo goes on a canvas.
///
/// # Arguments
///
/// * `mode` - `"fill"` (cover the canvas, cropping overflow) or `"fit"`
///   (whole photo visible, white borders)
///
/// # Errors
///
/// Returns an error for an unknown mode or a non-positive dimension.
#[wasm_bindgen]
pub fn compute_placement(
    image_width: f64,
    image_height: f64,
    canvas_width: f64,
    canvas_height: f64,
    mode: &str,
) -> Result<JsPlacement, JsValue> {
    placement(image_width, image_height, canvas_width, canvas_height, mode, "")
        .map_err(to_js_error)
}

/// Like [`compute_placement`], with `policy` either `"rotate_image"` or
/// `"follow_image"`.
#[wasm_bindgen]
pub fn compute_placement_with_policy(
    image_width: f64,
    image_height: f64,
    canvas_width: f64,
    canvas_height: f64,
    mode: &str,
    policy: &str,
) -> Result<JsPlacement, JsValue> {
    placement(image_width, image_height, canvas_width, canvas_height, mode, policy)
        .map_err(to_js_error)
}

fn preview(available_width: u32, available_height: u32, paper: &str) -> Result<JsCanvas, String> {
    Canvas::for_preview(available_width, available_height, parse_paper(paper)?)
        .map(JsCanvas::from)
        .map_err(|e| e.to_string())
}

fn print(paper: &str, dpi: u32) -> Result<JsCanvas, String> {
    Canvas::for_print(parse_paper(paper)?, dpi)
        .map(JsCanvas::from)
        .map_err(|e| e.to_string())
}

/// Largest paper-shaped canvas that fits a preview widget of the given size.
/// An empty `paper` means 4x6.
#[wasm_bindgen]
pub fn preview_canvas(
    available_width: u32,
    available_height: u32,
    paper: &str,
) -> Result<JsCanvas, JsValue> {
    preview(available_width, available_height, paper).map_err(to_js_error)
}

/// Device-pixel canvas of the print raster (4x6 at 300 DPI is 1200x1800).
#[wasm_bindgen]
pub fn print_canvas(paper: &str, dpi: u32) -> Result<JsCanvas, JsValue> {
    print(paper, dpi).map_err(to_js_error)
}
