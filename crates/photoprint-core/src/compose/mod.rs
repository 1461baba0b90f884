//! Rendering a photo onto a canvas using the layout engine's geometry.
//!
//! The compositor works in the engine's working frame: it allocates a white
//! buffer the size of the working canvas, crops the source to the part that
//! lands inside the buffer, resamples only that part and draws it at the
//! clipped offset. If the photo had to be turned it rotates the finished
//! buffer 90° clockwise once.
//! The result therefore always has the caller's canvas dimensions, with the
//! photo's top edge along the right-hand side of the sheet when rotated.
//!
//! # Example
//!
//! ```ignore
//! use photoprint_core::compose::composite;
//! use photoprint_core::layout::LayoutMode;
//! use photoprint_core::paper::{Canvas, PaperSize};
//!
//! let canvas = Canvas::for_print(PaperSize::PHOTO_4X6, 300)?;
//! let raster = composite(&photo, canvas, LayoutMode::Fill)?;
//! assert_eq!((raster.width, raster.height), (1200, 1800));
//! ```

use image::{imageops, ImageBuffer, Rgb, RgbImage};
use thiserror::Error;

use crate::decode::{resize, DecodeError, DecodedImage, FilterType};
use crate::layout::{compute_placement_with_policy, LayoutError, LayoutMode, OrientationPolicy};
use crate::paper::{Canvas, PaperSize};
use crate::settings::PrintSettings;

/// Paper color behind the photo.
pub const PAPER_WHITE: [u8; 3] = [255, 255, 255];

/// Errors that can occur while compositing.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("failed to resample photo: {0}")]
    Resample(#[from] DecodeError),
}

/// Everything besides the photo and canvas that affects the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompositeOptions {
    pub mode: LayoutMode,
    pub policy: OrientationPolicy,
    pub filter: FilterType,
}

impl CompositeOptions {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Options for the print raster described by persisted settings.
    pub fn from_settings(settings: &PrintSettings, mode: LayoutMode) -> Self {
        Self {
            mode,
            policy: settings.orientation_policy,
            filter: settings.quality.filter(),
        }
    }
}

/// Composite a photo onto a canvas with the always-portrait policy and
/// bilinear resampling.
pub fn composite(
    image: &DecodedImage,
    canvas: Canvas,
    mode: LayoutMode,
) -> Result<DecodedImage, ComposeError> {
    composite_with(image, canvas, &CompositeOptions::new(mode))
}

/// Composite a photo onto a canvas.
///
/// The output is fully opaque and, under [`OrientationPolicy::RotateImage`],
/// exactly `canvas.width x canvas.height`. Under
/// [`OrientationPolicy::FollowImage`] it has the canvas turned to the photo's
/// orientation instead, see [`output_canvas`].
///
/// # Errors
///
/// Returns `ComposeError::Layout` for a zero-sized photo or canvas.
pub fn composite_with(
    image: &DecodedImage,
    canvas: Canvas,
    options: &CompositeOptions,
) -> Result<DecodedImage, ComposeError> {
    let geometry = compute_placement_with_policy(
        image.width as f64,
        image.height as f64,
        canvas.width as f64,
        canvas.height as f64,
        options.mode,
        options.policy,
    )?;

    // Working sizes are whole canvas sides, possibly swapped.
    let working_width = geometry.working_width as u32;
    let working_height = geometry.working_height as u32;
    let rect = geometry.pixel_rect();

    tracing::trace!(
        working_width,
        working_height,
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        "compositing photo"
    );

    let mut buffer = RgbImage::from_pixel(working_width, working_height, Rgb(PAPER_WHITE));

    let visible = clip_axis(rect.x, rect.width, working_width, image.width)
        .zip(clip_axis(rect.y, rect.height, working_height, image.height));
    if let Some((columns, rows)) = visible {
        let source =
            ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(image.width, image.height, image.pixels.clone())
                .ok_or_else(|| {
                    DecodeError::CorruptedFile("pixel buffer size mismatch".to_string())
                })?;
        let region = imageops::crop_imm(
            &source,
            columns.src_start,
            rows.src_start,
            columns.src_len,
            rows.src_len,
        )
        .to_image();
        let region = DecodedImage::from_rgb_image(region);

        let scaled = resize(&region, columns.dest_len, rows.dest_len, options.filter)?;
        let scaled = RgbImage::from_raw(scaled.width, scaled.height, scaled.pixels).ok_or_else(
            || DecodeError::CorruptedFile("resampled buffer size mismatch".to_string()),
        )?;
        imageops::replace(
            &mut buffer,
            &scaled,
            i64::from(columns.dest_start),
            i64::from(rows.dest_start),
        );
    }

    if geometry.rotate_image_90 {
        buffer = imageops::rotate90(&buffer);
    }

    Ok(DecodedImage::from_rgb_image(buffer))
}

/// One axis of the placed photo after clipping it to the working buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisClip {
    dest_start: u32,
    dest_len: u32,
    src_start: u32,
    src_len: u32,
}

/// Clip a photo placed at `offset` with scaled length `scaled` to `[0, extent)`
/// and find the source span (of `source` pixels) that covers what is left.
/// `None` when the photo does not reach the buffer on this axis.
fn clip_axis(offset: i64, scaled: u32, extent: u32, source: u32) -> Option<AxisClip> {
    let start = offset.max(0);
    let end = (offset + i64::from(scaled)).min(i64::from(extent));
    if end <= start || scaled == 0 || source == 0 {
        return None;
    }

    let per_dest = f64::from(source) / f64::from(scaled);
    let src_start = (((start - offset) as f64) * per_dest).floor() as u32;
    let src_start = src_start.min(source - 1);
    let src_end = ((((end - offset) as f64) * per_dest).ceil() as u32).clamp(src_start + 1, source);

    Some(AxisClip {
        dest_start: start as u32,
        dest_len: (end - start) as u32,
        src_start,
        src_len: src_end - src_start,
    })
}

/// Dimensions of the raster [`composite_with`] produces for this photo.
pub fn output_canvas(image: &DecodedImage, canvas: Canvas, policy: OrientationPolicy) -> Canvas {
    match policy {
        OrientationPolicy::RotateImage => canvas,
        OrientationPolicy::FollowImage => canvas.oriented(image.is_landscape()),
    }
}

/// Render the on-screen preview for a preview widget of the given size.
pub fn render_preview(
    image: &DecodedImage,
    available_width: u32,
    available_height: u32,
    paper: PaperSize,
    options: &CompositeOptions,
) -> Result<DecodedImage, ComposeError> {
    let canvas = Canvas::for_preview(available_width, available_height, paper)?;
    composite_with(image, canvas, options)
}

/// Render the full-resolution print raster for the configured paper.
pub fn render_print(
    image: &DecodedImage,
    settings: &PrintSettings,
    mode: LayoutMode,
) -> Result<DecodedImage, ComposeError> {
    let canvas = Canvas::for_print(settings.paper_size, settings.dpi)?;
    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        dpi = settings.dpi,
        paper = %settings.paper_size,
        "rendering print raster"
    );
    composite_with(image, canvas, &CompositeOptions::from_settings(settings, mode))
}
