//! Types shared by the layout engine and its callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::ParseError;

/// Errors raised by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    /// An image or canvas size was zero, negative or not finite.
    #[error("Invalid {subject} dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Which rectangle was rejected, `"image"` or `"canvas"`.
        subject: &'static str,
        width: f64,
        height: f64,
    },

    /// A print resolution above [`MAX_DPI`](crate::paper::MAX_DPI).
    #[error("Print resolution {dpi} DPI exceeds the maximum of {max}")]
    ResolutionOutOfRange { dpi: u32, max: u32 },
}

impl LayoutError {
    pub(crate) fn check(subject: &'static str, width: f64, height: f64) -> Result<(), Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidDimensions {
                subject,
                width,
                height,
            })
        }
    }
}

/// How a photo is placed on the paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Cover the whole canvas, cropping the overflow equally on both sides.
    #[default]
    Fill,
    /// Keep the whole photo visible, leaving a symmetric white border.
    Fit,
}

impl LayoutMode {
    /// Lowercase name used in settings files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutMode::Fill => "fill",
            LayoutMode::Fit => "fit",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fill" | "crop" => Ok(LayoutMode::Fill),
            "fit" | "border" => Ok(LayoutMode::Fit),
            _ => Err(ParseError::Mode(s.to_string())),
        }
    }
}

/// How the paper orientation relates to the photo orientation.
///
/// Photo paper feeds portrait. `RotateImage` keeps the sheet portrait and
/// turns landscape photos by 90° on it. `FollowImage` instead turns the sheet
/// with the photo, which only works with printers that rotate the job
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationPolicy {
    /// Always-portrait canvas, landscape photos rotated into it.
    #[default]
    RotateImage,
    /// Canvas re-oriented to match the photo, no in-canvas rotation.
    FollowImage,
}

impl OrientationPolicy {
    /// Name used in settings files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            OrientationPolicy::RotateImage => "rotate_image",
            OrientationPolicy::FollowImage => "follow_image",
        }
    }
}

impl fmt::Display for OrientationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrientationPolicy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "rotate_image" | "rotate" | "portrait" => Ok(OrientationPolicy::RotateImage),
            "follow_image" | "follow" => Ok(OrientationPolicy::FollowImage),
            _ => Err(ParseError::Policy(s.to_string())),
        }
    }
}

/// Where and how large to draw a photo on a canvas.
///
/// All lengths are in the units of the canvas passed to the engine and are
/// expressed in the *working* frame: when `rotate_image_90` is set that frame
/// is the canvas turned on its side (width and height swapped). Offsets are
/// negative on the axis that gets cropped in fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementGeometry {
    /// Draw the photo turned by 90° so its long edge runs along the paper's.
    pub rotate_image_90: bool,
    /// Width of the drawn photo.
    pub scaled_width: f64,
    /// Height of the drawn photo.
    pub scaled_height: f64,
    /// Left edge of the drawn photo relative to the working canvas.
    pub x_offset: f64,
    /// Top edge of the drawn photo relative to the working canvas.
    pub y_offset: f64,
    /// Working canvas width the geometry refers to.
    pub working_width: f64,
    /// Working canvas height the geometry refers to.
    pub working_height: f64,
}

impl PlacementGeometry {
    /// The same placement on a canvas `k` times larger.
    pub fn scaled_by(&self, k: f64) -> Self {
        Self {
            rotate_image_90: self.rotate_image_90,
            scaled_width: self.scaled_width * k,
            scaled_height: self.scaled_height * k,
            x_offset: self.x_offset * k,
            y_offset: self.y_offset * k,
            working_width: self.working_width * k,
            working_height: self.working_height * k,
        }
    }

    /// Factor between source photo pixels and canvas units.
    ///
    /// The photo is never rotated inside the working frame, so its width maps
    /// onto `scaled_width` directly.
    pub fn scale_factor(&self, image_width: f64) -> f64 {
        self.scaled_width / image_width
    }

    /// True when part of the photo falls outside the working canvas.
    pub fn crops(&self) -> bool {
        self.x_offset < 0.0 || self.y_offset < 0.0
    }

    /// True when part of the working canvas stays uncovered.
    pub fn has_border(&self) -> bool {
        self.x_offset > 0.0 || self.y_offset > 0.0
    }

    /// Round to whole pixels for drawing into a raster.
    ///
    /// Size never rounds below one pixel.
    pub fn pixel_rect(&self) -> PixelRect {
        PixelRect {
            x: self.x_offset.round() as i64,
            y: self.y_offset.round() as i64,
            width: (self.scaled_width.round() as u32).max(1),
            height: (self.scaled_height.round() as u32).max(1),
        }
    }
}

/// Integer placement rectangle inside a raster working canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}
