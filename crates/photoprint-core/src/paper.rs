//! Paper sizes and the canvases derived from them.
//!
//! A session has two canvases for the same sheet: the on-screen preview,
//! sized from whatever room the preview widget has, and the print raster,
//! sized from the physical paper at the printer's resolution. Both keep the
//! paper's aspect ratio so the layout engine makes the same decision for
//! each.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutError;
use crate::settings::ParseError;

/// Print resolution used when none is configured.
pub const DEFAULT_DPI: u32 = 300;

/// Highest accepted print resolution. A 4x6" sheet is already 9600x14400 here.
pub const MAX_DPI: u32 = 2400;

/// Pixels taken off each axis of the preview widget for its frame.
pub const PREVIEW_INSET_PX: u32 = 20;

/// Smallest preview widget the application lays out.
pub const MIN_PREVIEW_WIDTH: u32 = 600;
pub const MIN_PREVIEW_HEIGHT: u32 = 400;

const MM_PER_INCH: f64 = 25.4;

/// Physical paper size in inches, always stored portrait.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaperSize {
    width_in: f64,
    height_in: f64,
}

impl PaperSize {
    /// 4x6" glossy photo stock.
    pub const PHOTO_4X6: PaperSize = PaperSize {
        width_in: 4.0,
        height_in: 6.0,
    };

    /// Create a paper size; the shorter side becomes the width.
    pub fn new(width_in: f64, height_in: f64) -> Result<Self, ParseError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(valid(width_in) && valid(height_in)) {
            return Err(ParseError::Paper(format!("{width_in}x{height_in}")));
        }
        Ok(Self {
            width_in: width_in.min(height_in),
            height_in: width_in.max(height_in),
        })
    }

    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    pub fn width_mm(&self) -> f64 {
        self.width_in * MM_PER_INCH
    }

    pub fn height_mm(&self) -> f64 {
        self.height_in * MM_PER_INCH
    }

    /// Width over height of the portrait sheet (2/3 for 4x6).
    pub fn aspect_ratio(&self) -> f64 {
        self.width_in / self.height_in
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        Self::PHOTO_4X6
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width_in, self.height_in)
    }
}

impl FromStr for PaperSize {
    type Err = ParseError;

    /// Accepts `4x6`, `4X6`, `4×6` and an optional `in` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let body = lower.strip_suffix("in").unwrap_or(&lower).trim();
        let (w, h) = body
            .split_once('x')
            .or_else(|| body.split_once('×'))
            .ok_or_else(|| ParseError::Paper(s.to_string()))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ParseError::Paper(s.to_string()))
        };
        Self::new(parse(w)?, parse(h)?).map_err(|_| ParseError::Paper(s.to_string()))
    }
}

impl TryFrom<String> for PaperSize {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaperSize> for String {
    fn from(value: PaperSize) -> Self {
        value.to_string()
    }
}

/// A target rectangle in pixels, either on screen or on the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Create a canvas; both sides must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self, LayoutError> {
        LayoutError::check("canvas", width as f64, height as f64)?;
        Ok(Self { width, height })
    }

    /// The print raster: physical paper size times device resolution,
    /// always portrait.
    ///
    /// 4x6" at 300 DPI is 1200x1800 device pixels.
    pub fn for_print(paper: PaperSize, dpi: u32) -> Result<Self, LayoutError> {
        if dpi > MAX_DPI {
            return Err(LayoutError::ResolutionOutOfRange { dpi, max: MAX_DPI });
        }
        let width = (paper.width_in() * dpi as f64).round() as u32;
        let height = (paper.height_in() * dpi as f64).round() as u32;
        Self::new(width, height)
    }

    /// The largest canvas with the paper's aspect ratio that fits a preview
    /// widget of the given size, after the widget's frame inset.
    pub fn for_preview(
        available_width: u32,
        available_height: u32,
        paper: PaperSize,
    ) -> Result<Self, LayoutError> {
        let width = available_width.saturating_sub(PREVIEW_INSET_PX);
        let height = available_height.saturating_sub(PREVIEW_INSET_PX);
        LayoutError::check("canvas", width as f64, height as f64)?;

        let aspect = paper.aspect_ratio();
        let (w, h) = if (width as f64) / aspect < height as f64 {
            (width, (width as f64 / aspect) as u32)
        } else {
            ((height as f64 * aspect) as u32, height)
        };
        Self::new(w, h)
    }

    /// This canvas turned to landscape or portrait.
    pub fn oriented(self, landscape: bool) -> Self {
        if self.is_landscape() == landscape {
            self
        } else {
            self.swapped()
        }
    }

    /// Width and height exchanged.
    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}
