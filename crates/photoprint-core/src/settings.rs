//! User preferences that shape a print job.
//!
//! Only the data model lives here. Where and when the settings are stored
//! is up to the enclosing application; the layout engine and compositor take
//! every value as an explicit argument and never read this struct themselves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::FilterType;
use crate::layout::{LayoutMode, OrientationPolicy};
use crate::paper::{PaperSize, DEFAULT_DPI, MAX_DPI};

/// Errors from parsing a setting value given as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown layout mode '{0}' (expected 'fill' or 'fit')")]
    Mode(String),

    #[error("unknown orientation policy '{0}' (expected 'rotate_image' or 'follow_image')")]
    Policy(String),

    #[error("unknown print quality '{0}' (expected 'draft', 'normal' or 'high')")]
    Quality(String),

    #[error("invalid paper size '{0}' (expected e.g. '4x6')")]
    Paper(String),

    #[error("invalid resolution '{0}' (expected 1 to {max} dots per inch)", max = MAX_DPI)]
    Dpi(String),

    #[error("unknown setting '{0}'")]
    UnknownKey(String),
}

/// Rendering quality of the print raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintQuality {
    Draft,
    Normal,
    #[default]
    High,
}

impl PrintQuality {
    /// Resampling filter used when scaling the photo onto the raster.
    pub fn filter(self) -> FilterType {
        match self {
            PrintQuality::Draft => FilterType::Nearest,
            PrintQuality::Normal => FilterType::Bilinear,
            PrintQuality::High => FilterType::Lanczos3,
        }
    }

    /// JPEG quality used when the raster is written as JPEG.
    pub fn jpeg_quality(self) -> u8 {
        match self {
            PrintQuality::Draft => 70,
            PrintQuality::Normal => 85,
            PrintQuality::High => 95,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PrintQuality::Draft => "draft",
            PrintQuality::Normal => "normal",
            PrintQuality::High => "high",
        }
    }
}

impl fmt::Display for PrintQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrintQuality {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" | "low" => Ok(PrintQuality::Draft),
            "normal" | "medium" => Ok(PrintQuality::Normal),
            "high" | "best" => Ok(PrintQuality::High),
            _ => Err(ParseError::Quality(s.to_string())),
        }
    }
}

/// Persisted print preferences.
///
/// Every field has a default so files written by older versions, or edited
/// by hand, still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Printer to submit jobs to; empty means the system default.
    pub printer_name: String,
    /// Placement mode chosen last time.
    pub last_scale_mode: LayoutMode,
    pub paper_size: PaperSize,
    pub quality: PrintQuality,
    /// Print raster resolution in dots per inch.
    pub dpi: u32,
    pub orientation_policy: OrientationPolicy,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            printer_name: String::new(),
            last_scale_mode: LayoutMode::Fill,
            paper_size: PaperSize::PHOTO_4X6,
            quality: PrintQuality::High,
            dpi: DEFAULT_DPI,
            orientation_policy: OrientationPolicy::RotateImage,
        }
    }
}

impl PrintSettings {
    /// Names accepted by [`PrintSettings::set`].
    pub const KEYS: [&'static str; 6] = ["mode", "printer", "paper", "dpi", "quality", "policy"];

    pub fn new() -> Self {
        Self::default()
    }

    /// The configured printer, or `None` for the system default.
    pub fn printer(&self) -> Option<&str> {
        let name = self.printer_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Update one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        match key.trim().to_ascii_lowercase().as_str() {
            "mode" | "last_scale_mode" => self.last_scale_mode = value.parse()?,
            "printer" | "printer_name" => self.printer_name = value.trim().to_string(),
            "paper" | "paper_size" => self.paper_size = value.parse()?,
            "quality" => self.quality = value.parse()?,
            "policy" | "orientation_policy" => self.orientation_policy = value.parse()?,
            "dpi" => {
                self.dpi = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|dpi| (1..=MAX_DPI).contains(dpi))
                    .ok_or_else(|| ParseError::Dpi(value.to_string()))?;
            }
            other => return Err(ParseError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Textual form of one setting, as accepted by [`PrintSettings::set`].
    pub fn get(&self, key: &str) -> Result<String, ParseError> {
        let value = match key.trim().to_ascii_lowercase().as_str() {
            "mode" | "last_scale_mode" => self.last_scale_mode.to_string(),
            "printer" | "printer_name" => self.printer_name.clone(),
            "paper" | "paper_size" => self.paper_size.to_string(),
            "quality" => self.quality.to_string(),
            "policy" | "orientation_policy" => self.orientation_policy.to_string(),
            "dpi" => self.dpi.to_string(),
            other => return Err(ParseError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }
}
