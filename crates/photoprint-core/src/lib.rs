//! Photoprint Core - photo-to-paper layout and rendering
//!
//! This crate decides how a photograph sits on a sheet of photo paper and
//! renders it there:
//! - [`layout`]: pure placement geometry (fill or fit, auto-rotation)
//! - [`compose`]: draws a photo onto a preview or print canvas
//! - [`decode`] / [`encode`]: getting pixels in and out
//! - [`paper`] / [`settings`]: paper sizes, canvases and print preferences
//!
//! The same geometry drives the on-screen preview and the printer raster, so
//! what the user sees is what comes out of the printer.

pub mod compose;
pub mod decode;
pub mod encode;
pub mod layout;
pub mod paper;
pub mod settings;

pub use compose::{composite, composite_with, ComposeError, CompositeOptions};
pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::{EncodeError, OutputFormat};
pub use layout::{
    compute_placement, compute_placement_with_policy, LayoutError, LayoutMode, OrientationPolicy,
    PlacementGeometry,
};
pub use paper::{Canvas, PaperSize};
pub use settings::{ParseError, PrintQuality, PrintSettings};
