//! Photo-to-paper layout engine.
//!
//! Pure geometry: given the size of an orientation-normalized photo and a
//! target canvas, compute whether to turn the photo and where to draw it.
//! No pixels are touched here; see [`crate::compose`] for that.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the working canvas
//! - Units are whatever the canvas was given in (preview or device pixels)
//! - When the photo is rotated, the working canvas is the caller's canvas
//!   with width and height swapped

mod placement;
mod types;

pub use placement::{compute_placement, compute_placement_with_policy};
pub use types::{LayoutError, LayoutMode, OrientationPolicy, PixelRect, PlacementGeometry};
