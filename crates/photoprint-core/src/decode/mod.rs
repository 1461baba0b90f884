//! Photo loading for photoprint.
//!
//! This module turns file bytes into a [`DecodedImage`], the orientation
//! normalized RGB descriptor that the layout engine and compositor consume:
//! - Decoding JPEG and PNG through the `image` crate
//! - Reading the EXIF orientation tag and baking it into the pixels
//! - Exact-size resampling for the compositor
//!
//! All operations are synchronous and run on the calling thread.

mod photo;
mod resize;
mod types;

pub use photo::{
    decode_file, decode_image, decode_image_no_orientation, get_orientation, read_header,
};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, ImageMetadata, Orientation};
