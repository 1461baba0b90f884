//! Photo decoding with EXIF orientation normalization.
//!
//! Everything downstream of this module assumes pixels are already upright,
//! so the orientation tag is applied here and never read again.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};

use super::{DecodeError, DecodedImage, ImageMetadata, Orientation};

/// Decode a photo from bytes, applying EXIF orientation correction.
///
/// Any format enabled on the `image` crate is accepted; the result is
/// always RGB8 with orientation baked in.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized,
/// `DecodeError::CorruptedFile` if decoding fails part-way, and
/// `DecodeError::EmptyImage` for a zero-sized result.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;

    let oriented = apply_orientation(img, orientation);
    finish(oriented)
}

/// Decode a photo from bytes without applying EXIF orientation.
///
/// Use this when the caller has already normalized the orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    finish(decode_dynamic(bytes)?)
}

/// Read a photo from disk and decode it with orientation applied.
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodedImage, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| DecodeError::IoError(format!("{}: {}", path.display(), e)))?;
    decode_image(&bytes)
}

/// Read dimensions and orientation from the file header only.
pub fn read_header(bytes: &[u8]) -> Result<ImageMetadata, DecodeError> {
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?
        .into_dimensions()
        .map_err(map_image_error)?;

    Ok(ImageMetadata {
        width,
        height,
        orientation: extract_orientation(bytes),
    })
}

/// Extract EXIF orientation value from photo bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader.decode().map_err(map_image_error)
}

fn finish(img: DynamicImage) -> Result<DecodedImage, DecodeError> {
    let rgb = img.into_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    tracing::debug!(width = rgb.width(), height = rgb.height(), "decoded photo");
    Ok(DecodedImage::from_rgb_image(rgb))
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        ImageError::IoError(e) => DecodeError::CorruptedFile(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

/// Returns `Orientation::Normal` when there is no EXIF block or no
/// orientation tag in it.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    /// Encode a two-pixel-wide strip (red, green) as PNG bytes.
    fn png_strip() -> Vec<u8> {
        let img = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn strip() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap())
    }

    #[test]
    fn test_decode_png() {
        let img = decode_image(&png_strip()).unwrap();
        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(img.pixel(1, 0), Some([0, 255, 0]));
    }

    #[test]
    fn test_decode_no_orientation_matches_for_untagged_file() {
        let bytes = png_strip();
        assert_eq!(
            decode_image(&bytes).unwrap(),
            decode_image_no_orientation(&bytes).unwrap()
        );
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        match decode_image(&[0x00, 0x01, 0x02, 0x03]) {
            Err(DecodeError::InvalidFormat) => {}
            other => panic!("Expected InvalidFormat, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_strip();
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_file_missing() {
        match decode_file("/nonexistent/photo.jpg") {
            Err(DecodeError::IoError(msg)) => assert!(msg.contains("/nonexistent/photo.jpg")),
            other => panic!("Expected IoError, got: {:?}", other),
        }
    }

    #[test]
    fn test_read_header_dimensions() {
        let meta = read_header(&png_strip()).unwrap();
        assert_eq!((meta.width, meta.height), (2, 1));
        assert_eq!(meta.orientation, Orientation::Normal);
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(get_orientation(&png_strip()), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_turns_strip_upright() {
        let rgb = apply_orientation(strip(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(rgb.dimensions(), (1, 2));
        // Clockwise: the left pixel ends up on top
        assert_eq!(rgb.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_orientation_rotate270() {
        let rgb = apply_orientation(strip(), Orientation::Rotate270CW).into_rgb8();
        assert_eq!(rgb.dimensions(), (1, 2));
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 255, 0]);
    }

    #[test]
    fn test_apply_orientation_flips() {
        let rgb = apply_orientation(strip(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 255, 0]);

        let rgb = apply_orientation(strip(), Orientation::Rotate180).into_rgb8();
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_every_swapping_orientation_swaps() {
        for orientation in [
            Orientation::Transpose,
            Orientation::Rotate90CW,
            Orientation::Transverse,
            Orientation::Rotate270CW,
        ] {
            let rgb = apply_orientation(strip(), orientation).into_rgb8();
            assert_eq!(rgb.dimensions(), (1, 2), "{:?}", orientation);
            assert!(orientation.swaps_dimensions());
        }
    }
}
