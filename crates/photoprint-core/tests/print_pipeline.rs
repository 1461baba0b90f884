//! End-to-end checks: file bytes in, print and preview rasters out.

use photoprint_core::compose::{render_preview, render_print, CompositeOptions, PAPER_WHITE};
use photoprint_core::decode::{decode_image, read_header};
use photoprint_core::encode::{encode, encode_png, OutputFormat};
use photoprint_core::{
    composite_with, compute_placement, Canvas, DecodedImage, FilterType, LayoutMode, PaperSize,
    PrintQuality, PrintSettings,
};

const GREEN: [u8; 3] = [20, 180, 40];
const ORANGE: [u8; 3] = [240, 140, 0];

/// A landscape photo as PNG bytes: green top half, orange bottom half.
fn landscape_png(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for _ in 0..width {
            pixels.extend_from_slice(if y < height / 2 { &GREEN } else { &ORANGE });
        }
    }
    encode_png(&pixels, width, height).unwrap()
}

fn draft_settings(dpi: u32) -> PrintSettings {
    PrintSettings {
        dpi,
        quality: PrintQuality::Draft,
        ..PrintSettings::default()
    }
}

#[test]
fn landscape_photo_prints_rotated_on_portrait_paper() {
    let bytes = landscape_png(300, 200);
    let meta = read_header(&bytes).unwrap();
    assert_eq!((meta.width, meta.height), (300, 200));

    let photo = decode_image(&bytes).unwrap();
    let raster = render_print(&photo, &draft_settings(50), LayoutMode::Fit).unwrap();

    assert_eq!((raster.width, raster.height), (200, 300));
    // Photo's top (green) is turned to the right-hand side of the sheet
    assert_eq!(raster.pixel(170, 150), Some(GREEN));
    assert_eq!(raster.pixel(30, 150), Some(ORANGE));
}

#[test]
fn fill_leaves_no_paper_showing() {
    let photo = decode_image(&landscape_png(640, 480)).unwrap();
    let raster = render_print(&photo, &draft_settings(40), LayoutMode::Fill).unwrap();
    assert_eq!((raster.width, raster.height), (160, 240));
    assert!(raster.pixels.chunks(3).all(|p| p != PAPER_WHITE));
}

#[test]
fn fit_borders_are_white_and_symmetric() {
    // 4:3 rotated onto 2:3 paper with fit: borders on the long edges
    let photo = decode_image(&landscape_png(400, 300)).unwrap();
    let canvas = Canvas::new(120, 180).unwrap();
    let options = CompositeOptions {
        filter: FilterType::Nearest,
        ..CompositeOptions::new(LayoutMode::Fit)
    };
    let raster = composite_with(&photo, canvas, &options).unwrap();

    let geometry = compute_placement(400.0, 300.0, 120.0, 180.0, LayoutMode::Fit).unwrap();
    assert!(geometry.rotate_image_90);
    assert!(geometry.has_border());
    // Working frame is 180x120; photo is 160x120, so 10px each side before rotating
    assert_eq!(geometry.x_offset, 10.0);

    for y in [0, 5, 9, 170, 179] {
        assert_eq!(raster.pixel(60, y), Some(PAPER_WHITE), "row {y}");
    }
    assert_ne!(raster.pixel(60, 90), Some(PAPER_WHITE));
}

#[test]
fn preview_matches_print_at_any_resolution() {
    let photo = decode_image(&landscape_png(300, 200)).unwrap();
    let options = CompositeOptions {
        filter: FilterType::Nearest,
        ..CompositeOptions::new(LayoutMode::Fill)
    };

    let preview = render_preview(&photo, 600, 400, PaperSize::PHOTO_4X6, &options).unwrap();
    let print = render_print(&photo, &draft_settings(100), LayoutMode::Fill).unwrap();
    assert_eq!((print.width, print.height), (400, 600));

    for (fx, fy) in [(0.1, 0.5), (0.9, 0.5), (0.3, 0.1), (0.7, 0.9)] {
        let sample = |img: &DecodedImage| {
            img.pixel((fx * img.width as f64) as u32, (fy * img.height as f64) as u32)
        };
        assert_eq!(sample(&preview), sample(&print), "at ({fx}, {fy})");
    }
}

#[test]
fn rendered_raster_encodes_for_the_printer() {
    let photo = decode_image(&landscape_png(90, 60)).unwrap();
    let raster = render_print(&photo, &draft_settings(20), LayoutMode::Fill).unwrap();

    let format = OutputFormat::from_path("job.png").unwrap();
    let png = encode(&raster, format, 95).unwrap();
    let reloaded = decode_image(&png).unwrap();
    assert_eq!(reloaded, raster);
}
