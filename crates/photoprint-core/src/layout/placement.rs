//! Scale, offset and rotation for putting a photo on a sheet of paper.
//!
//! The engine first decides whether the photo has to be turned to line up
//! with the paper, then reasons in that *working* frame where photo and
//! canvas share a rough orientation:
//!
//! ```text
//! image aspect  > working aspect   (photo relatively wider)
//!   Fill: match heights, crop left/right     Fit: match widths, border top/bottom
//! image aspect <= working aspect   (photo relatively taller)
//!   Fill: match widths, crop top/bottom      Fit: match heights, border left/right
//! ```
//!
//! Only aspect ratios pick the branch, so the same photo gets the same crop
//! or border on a 400 px preview and a 1800 px print raster.

use super::{LayoutError, LayoutMode, OrientationPolicy, PlacementGeometry};

/// Compute the placement of a photo on a canvas with the default
/// always-portrait paper policy.
///
/// Landscape photos (`image_width > image_height`) are rotated by 90° and
/// placed on the canvas turned on its side.
///
/// # Errors
///
/// Returns `LayoutError::InvalidDimensions` if any size is not a positive,
/// finite number.
pub fn compute_placement(
    image_width: f64,
    image_height: f64,
    canvas_width: f64,
    canvas_height: f64,
    mode: LayoutMode,
) -> Result<PlacementGeometry, LayoutError> {
    compute_placement_with_policy(
        image_width,
        image_height,
        canvas_width,
        canvas_height,
        mode,
        OrientationPolicy::RotateImage,
    )
}

/// Compute the placement of a photo on a canvas under an explicit
/// orientation policy.
///
/// With [`OrientationPolicy::FollowImage`] the photo is never rotated;
/// instead the working canvas is the given canvas turned to match the
/// photo's orientation, and the caller is expected to print on a sheet
/// turned the same way.
pub fn compute_placement_with_policy(
    image_width: f64,
    image_height: f64,
    canvas_width: f64,
    canvas_height: f64,
    mode: LayoutMode,
    policy: OrientationPolicy,
) -> Result<PlacementGeometry, LayoutError> {
    LayoutError::check("image", image_width, image_height)?;
    LayoutError::check("canvas", canvas_width, canvas_height)?;

    let image_landscape = image_width > image_height;
    let (rotate, swap) = match policy {
        OrientationPolicy::RotateImage => (image_landscape, image_landscape),
        OrientationPolicy::FollowImage => {
            let canvas_landscape = canvas_width > canvas_height;
            (false, image_landscape != canvas_landscape)
        }
    };

    let (working_width, working_height) = if swap {
        (canvas_height, canvas_width)
    } else {
        (canvas_width, canvas_height)
    };

    let image_aspect = image_width / image_height;
    let working_aspect = working_width / working_height;
    let wider = image_aspect > working_aspect;

    // Multiply before dividing so integral inputs stay exact where possible.
    let match_height = || {
        let scaled_width = image_width * working_height / image_height;
        (scaled_width, working_height)
    };
    let match_width = || {
        let scaled_height = image_height * working_width / image_width;
        (working_width, scaled_height)
    };

    let (scaled_width, scaled_height) = match (mode, wider) {
        (LayoutMode::Fill, true) | (LayoutMode::Fit, false) => match_height(),
        (LayoutMode::Fill, false) | (LayoutMode::Fit, true) => match_width(),
    };

    let geometry = PlacementGeometry {
        rotate_image_90: rotate,
        scaled_width,
        scaled_height,
        x_offset: (working_width - scaled_width) / 2.0,
        y_offset: (working_height - scaled_height) / 2.0,
        working_width,
        working_height,
    };

    tracing::debug!(
        ?mode,
        ?policy,
        rotate,
        image_aspect,
        working_aspect,
        scaled_width,
        scaled_height,
        x_offset = geometry.x_offset,
        y_offset = geometry.y_offset,
        "computed placement"
    );

    Ok(geometry)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const REL_EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        close_at(a, b, 1.0)
    }

    /// Like `close`, but measured against a magnitude the values were derived from.
    fn close_at(a: f64, b: f64, magnitude: f64) -> bool {
        (a - b).abs() <= REL_EPS * a.abs().max(b.abs()).max(magnitude).max(1.0)
    }

    fn image_strategy() -> impl Strategy<Value = (f64, f64)> {
        (1u32..=12000, 1u32..=12000).prop_map(|(w, h)| (w as f64, h as f64))
    }

    fn canvas_strategy() -> impl Strategy<Value = (f64, f64)> {
        (1.0f64..=6000.0, 1.0f64..=6000.0)
    }

    fn mode_strategy() -> impl Strategy<Value = LayoutMode> {
        prop_oneof![Just(LayoutMode::Fill), Just(LayoutMode::Fit)]
    }

    fn policy_strategy() -> impl Strategy<Value = OrientationPolicy> {
        prop_oneof![
            Just(OrientationPolicy::RotateImage),
            Just(OrientationPolicy::FollowImage)
        ]
    }

    proptest! {
        /// Property: The drawn photo keeps the source aspect ratio.
        #[test]
        fn prop_aspect_ratio_preserved(
            (iw, ih) in image_strategy(),
            (cw, ch) in canvas_strategy(),
            mode in mode_strategy(),
            policy in policy_strategy(),
        ) {
            let g = compute_placement_with_policy(iw, ih, cw, ch, mode, policy).unwrap();
            let ratio = g.scaled_width / g.scaled_height;
            prop_assert!(close(ratio, iw / ih), "ratio {} vs {}", ratio, iw / ih);
        }

        /// Property: Fill never leaves uncovered canvas.
        #[test]
        fn prop_fill_covers_canvas(
            (iw, ih) in image_strategy(),
            (cw, ch) in canvas_strategy(),
        ) {
            let g = compute_placement(iw, ih, cw, ch, LayoutMode::Fill).unwrap();
            prop_assert!(g.scaled_width >= g.working_width * (1.0 - REL_EPS));
            prop_assert!(g.scaled_height >= g.working_height * (1.0 - REL_EPS));
            prop_assert!(g.x_offset <= REL_EPS * cw && g.y_offset <= REL_EPS * ch);
        }

        /// Property: Fit never overflows the canvas.
        #[test]
        fn prop_fit_stays_inside(
            (iw, ih) in image_strategy(),
            (cw, ch) in canvas_strategy(),
        ) {
            let g = compute_placement(iw, ih, cw, ch, LayoutMode::Fit).unwrap();
            prop_assert!(g.scaled_width <= g.working_width * (1.0 + REL_EPS));
            prop_assert!(g.scaled_height <= g.working_height * (1.0 + REL_EPS));
            prop_assert!(g.x_offset >= -REL_EPS * cw && g.y_offset >= -REL_EPS * ch);
        }

        /// Property: One axis always matches the working canvas exactly.
        #[test]
        fn prop_one_axis_matches(
            (iw, ih) in image_strategy(),
            (cw, ch) in canvas_strategy(),
            mode in mode_strategy(),
        ) {
            let g = compute_placement(iw, ih, cw, ch, mode).unwrap();
            prop_assert!(
                g.scaled_width == g.working_width || g.scaled_height == g.working_height
            );
        }

        /// Property: The photo is centered on both axes.
        #[test]
        fn prop_centered(
            (iw, ih) in image_strategy(),
            (cw, ch) in canvas_strategy(),
            mode in mode_strategy(),
        ) {
            let g = compute_placement(iw, ih, cw, ch, mode).unwrap();
            prop_assert!(close_at(
                g.x_offset * 2.0 + g.scaled_width,
                g.working_width,
                g.scaled_width,
            ));
            prop_assert!(close_at(
                g.y_offset * 2.0 + g.scaled_height,
                g.working_height,
                g.scaled_height,
            ));
        }

        /// Property: Rotation depends only on the photo's orientation.
        #[test]
        fn prop_rotation_follows_landscape(
            (iw, ih) in image_strategy(),
            (cw, ch) in canvas_strategy(),
            mode in mode_strategy(),
        ) {
            let g = compute_placement(iw, ih, cw, ch, mode).unwrap();
            prop_assert_eq!(g.rotate_image_90, iw > ih);
            if g.rotate_image_90 {
                prop_assert_eq!((g.working_width, g.working_height), (ch, cw));
            } else {
                prop_assert_eq!((g.working_width, g.working_height), (cw, ch));
            }
        }

        /// Property: FollowImage never rotates and orients the canvas like the photo.
        #[test]
        fn prop_follow_image_orients_canvas(
            (iw, ih) in image_strategy(),
            (cw, ch) in canvas_strategy(),
            mode in mode_strategy(),
        ) {
            let g = compute_placement_with_policy(
                iw, ih, cw, ch, mode, OrientationPolicy::FollowImage,
            ).unwrap();
            prop_assert!(!g.rotate_image_90);
            if iw > ih {
                prop_assert!(g.working_width >= g.working_height);
            } else {
                prop_assert!(g.working_width <= g.working_height);
            }
        }

        /// Property: Scaling the canvas scales the geometry and nothing else.
        #[test]
        fn prop_resolution_independent(
            (iw, ih) in image_strategy(),
            (cw, ch) in (10.0f64..=3000.0, 10.0f64..=3000.0),
            mode in mode_strategy(),
            k in prop_oneof![Just(0.1f64), Just(1.0f64), Just(10.0f64)],
        ) {
            let base = compute_placement(iw, ih, cw, ch, mode).unwrap();
            let big = compute_placement(iw, ih, k * cw, k * ch, mode).unwrap();
            let expected = base.scaled_by(k);

            prop_assert_eq!(big.rotate_image_90, expected.rotate_image_90);
            prop_assert!(close(big.scaled_width, expected.scaled_width));
            prop_assert!(close(big.scaled_height, expected.scaled_height));
            prop_assert!(close_at(big.x_offset, expected.x_offset, big.scaled_width));
            prop_assert!(close_at(big.y_offset, expected.y_offset, big.scaled_height));
        }

        /// Property: Non-positive sizes are always rejected.
        #[test]
        fn prop_non_positive_rejected(
            bad in -1000.0f64..=0.0,
            slot in 0usize..4,
            mode in mode_strategy(),
        ) {
            let mut dims = [640.0, 480.0, 1200.0, 1800.0];
            dims[slot] = bad;
            let result = compute_placement(dims[0], dims[1], dims[2], dims[3], mode);
            prop_assert!(result.is_err());
        }
    }
}
