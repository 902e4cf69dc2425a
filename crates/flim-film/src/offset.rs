//! Uniform black/white point remap.
//!
//! Rescales a triplet so its weighted luminance is remapped from
//! `[black, 1 - white]` to `[0, 1]`. The whole triplet is multiplied by one
//! factor, so channel ratios (hue and saturation) are kept exactly.

use flim_math::{Vec3, remap_clamp};

/// Luminance below which the remap is skipped.
pub const MONO_EPSILON: f64 = 1e-4;

/// Remaps the weighted luminance of `rgb` between a black and a white
/// point given in thousandths.
///
/// Returns `rgb` unchanged when `|dot(rgb, weights)| < 1e-4` or when the
/// two points leave an empty range.
///
/// # Example
///
/// ```rust
/// use flim_film::uniform_offset;
/// use flim_math::Vec3;
///
/// let w = Vec3::splat(1.0 / 3.0);
/// let out = uniform_offset(Vec3::new(0.6, 0.3, 0.3), 100.0, 0.0, w);
/// assert!((out.x / out.y - 2.0).abs() < 1e-12);
/// ```
pub fn uniform_offset(rgb: Vec3, black_milli: f64, white_milli: f64, weights: Vec3) -> Vec3 {
    let mono = rgb.dot(weights);
    if mono.abs() < MONO_EPSILON {
        return rgb;
    }
    let black = (black_milli / 1000.0).min(0.999);
    let white = 1.0 - (white_milli / 1000.0).min(0.999);
    if black == white {
        return rgb;
    }
    rgb * (remap_clamp(mono, black, white, 0.0, 1.0) / mono)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const AVG: Vec3 = Vec3::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);

    #[test]
    fn test_near_zero_unchanged() {
        for rgb in [
            Vec3::ZERO,
            Vec3::splat(5e-5),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(2e-4, -1e-4, 0.0),
        ] {
            assert_eq!(uniform_offset(rgb, 250.0, 0.0, AVG), rgb);
        }
    }

    #[test]
    fn test_preserves_ratios() {
        let rgb = Vec3::new(0.5, 0.25, 0.125);
        let out = uniform_offset(rgb, 30.0, 0.0, AVG);
        assert_abs_diff_eq!(out.x / out.y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.y / out.z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_remaps_luminance() {
        // mono 0.5, black 0.1 -> (0.5 - 0.1) / 0.9
        let out = uniform_offset(Vec3::splat(0.5), 100.0, 0.0, AVG);
        assert_abs_diff_eq!(out.dot(AVG), 0.4 / 0.9, epsilon = 1e-12);

        // below the black point goes to zero
        let out = uniform_offset(Vec3::splat(0.05), 100.0, 0.0, AVG);
        assert_eq!(out, Vec3::ZERO);

        // white point pulls 0.9 up to 1
        let out = uniform_offset(Vec3::splat(0.9), 0.0, 100.0, AVG);
        assert_abs_diff_eq!(out.dot(AVG), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_points_are_capped() {
        // both points capped at 0.999: black 0.999, white 0.001
        for mono in [0.01, 0.5, 0.99] {
            let out = uniform_offset(Vec3::splat(mono), 5000.0, 5000.0, AVG);
            assert!(out.is_finite());
            assert!((0.0..=1.0 + 1e-12).contains(&out.dot(AVG)));
        }
    }

    #[test]
    fn test_empty_range_unchanged() {
        let rgb = Vec3::splat(0.5);
        assert_eq!(uniform_offset(rgb, 500.0, 500.0, AVG), rgb);
    }
}
