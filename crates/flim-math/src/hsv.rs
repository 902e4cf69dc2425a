//! HSV conversions with normalized hue (Blender convention).
//!
//! Hue, saturation and value are all expressed in [0, 1]; hue 0 is red,
//! 1/3 green, 2/3 blue. Used for building gamut-extension primaries and
//! for the hue-preserving saturation adjustment.

use crate::{Vec3, fract};

/// Converts RGB to HSV. Components of the result are `(h, s, v)`.
///
/// Achromatic inputs return hue 0 and saturation 0.
pub fn rgb_to_hsv(rgb: Vec3) -> Vec3 {
    let cmax = rgb.max_element();
    let cmin = rgb.min_element();
    let cdelta = cmax - cmin;

    let v = cmax;
    let s = if cmax != 0.0 { cdelta / cmax } else { 0.0 };

    let mut h = 0.0;
    if s != 0.0 {
        let c = (Vec3::splat(cmax) - rgb) / cdelta;
        h = if rgb.x == cmax {
            c.z - c.y
        } else if rgb.y == cmax {
            2.0 + c.x - c.z
        } else {
            4.0 + c.y - c.x
        };
        h /= 6.0;
        if h < 0.0 {
            h += 1.0;
        }
    }

    Vec3::new(h, s, v)
}

/// Converts HSV `(h, s, v)` back to RGB.
///
/// Saturation is not clamped: values above 1 push the far channels
/// negative, which the gamut extension relies on for scales below 1.
///
/// # Example
///
/// ```rust
/// use flim_math::{hsv_to_rgb, Vec3};
///
/// let red = hsv_to_rgb(Vec3::new(0.0, 1.0, 1.0));
/// assert_eq!(red, Vec3::new(1.0, 0.0, 0.0));
/// ```
pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let (mut h, s, v) = (hsv.x, hsv.y, hsv.z);

    if s == 0.0 {
        return Vec3::splat(v);
    }
    if h == 1.0 {
        h = 0.0;
    }

    h *= 6.0;
    let i = h.floor();
    let f = h - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match i as i32 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}

/// Hue/saturation/value adjustment.
///
/// `hue` is an offset where 0.5 means "unchanged", `saturation` and
/// `value` are multipliers. Saturation is clamped to [0, 1] after scaling.
///
/// # Example
///
/// ```rust
/// use flim_math::{hue_sat, Vec3};
///
/// let c = Vec3::new(0.6, 0.4, 0.2);
/// let same = hue_sat(c, 0.5, 1.0, 1.0);
/// assert!((same - c).map(f64::abs).max_element() < 1e-12);
/// ```
pub fn hue_sat(rgb: Vec3, hue: f64, saturation: f64, value: f64) -> Vec3 {
    let hsv = rgb_to_hsv(rgb);
    hsv_to_rgb(Vec3::new(
        fract(hsv.x + hue + 0.5),
        (hsv.y * saturation).clamp(0.0, 1.0),
        hsv.z * value,
    ))
}
