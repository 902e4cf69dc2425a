//! Scalar interpolation and range utilities.
//!
//! - Linear interpolation ([`lerp`], [`inverse_lerp`])
//! - Range remapping ([`remap`], [`remap_clamp`])
//! - Clamping and wrapping ([`saturate`], [`wrap`], [`fract`])
//!
//! # Usage
//!
//! ```rust
//! use flim_math::{lerp, remap_clamp};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(remap_clamp(2.0, 0.0, 1.0, 0.0, 1.0), 1.0);
//! ```

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
/// For values outside [0, 1], the result is extrapolated.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse linear interpolation.
///
/// Given a value between `a` and `b`, returns the corresponding `t` value.
/// A zero-width range yields 0.
///
/// # Example
///
/// ```rust
/// use flim_math::inverse_lerp;
///
/// assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
/// assert_eq!(inverse_lerp(3.0, 3.0, 5.0), 0.0);
/// ```
#[inline]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() < 1e-15 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Remaps a value from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// # Example
///
/// ```rust
/// use flim_math::remap;
///
/// assert_eq!(remap(0.5, 0.0, 1.0, -10.0, 10.0), 0.0);
/// ```
#[inline]
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (out_max - out_min) * inverse_lerp(in_min, in_max, value)
}

/// Remaps a value and clamps the result to `[out_min, out_max]`.
///
/// The output range may be given in either orientation.
///
/// # Example
///
/// ```rust
/// use flim_math::remap_clamp;
///
/// assert_eq!(remap_clamp(0.75, 0.5, 1.0, 0.0, 1.0), 0.5);
/// assert_eq!(remap_clamp(0.25, 0.5, 1.0, 0.0, 1.0), 0.0);
/// assert_eq!(remap_clamp(0.75, 0.5, 1.0, 1.0, 0.0), 0.5);
/// ```
#[inline]
pub fn remap_clamp(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let v = remap(value, in_min, in_max, out_min, out_max);
    v.clamp(out_min.min(out_max), out_min.max(out_max))
}

/// Clamps a value to [0, 1].
#[inline]
pub fn saturate(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Wraps `x` into `[a, b)` (floored modulo).
///
/// # Example
///
/// ```rust
/// use flim_math::wrap;
///
/// assert!((wrap(1.25, 0.0, 1.0) - 0.25).abs() < 1e-12);
/// assert!((wrap(-0.25, 0.0, 1.0) - 0.75).abs() < 1e-12);
/// ```
#[inline]
pub fn wrap(x: f64, a: f64, b: f64) -> f64 {
    a + (x - a).rem_euclid(b - a)
}

/// Fractional part of a value, `x - floor(x)`.
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_remap() {
        assert_eq!(remap(0.5, 0.0, 1.0, 0.0, 100.0), 50.0);
        assert_eq!(remap(50.0, 0.0, 100.0, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_remap_clamp_bounds() {
        assert_eq!(remap_clamp(-1.0, 0.0, 1.0, 0.0, 1.0), 0.0);
        assert_eq!(remap_clamp(2.0, 0.0, 1.0, 0.0, 1.0), 1.0);
        assert_eq!(remap_clamp(0.5, 0.0, 1.0, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(-0.5), 0.0);
        assert_eq!(saturate(0.5), 0.5);
        assert_eq!(saturate(1.5), 1.0);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(0.5, 0.0, 1.0), 0.5);
        assert_eq!(wrap(1.0, 0.0, 1.0), 0.0);
        assert!((wrap(2.0 / 3.0 + 0.1 / 360.0, 0.0, 1.0) - (2.0 / 3.0 + 0.1 / 360.0)).abs() < 1e-15);
    }

    #[test]
    fn test_fract() {
        assert!((fract(1.75) - 0.75).abs() < 1e-12);
        assert!((fract(-0.25) - 0.75).abs() < 1e-12);
    }
}
