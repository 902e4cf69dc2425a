//! Super-sigmoid film response curve.
//!
//! Maps a normalized log exposure in [0, 1] to a normalized density in
//! [0, 1] through three segments:
//!
//! ```text
//! x < toe_x             toe:      toe_y * (x / toe_x)^p_toe
//! toe_x <= x < sh_x     line:     slope * (x - toe_x) + toe_y
//! x >= sh_x             shoulder: sh_y + (1 - sh_y) * (1 - (1 - t)^p_sh)
//!                                 t = (x - sh_x) / (1 - sh_x)
//!
//! slope  = (sh_y - toe_y) / (sh_x - toe_x)
//! p_toe  = slope * toe_x / toe_y
//! p_sh   = slope * (1 - sh_x) / (1 - sh_y)
//! ```
//!
//! The exponents make the derivative continuous at both breakpoints as well
//! as the value.

use crate::{FlimError, FlimResult};

/// A validated super-sigmoid with precomputed slope and exponents.
///
/// # Example
///
/// ```rust
/// use flim_film::SuperSigmoid;
///
/// let curve = SuperSigmoid::new(0.44, 0.28, 0.591, 0.779).unwrap();
/// assert_eq!(curve.eval(0.0), 0.0);
/// assert!((curve.eval(0.44) - 0.28).abs() < 1e-12);
/// assert!((curve.eval(1.0) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperSigmoid {
    toe_x: f64,
    toe_y: f64,
    shoulder_x: f64,
    shoulder_y: f64,
    slope: f64,
    toe_pow: f64,
    shoulder_pow: f64,
}

impl SuperSigmoid {
    /// Builds a curve from its control points.
    ///
    /// All four values are clamped to [0, 1]. Fails with
    /// [`FlimError::InvalidConfiguration`] unless `shoulder_x > toe_x`
    /// after clamping.
    pub fn new(toe_x: f64, toe_y: f64, shoulder_x: f64, shoulder_y: f64) -> FlimResult<Self> {
        let toe_x = toe_x.clamp(0.0, 1.0);
        let toe_y = toe_y.clamp(0.0, 1.0);
        let shoulder_x = shoulder_x.clamp(0.0, 1.0);
        let shoulder_y = shoulder_y.clamp(0.0, 1.0);

        if shoulder_x <= toe_x || shoulder_x.is_nan() || toe_x.is_nan() {
            return Err(FlimError::InvalidConfiguration(format!(
                "response curve shoulder_x ({}) must exceed toe_x ({})",
                shoulder_x, toe_x
            )));
        }

        let slope = (shoulder_y - toe_y) / (shoulder_x - toe_x);
        // Degenerate corners (toe_y = 0, shoulder_y = 1) are handled in eval
        let toe_pow = if toe_y > 0.0 { slope * toe_x / toe_y } else { 0.0 };
        let shoulder_pow = if shoulder_y < 1.0 {
            slope * (1.0 - shoulder_x) / (1.0 - shoulder_y)
        } else {
            0.0
        };

        Ok(Self {
            toe_x,
            toe_y,
            shoulder_x,
            shoulder_y,
            slope,
            toe_pow,
            shoulder_pow,
        })
    }

    /// Slope of the straight-line segment.
    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Evaluates the curve. Input is clamped to [0, 1].
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);

        if x < self.toe_x {
            if self.toe_y <= 0.0 {
                return 0.0;
            }
            return self.toe_y * (x / self.toe_x).powf(self.toe_pow);
        }

        if x < self.shoulder_x {
            return self.slope * (x - self.toe_x) + self.toe_y;
        }

        if self.shoulder_y >= 1.0 || self.shoulder_x >= 1.0 {
            return self.shoulder_y;
        }
        let t = (x - self.shoulder_x) / (1.0 - self.shoulder_x);
        (1.0 - (1.0 - t).powf(self.shoulder_pow)) * (1.0 - self.shoulder_y) + self.shoulder_y
    }
}

/// One-shot evaluation of the super-sigmoid.
///
/// Prefer [`SuperSigmoid`] when evaluating many points with the same
/// control points.
///
/// # Example
///
/// ```rust
/// use flim_film::curve;
///
/// let y = curve(0.5, 0.44, 0.28, 0.591, 0.779).unwrap();
/// assert!(y > 0.28 && y < 0.779);
/// assert!(curve(0.5, 0.5, 0.2, 0.5, 0.8).is_err());
/// ```
pub fn curve(x: f64, toe_x: f64, toe_y: f64, shoulder_x: f64, shoulder_y: f64) -> FlimResult<f64> {
    Ok(SuperSigmoid::new(toe_x, toe_y, shoulder_x, shoulder_y)?.eval(x))
}
