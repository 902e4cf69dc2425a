//! Log2 allocation: LUT domain shaping for scene-linear input.
//!
//! Scene-linear values span many stops, so a film grid is not indexed by
//! linear value. Input is first shaped:
//!
//! ```text
//! encode: v = (log2(l + 2^min) - min) / (max - min)
//! decode: l = max(2^(min + v * (max - min)) - 2^min, 0)
//! ```
//!
//! The `2^min` offset keeps linear 0 at encoded 0 instead of at -inf.
//! Downstream consumers of a baked grid apply `encode` (for instance an
//! allocation transform with `vars: [min, max, offset]`) before lookup.

use crate::{LutError, LutResult};

/// Log2 allocation over a stop range `[min, max]`.
///
/// # Example
///
/// ```rust
/// use flim_lut::Lg2Allocation;
///
/// let alloc = Lg2Allocation::new(-10.0, 10.0).unwrap();
/// assert_eq!(alloc.offset(), 2f64.powi(-10));
/// assert_eq!(alloc.decode(0.0), 0.0);
/// assert!((alloc.decode(1.0) - (1024.0 - 2f64.powi(-10))).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lg2Allocation {
    min: f64,
    max: f64,
}

impl Lg2Allocation {
    /// Creates an allocation. Fails unless both bounds are finite and
    /// `max > min`.
    pub fn new(min: f64, max: f64) -> LutResult<Self> {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(LutError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound in stops.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound in stops.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Offset added before log2, `2^min`.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.min.exp2()
    }

    /// Encoded [0, 1] to scene-linear.
    #[inline]
    pub fn decode(&self, v: f64) -> f64 {
        let stops = self.min + (self.max - self.min) * v;
        (stops.exp2() - self.offset()).max(0.0)
    }

    /// Scene-linear to encoded [0, 1] (unclamped above `max`).
    ///
    /// Negative input is treated as 0.
    #[inline]
    pub fn encode(&self, l: f64) -> f64 {
        ((l.max(0.0) + self.offset()).log2() - self.min) / (self.max - self.min)
    }
}
