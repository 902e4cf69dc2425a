//! Dye layers and film development.
//!
//! A film pass has three dye layers. Each layer sees the exposure along
//! one sensitivity axis, forms density through the response curve, and
//! filters light with its complementary dye:
//!
//! | Layer | Sensitive to | Dye |
//! |-------|--------------|-----|
//! | 0 | blue  | yellow  |
//! | 1 | green | magenta |
//! | 2 | red   | cyan    |
//!
//! The developed color is the component-wise product of the three layer
//! transmissions (subtractive mixing).

use crate::config::{FilmStock, ResponseCurve};
use crate::curve::SuperSigmoid;
use crate::FlimResult;
use flim_math::Vec3;

/// Sensitivity axis and dye color of one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DyeLayer {
    /// Direction the layer projects exposure onto.
    pub sensitivity: Vec3,
    /// Color the layer dyes towards as density rises.
    pub dye: Vec3,
}

/// The three layers of a color film, blue-sensitive first.
pub const LAYERS: [DyeLayer; 3] = [
    DyeLayer {
        sensitivity: Vec3::Z,
        dye: Vec3::new(1.0, 1.0, 0.0),
    },
    DyeLayer {
        sensitivity: Vec3::Y,
        dye: Vec3::new(1.0, 0.0, 1.0),
    },
    DyeLayer {
        sensitivity: Vec3::X,
        dye: Vec3::new(0.0, 1.0, 1.0),
    },
];

/// Response curve bound to the log2 exposure range it is evaluated over.
///
/// # Example
///
/// ```rust
/// use flim_film::{CharacteristicCurve, ResponseCurve};
///
/// let c = CharacteristicCurve::new(&ResponseCurve::default()).unwrap();
/// assert!(c.transmittance(0.0, 5.0) > c.transmittance(1.0, 5.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicCurve {
    sigmoid: SuperSigmoid,
    log2_min: f64,
    log2_max: f64,
}

impl CharacteristicCurve {
    /// Builds the curve. Fails if the control points are degenerate.
    pub fn new(params: &ResponseCurve) -> FlimResult<Self> {
        Ok(Self {
            sigmoid: SuperSigmoid::new(
                params.toe_x,
                params.toe_y,
                params.shoulder_x,
                params.shoulder_y,
            )?,
            log2_min: params.log2_min,
            log2_max: params.log2_max,
        })
    }

    /// The underlying super-sigmoid.
    #[inline]
    pub fn sigmoid(&self) -> &SuperSigmoid {
        &self.sigmoid
    }

    /// Linear exposure to curve input in [0, 1]:
    /// `(log2(v + 2^min) - min) / (max - min)`, clamped.
    #[inline]
    pub fn exposure_norm(&self, mono: f64) -> f64 {
        let a = self.log2_min;
        let b = self.log2_max;
        // negative exposure below -2^min would hit log2 of <= 0
        let lg = (mono + a.exp2()).max(f64::MIN_POSITIVE).log2();
        ((lg - a) / (b - a)).clamp(0.0, 1.0)
    }

    /// Fraction of light a layer passes at projected exposure `mono`.
    #[inline]
    pub fn transmittance(&self, mono: f64, max_density: f64) -> f64 {
        let density = self.sigmoid.eval(self.exposure_norm(mono)) * max_density;
        (-density).exp2().clamp(0.0, 1.0)
    }
}

/// Transmission of one dye layer for an exposed triplet.
///
/// White where the layer passes all light, the layer's dye color where it
/// passes none.
#[inline]
pub fn dye_layer(rgb: Vec3, layer: &DyeLayer, curve: &CharacteristicCurve, max_density: f64) -> Vec3 {
    let mono = rgb.dot(layer.sensitivity.normalize_sum());
    let trans = curve.transmittance(mono, max_density);
    layer.dye.normalize_max().lerp(Vec3::ONE, trans)
}

/// Develops one film pass: exposes by `2^exposure` and multiplies the
/// three layer transmissions.
pub fn develop(rgb: Vec3, stock: &FilmStock, curve: &CharacteristicCurve) -> Vec3 {
    let exposed = rgb * stock.exposure.exp2();
    LAYERS
        .iter()
        .fold(Vec3::ONE, |acc, layer| acc * dye_layer(exposed, layer, curve, stock.max_density))
}
