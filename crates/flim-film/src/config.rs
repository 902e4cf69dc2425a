//! Film configuration: every parameter of one grid run.
//!
//! A [`Configuration`] is a plain record. It is built by a preset
//! ([`Configuration::default`], [`Configuration::silver`]) or deserialized
//! by the caller with serde, then checked once with
//! [`Configuration::validate`]. Nothing mutates it during a run.
//!
//! # Example
//!
//! ```rust
//! use flim_film::{BlackPoint, Configuration};
//!
//! let mut config = Configuration::default();
//! config.pre_exposure = 4.0;
//! config.black_point = BlackPoint::Explicit(0.5);
//! config.validate().unwrap();
//! ```

use crate::{FlimError, FlimResult};
use flim_math::Vec3;
use flim_transfer::{gamma, srgb};
use serde::{Deserialize, Serialize};

/// Per-primary parameters of the gamut extension matrix.
///
/// Index 0 is red, 1 green, 2 blue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GamutExtension {
    /// Widening factor per primary; the primary is built with HSV
    /// saturation `1 / scale`. Must be > 0.
    pub scale: [f64; 3],
    /// Hue rotation per primary, in degrees.
    pub rotation: [f64; 3],
    /// Row multiplier per primary; each matrix row sums to it. Must be > 0.
    pub multiplier: [f64; 3],
}

impl Default for GamutExtension {
    fn default() -> Self {
        Self {
            scale: [1.05, 1.12, 1.045],
            rotation: [0.5, 2.0, 0.1],
            multiplier: [1.0, 1.0, 1.0],
        }
    }
}

/// Control points of the super-sigmoid and the exposure range it spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseCurve {
    /// Exposure (stops) mapped to curve input 0.
    pub log2_min: f64,
    /// Exposure (stops) mapped to curve input 1.
    pub log2_max: f64,
    /// Toe x, in [0, 1].
    pub toe_x: f64,
    /// Toe y, in [0, 1].
    pub toe_y: f64,
    /// Shoulder x, in [0, 1]; must exceed `toe_x`.
    pub shoulder_x: f64,
    /// Shoulder y, in [0, 1].
    pub shoulder_y: f64,
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self {
            log2_min: -10.0,
            log2_max: 22.0,
            toe_x: 0.44,
            toe_y: 0.28,
            shoulder_x: 0.591,
            shoulder_y: 0.779,
        }
    }
}

/// One film pass: negative or print.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilmStock {
    /// Exposure in stops applied before development.
    pub exposure: f64,
    /// Density reached at full response. Must be > 0.
    pub max_density: f64,
}

/// Black point of the final image, in thousandths of the white level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BlackPointRepr", into = "BlackPointRepr")]
pub enum BlackPoint {
    /// Derived from the calibrated print black: `dot(black_cap, weights) * 1000`.
    Auto,
    /// Fixed value in milli-units.
    Explicit(f64),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BlackPointRepr {
    Milli(f64),
    Keyword(String),
}

impl TryFrom<BlackPointRepr> for BlackPoint {
    type Error = String;

    fn try_from(repr: BlackPointRepr) -> Result<Self, Self::Error> {
        match repr {
            BlackPointRepr::Milli(v) => Ok(BlackPoint::Explicit(v)),
            BlackPointRepr::Keyword(s) if s.eq_ignore_ascii_case("auto") => Ok(BlackPoint::Auto),
            BlackPointRepr::Keyword(s) => {
                Err(format!("black point must be a number or \"auto\", got {:?}", s))
            }
        }
    }
}

impl From<BlackPoint> for BlackPointRepr {
    fn from(bp: BlackPoint) -> Self {
        match bp {
            BlackPoint::Auto => BlackPointRepr::Keyword("auto".into()),
            BlackPoint::Explicit(v) => BlackPointRepr::Milli(v),
        }
    }
}

/// Display encoding applied to every grid cell after the film pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayEncoding {
    /// Pure power law, `v^(1/gamma)`.
    Gamma(f64),
    /// Piecewise sRGB OETF.
    Srgb,
    /// No encoding.
    Linear,
}

impl Default for DisplayEncoding {
    fn default() -> Self {
        DisplayEncoding::Gamma(2.2)
    }
}

impl DisplayEncoding {
    /// Encodes one linear display value.
    #[inline]
    pub fn encode(&self, v: f64) -> f64 {
        match *self {
            DisplayEncoding::Gamma(g) => gamma::gamma_oetf(v, g),
            DisplayEncoding::Srgb => srgb::oetf(v),
            DisplayEncoding::Linear => v,
        }
    }

    /// Encodes an RGB triplet.
    #[inline]
    pub fn encode_rgb(&self, rgb: Vec3) -> Vec3 {
        rgb.map(|v| self.encode(v))
    }
}

fn default_weights() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

/// All parameters of one film run.
///
/// Field groups follow pipeline order: LUT compression, pre-exposure and
/// pre-formation filter, gamut extension, response curve, negative,
/// backlight and print, then the finishing stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    /// Lower bound (stops) of the grid's log2 compression.
    pub lut_compress_log2_min: f64,
    /// Upper bound (stops) of the grid's log2 compression.
    pub lut_compress_log2_max: f64,

    /// Exposure (stops) applied to decompressed grid values.
    pub pre_exposure: f64,
    /// Color filter applied before film formation.
    pub pre_formation_filter: [f64; 3],
    /// Blend of the pre-formation filter, 0 = off.
    pub pre_formation_filter_strength: f64,

    /// Gamut extension used around film formation.
    pub extended_gamut: GamutExtension,

    /// Characteristic curve shared by all dye layers.
    pub sigmoid: ResponseCurve,

    /// Negative film pass.
    pub negative_film: FilmStock,
    /// Light shone through the negative onto the print, in working gamut.
    pub print_backlight: [f64; 3],
    /// Print film pass.
    pub print_film: FilmStock,

    /// Weights for mono signals; normalized to sum 1 when a run starts.
    #[serde(default = "default_weights")]
    pub luminance_weights: [f64; 3],
    /// Black point of the final image.
    pub black_point: BlackPoint,
    /// Color filter applied after film formation.
    pub post_formation_filter: [f64; 3],
    /// Blend of the post-formation filter, 0 = off.
    pub post_formation_filter_strength: f64,
    /// Saturation multiplier for the midtones.
    pub midtone_saturation: f64,

    /// Encoding of the output grid.
    #[serde(default)]
    pub display: DisplayEncoding,
}

impl Default for Configuration {
    /// The reference "default" preset.
    fn default() -> Self {
        Self {
            lut_compress_log2_min: -10.0,
            lut_compress_log2_max: 10.0,
            pre_exposure: 4.3,
            pre_formation_filter: [1.0, 1.0, 1.0],
            pre_formation_filter_strength: 0.0,
            extended_gamut: GamutExtension::default(),
            sigmoid: ResponseCurve::default(),
            negative_film: FilmStock {
                exposure: 6.0,
                max_density: 5.0,
            },
            print_backlight: [1.0, 1.0, 1.0],
            print_film: FilmStock {
                exposure: 6.0,
                max_density: 27.5,
            },
            luminance_weights: default_weights(),
            black_point: BlackPoint::Auto,
            post_formation_filter: [1.0, 1.0, 1.0],
            post_formation_filter_strength: 0.0,
            midtone_saturation: 1.02,
            display: DisplayEncoding::default(),
        }
    }
}

impl Configuration {
    /// The "silver" preset: cooler pre-filter, denser negative, warm
    /// post-filter and a fixed black point.
    pub fn silver() -> Self {
        Self {
            pre_exposure: 3.9,
            pre_formation_filter: [0.0, 0.5, 1.0],
            pre_formation_filter_strength: 0.05,
            extended_gamut: GamutExtension {
                multiplier: [1.0, 1.0, 1.06],
                ..GamutExtension::default()
            },
            negative_film: FilmStock {
                exposure: 4.7,
                max_density: 7.0,
            },
            print_backlight: [0.9992, 0.99, 1.0],
            print_film: FilmStock {
                exposure: 4.7,
                max_density: 30.0,
            },
            black_point: BlackPoint::Explicit(0.5),
            post_formation_filter: [1.0, 1.0, 0.0],
            post_formation_filter_strength: 0.04,
            midtone_saturation: 1.0,
            ..Self::default()
        }
    }

    /// Luminance weights scaled to sum 1.
    ///
    /// Only meaningful on a validated configuration (non-zero sum).
    pub fn normalized_weights(&self) -> Vec3 {
        Vec3::from_array(self.luminance_weights).normalize_sum()
    }

    /// Checks every parameter against its domain.
    ///
    /// Fails with [`FlimError::InvalidConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> FlimResult<()> {
        let scalars = [
            ("lut_compress_log2_min", self.lut_compress_log2_min),
            ("lut_compress_log2_max", self.lut_compress_log2_max),
            ("pre_exposure", self.pre_exposure),
            ("pre_formation_filter_strength", self.pre_formation_filter_strength),
            ("sigmoid.log2_min", self.sigmoid.log2_min),
            ("sigmoid.log2_max", self.sigmoid.log2_max),
            ("sigmoid.toe_x", self.sigmoid.toe_x),
            ("sigmoid.toe_y", self.sigmoid.toe_y),
            ("sigmoid.shoulder_x", self.sigmoid.shoulder_x),
            ("sigmoid.shoulder_y", self.sigmoid.shoulder_y),
            ("negative_film.exposure", self.negative_film.exposure),
            ("negative_film.max_density", self.negative_film.max_density),
            ("print_film.exposure", self.print_film.exposure),
            ("print_film.max_density", self.print_film.max_density),
            ("post_formation_filter_strength", self.post_formation_filter_strength),
            ("midtone_saturation", self.midtone_saturation),
        ];
        for (name, v) in scalars {
            check_finite(name, v)?;
        }

        let vectors = [
            ("pre_formation_filter", self.pre_formation_filter),
            ("extended_gamut.scale", self.extended_gamut.scale),
            ("extended_gamut.rotation", self.extended_gamut.rotation),
            ("extended_gamut.multiplier", self.extended_gamut.multiplier),
            ("print_backlight", self.print_backlight),
            ("luminance_weights", self.luminance_weights),
            ("post_formation_filter", self.post_formation_filter),
        ];
        for (name, v) in vectors {
            for (i, c) in v.into_iter().enumerate() {
                check_finite(&format!("{}[{}]", name, i), c)?;
            }
        }

        check_range(
            "lut_compress_log2",
            self.lut_compress_log2_min,
            self.lut_compress_log2_max,
        )?;
        check_range("sigmoid.log2", self.sigmoid.log2_min, self.sigmoid.log2_max)?;

        for i in 0..3 {
            check_positive(&format!("extended_gamut.scale[{}]", i), self.extended_gamut.scale[i])?;
            check_positive(
                &format!("extended_gamut.multiplier[{}]", i),
                self.extended_gamut.multiplier[i],
            )?;
        }
        check_positive("negative_film.max_density", self.negative_film.max_density)?;
        check_positive("print_film.max_density", self.print_film.max_density)?;

        let toe_x = self.sigmoid.toe_x.clamp(0.0, 1.0);
        let shoulder_x = self.sigmoid.shoulder_x.clamp(0.0, 1.0);
        if shoulder_x <= toe_x {
            return Err(FlimError::InvalidConfiguration(format!(
                "sigmoid.shoulder_x ({}) must exceed sigmoid.toe_x ({})",
                shoulder_x, toe_x
            )));
        }

        let weight_sum: f64 = self.luminance_weights.iter().sum();
        if weight_sum.abs() < 1e-12 {
            return Err(FlimError::InvalidConfiguration(
                "luminance_weights must not sum to zero".into(),
            ));
        }

        if let BlackPoint::Explicit(v) = self.black_point {
            check_finite("black_point", v)?;
        }

        if let DisplayEncoding::Gamma(g) = self.display {
            check_finite("display.gamma", g)?;
            check_positive("display.gamma", g)?;
        }

        Ok(())
    }
}

fn check_finite(name: &str, v: f64) -> FlimResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(FlimError::InvalidConfiguration(format!("{} must be finite, got {}", name, v)))
    }
}

fn check_positive(name: &str, v: f64) -> FlimResult<()> {
    if v > 0.0 {
        Ok(())
    } else {
        Err(FlimError::InvalidConfiguration(format!("{} must be > 0, got {}", name, v)))
    }
}

fn check_range(name: &str, min: f64, max: f64) -> FlimResult<()> {
    if max > min {
        Ok(())
    } else {
        Err(FlimError::InvalidConfiguration(format!(
            "{} range [{}, {}] must be increasing",
            name, min, max
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expect_invalid(config: Configuration, field: &str) {
        match config.validate() {
            Err(FlimError::InvalidConfiguration(msg)) => {
                assert!(msg.contains(field), "message {:?} should name {}", msg, field)
            }
            other => panic!("expected InvalidConfiguration for {}, got {:?}", field, other),
        }
    }

    #[test]
    fn test_presets_validate() {
        Configuration::default().validate().unwrap();
        Configuration::silver().validate().unwrap();
    }

    #[test]
    fn test_silver_differs_from_default() {
        let s = Configuration::silver();
        assert_eq!(s.black_point, BlackPoint::Explicit(0.5));
        assert_eq!(s.extended_gamut.multiplier, [1.0, 1.0, 1.06]);
        assert_eq!(s.sigmoid, ResponseCurve::default());
    }

    #[test]
    fn test_non_positive_density() {
        let mut c = Configuration::default();
        c.print_film.max_density = 0.0;
        expect_invalid(c, "print_film.max_density");

        let mut c = Configuration::default();
        c.negative_film.max_density = -1.0;
        expect_invalid(c, "negative_film.max_density");
    }

    #[test]
    fn test_non_positive_scale() {
        let mut c = Configuration::default();
        c.extended_gamut.scale[1] = 0.0;
        expect_invalid(c, "extended_gamut.scale[1]");
    }

    #[test]
    fn test_shoulder_must_exceed_toe() {
        let mut c = Configuration::default();
        c.sigmoid.shoulder_x = c.sigmoid.toe_x;
        expect_invalid(c, "shoulder_x");

        let mut c = Configuration::default();
        c.sigmoid.toe_x = 1.5;
        c.sigmoid.shoulder_x = 2.0; // both clamp to 1
        expect_invalid(c, "shoulder_x");
    }

    #[test]
    fn test_zero_weight_sum() {
        let mut c = Configuration::default();
        c.luminance_weights = [1.0, -1.0, 0.0];
        expect_invalid(c, "luminance_weights");
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut c = Configuration::default();
        c.pre_exposure = f64::NAN;
        expect_invalid(c, "pre_exposure");

        let mut c = Configuration::default();
        c.print_backlight[2] = f64::INFINITY;
        expect_invalid(c, "print_backlight[2]");
    }

    #[test]
    fn test_decreasing_ranges() {
        let mut c = Configuration::default();
        c.lut_compress_log2_max = -20.0;
        expect_invalid(c, "lut_compress_log2");
    }

    #[test]
    fn test_weights_normalize() {
        let mut c = Configuration::default();
        c.luminance_weights = [2.0, 1.0, 1.0];
        assert_eq!(c.normalized_weights(), Vec3::new(0.5, 0.25, 0.25));
    }

    #[test]
    fn test_display_encoding() {
        assert_eq!(DisplayEncoding::Linear.encode(0.25), 0.25);
        assert!((DisplayEncoding::default().encode(0.218) - 0.5).abs() < 0.01);
        assert!(DisplayEncoding::Srgb.encode(0.0031308) < 0.041);
    }

    #[test]
    fn test_black_point_repr() {
        assert_eq!(
            BlackPoint::try_from(BlackPointRepr::Keyword("AUTO".into())).unwrap(),
            BlackPoint::Auto
        );
        assert!(BlackPoint::try_from(BlackPointRepr::Keyword("dark".into())).is_err());
    }
}
