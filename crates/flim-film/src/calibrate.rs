//! Run state: everything derived from a configuration before sampling.
//!
//! Built once per run and shared read-only by every worker. Calibration
//! develops a black and a very bright input through negative and print to
//! find the output range the film can actually reach:
//!
//! ```text
//! white_cap = negative_and_print(CALIBRATION_WHITE)
//! black_cap = negative_and_print(0) / white_cap
//! ```

use crate::config::{BlackPoint, Configuration, FilmStock};
use crate::develop::{CharacteristicCurve, develop};
use crate::gamut::extension_matrix;
use crate::{FlimError, FlimResult};
use flim_math::{Mat3, Vec3};
use tracing::debug;

/// Input magnitude standing in for unbounded exposure during calibration.
///
/// Large enough that both film passes sit on their shoulders; increasing
/// it further changes the white cap by less than 1e-12 relative.
pub const CALIBRATION_WHITE: f64 = 1e7;

/// Derived, immutable state of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    extension: Mat3,
    extension_inv: Mat3,
    backlight_ext: Vec3,
    white_cap: Vec3,
    black_cap: Vec3,
    weights: Vec3,
    black_point: f64,
    curve: CharacteristicCurve,
    negative: FilmStock,
    print: FilmStock,
}

impl RunState {
    /// Validates `config` and derives the run state from it.
    ///
    /// # Errors
    ///
    /// [`FlimError::InvalidConfiguration`] if the configuration does not
    /// validate, the gamut matrix is singular or the calibrated white cap
    /// has a non-positive component.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flim_film::{Configuration, RunState};
    ///
    /// let state = RunState::new(&Configuration::default()).unwrap();
    /// assert!(state.white_cap().min_element() > 0.0);
    /// assert!(state.black_point() > 0.0);
    /// ```
    pub fn new(config: &Configuration) -> FlimResult<Self> {
        config.validate()?;

        let (extension, extension_inv) = extension_matrix(&config.extended_gamut)?;
        let curve = CharacteristicCurve::new(&config.sigmoid)?;
        let backlight_ext = extension * Vec3::from_array(config.print_backlight);

        let mut state = Self {
            extension,
            extension_inv,
            backlight_ext,
            white_cap: Vec3::ONE,
            black_cap: Vec3::ZERO,
            weights: config.normalized_weights(),
            black_point: 0.0,
            curve,
            negative: config.negative_film,
            print: config.print_film,
        };

        let white_cap = state.negative_and_print(Vec3::splat(CALIBRATION_WHITE));
        if !white_cap.is_finite() || white_cap.min_element() <= 0.0 {
            return Err(FlimError::InvalidConfiguration(format!(
                "calibrated white cap {:?} must be finite and positive",
                white_cap.to_array()
            )));
        }
        state.white_cap = white_cap;
        state.black_cap = state.negative_and_print(Vec3::ZERO) / white_cap;

        state.black_point = match config.black_point {
            BlackPoint::Auto => state.black_cap.dot(state.weights) * 1000.0,
            BlackPoint::Explicit(v) => v,
        };

        debug!(
            white_cap = ?state.white_cap.to_array(),
            black_cap = ?state.black_cap.to_array(),
            black_point = state.black_point,
            "Calibrated run state"
        );

        Ok(state)
    }

    /// Develops through the negative, shines the backlight through it and
    /// develops the print.
    #[inline]
    pub fn negative_and_print(&self, rgb: Vec3) -> Vec3 {
        let negative = develop(rgb, &self.negative, &self.curve);
        develop(negative * self.backlight_ext, &self.print, &self.curve)
    }

    /// Gamut extension matrix.
    #[inline]
    pub fn extension(&self) -> &Mat3 {
        &self.extension
    }

    /// Inverse of the gamut extension matrix.
    #[inline]
    pub fn extension_inv(&self) -> &Mat3 {
        &self.extension_inv
    }

    /// Print backlight in extended gamut.
    #[inline]
    pub fn backlight_ext(&self) -> Vec3 {
        self.backlight_ext
    }

    /// Brightest reachable print output.
    #[inline]
    pub fn white_cap(&self) -> Vec3 {
        self.white_cap
    }

    /// Darkest reachable print output, relative to the white cap.
    #[inline]
    pub fn black_cap(&self) -> Vec3 {
        self.black_cap
    }

    /// Luminance weights, summing to 1.
    #[inline]
    pub fn weights(&self) -> Vec3 {
        self.weights
    }

    /// Resolved black point in milli-units.
    #[inline]
    pub fn black_point(&self) -> f64 {
        self.black_point
    }

    /// Characteristic curve shared by all layers.
    #[inline]
    pub fn curve(&self) -> &CharacteristicCurve {
        &self.curve
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_caps_are_ordered() {
        for config in [Configuration::default(), Configuration::silver()] {
            let state = RunState::new(&config).unwrap();
            let white = state.white_cap();
            let black = state.black_cap();
            for c in 0..3 {
                assert!(white[c] > 0.0);
                assert!(black[c] > 0.0 && black[c] < 1.0);
            }
        }
    }

    #[test]
    fn test_calibration_magnitude_is_adequate() {
        let state = RunState::new(&Configuration::default()).unwrap();
        let white = state.white_cap();
        for scale in [1e8, 1e10] {
            let brighter = state.negative_and_print(Vec3::splat(scale));
            for c in 0..3 {
                assert_relative_eq!(brighter[c], white[c], max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_auto_black_point_from_black_cap() {
        let state = RunState::new(&Configuration::default()).unwrap();
        let expected = state.black_cap().dot(state.weights()) * 1000.0;
        assert_eq!(state.black_point(), expected);
    }

    #[test]
    fn test_explicit_black_point_kept() {
        let state = RunState::new(&Configuration::silver()).unwrap();
        assert_eq!(state.black_point(), 0.5);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = Configuration::default();
        config.print_film.max_density = 0.0;
        assert!(matches!(
            RunState::new(&config),
            Err(FlimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_backlight_is_extended() {
        let mut config = Configuration::default();
        config.print_backlight = [0.9, 1.0, 1.1];
        let state = RunState::new(&config).unwrap();
        assert_eq!(
            state.backlight_ext(),
            *state.extension() * Vec3::new(0.9, 1.0, 1.1)
        );
    }
}
