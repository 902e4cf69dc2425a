//! Per-sample film transform.
//!
//! Stage order:
//!
//! 1. Pre-formation filter
//! 2. Gamut extension
//! 3. Negative and print development
//! 4. White cap normalization
//! 5. Black point remap (white point 0)
//! 6. Inverse gamut extension, negatives to 0
//! 7. Post-formation filter
//! 8. Clamp to [0, 1]
//! 9. Midtone saturation
//! 10. Clamp to [0, 1]
//!
//! Input is scene-linear after pre-exposure; output is linear display
//! light. The display encoding is applied by the grid engine.

use crate::calibrate::RunState;
use crate::config::Configuration;
use crate::engine::{ApplyOptions, apply_with};
use crate::offset::uniform_offset;
use crate::FlimResult;
use flim_lut::SampleGrid;
use flim_math::{Vec3, hue_sat};

/// Half width of the midtone saturation window around mono 0.5.
const MIDTONE_HALF_WIDTH: f64 = 0.45;

/// Applies the film pipeline to one triplet.
///
/// Pure and total: for finite non-negative input the result lies in
/// [0, 1]. `state` must have been derived from `config`.
///
/// # Example
///
/// ```rust
/// use flim_film::{transform, Configuration, RunState};
/// use flim_math::Vec3;
///
/// let config = Configuration::default();
/// let state = RunState::new(&config).unwrap();
/// let out = transform(Vec3::splat(0.18 * 2f64.powf(config.pre_exposure)), &config, &state);
/// assert!(out.min_element() >= 0.0 && out.max_element() <= 1.0);
/// ```
pub fn transform(rgb: Vec3, config: &Configuration, state: &RunState) -> Vec3 {
    let pre_filter = Vec3::ONE.lerp(
        Vec3::from_array(config.pre_formation_filter),
        config.pre_formation_filter_strength,
    );
    let mut t = rgb * pre_filter;

    t = *state.extension() * t;
    t = state.negative_and_print(t);
    t = t / state.white_cap();
    t = uniform_offset(t, state.black_point(), 0.0, state.weights());
    t = (*state.extension_inv() * t).max_zero();

    let post_filter = Vec3::from_array(config.post_formation_filter);
    t = t.lerp(t * post_filter, config.post_formation_filter_strength);
    t = t.clamp01();

    t = midtone_saturation(t, config.midtone_saturation, state.weights());
    t.clamp01()
}

/// Blends towards a saturation-adjusted color with a triangular window
/// peaking at mono 0.5 and vanishing outside (0.05, 0.95).
fn midtone_saturation(rgb: Vec3, saturation: f64, weights: Vec3) -> Vec3 {
    let mono = rgb.dot(weights);
    let factor = (1.0 - (mono - 0.5).abs() / MIDTONE_HALF_WIDTH).max(0.0);
    if factor == 0.0 {
        return rgb;
    }
    rgb.lerp(hue_sat(rgb, 0.5, saturation, 1.0), factor)
}

/// A validated configuration bundled with its run state.
///
/// Use it for repeated point queries; [`crate::apply`] builds its own
/// state per call.
///
/// # Example
///
/// ```rust
/// use flim_film::{Configuration, FilmProcessor};
/// use flim_math::Vec3;
///
/// let film = FilmProcessor::new(Configuration::silver()).unwrap();
/// let out = film.transform_scene_linear(Vec3::splat(0.18));
/// assert!(out.max_element() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct FilmProcessor {
    config: Configuration,
    state: RunState,
}

impl FilmProcessor {
    /// Validates `config` and derives its run state.
    pub fn new(config: Configuration) -> FlimResult<Self> {
        let state = RunState::new(&config)?;
        Ok(Self { config, state })
    }

    /// The configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The derived run state.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Per-sample transform, see [`transform`].
    #[inline]
    pub fn transform(&self, rgb: Vec3) -> Vec3 {
        transform(rgb, &self.config, &self.state)
    }

    /// What one grid cell computes for a scene-linear input: pre-exposure,
    /// the film transform, then the display encoding.
    pub fn transform_scene_linear(&self, rgb: Vec3) -> Vec3 {
        let exposed = rgb * self.config.pre_exposure.exp2();
        self.config.display.encode_rgb(self.transform(exposed))
    }

    /// Runs a grid through this configuration.
    pub fn apply(&self, grid: &SampleGrid, options: &ApplyOptions) -> FlimResult<SampleGrid> {
        apply_with(grid, &self.config, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn weights() -> Vec3 {
        Vec3::splat(1.0 / 3.0)
    }

    #[test]
    fn test_output_in_unit_cube() {
        let config = Configuration::default();
        let state = RunState::new(&config).unwrap();
        let mut v = 1e-6;
        while v < 1e7 {
            for rgb in [
                Vec3::splat(v),
                Vec3::new(v, 0.0, 0.0),
                Vec3::new(0.0, v * 0.5, v),
                Vec3::new(v, v * 0.1, v * 0.01),
            ] {
                let out = transform(rgb, &config, &state);
                assert!(out.is_finite());
                assert!(out.min_element() >= 0.0 && out.max_element() <= 1.0, "{:?} -> {:?}", rgb, out);
            }
            v *= 3.0;
        }
    }

    #[test]
    fn test_black_maps_to_black() {
        let config = Configuration::default();
        let state = RunState::new(&config).unwrap();
        let out = transform(Vec3::ZERO, &config, &state);
        assert!(out.max_element() < 1e-3, "{:?}", out);
    }

    #[test]
    fn test_gray_stays_neutral() {
        let mut config = Configuration::default();
        config.extended_gamut.rotation = [0.0; 3];
        config.extended_gamut.scale = [1.1; 3];
        let state = RunState::new(&config).unwrap();
        let out = transform(Vec3::splat(2.0), &config, &state);
        assert_abs_diff_eq!(out.x, out.y, epsilon = 1e-9);
        assert_abs_diff_eq!(out.y, out.z, epsilon = 1e-9);
    }

    #[test]
    fn test_midtone_window() {
        let c = Vec3::new(0.02, 0.03, 0.01);
        assert_eq!(midtone_saturation(c, 2.0, weights()), c);
        let c = Vec3::new(0.99, 0.97, 0.98);
        assert_eq!(midtone_saturation(c, 2.0, weights()), c);

        // full effect at mono 0.5
        let c = Vec3::new(0.6, 0.5, 0.4);
        let out = midtone_saturation(c, 0.0, weights());
        assert_abs_diff_eq!(out.x, out.y, epsilon = 1e-9);
        assert_abs_diff_eq!(out.y, out.z, epsilon = 1e-9);
    }

    #[test]
    fn test_unit_saturation_is_identity() {
        let c = Vec3::new(0.6, 0.5, 0.4);
        let out = midtone_saturation(c, 1.0, weights());
        assert_abs_diff_eq!(out.x, c.x, epsilon = 1e-12);
        assert_abs_diff_eq!(out.z, c.z, epsilon = 1e-12);
    }

    #[test]
    fn test_post_filter_tints() {
        let mut config = Configuration::default();
        let state = RunState::new(&config).unwrap();
        let rgb = Vec3::splat(4.0);
        let plain = transform(rgb, &config, &state);

        config.post_formation_filter = [1.0, 1.0, 0.0];
        config.post_formation_filter_strength = 0.5;
        let tinted = transform(rgb, &config, &state);
        assert!(tinted.z < plain.z);
    }

    #[test]
    fn test_processor_matches_free_function() {
        let film = FilmProcessor::new(Configuration::default()).unwrap();
        let rgb = Vec3::new(0.3, 2.0, 7.0);
        assert_eq!(film.transform(rgb), transform(rgb, film.config(), film.state()));

        let scene = Vec3::splat(0.18);
        let exposed = scene * film.config().pre_exposure.exp2();
        let expected = film.config().display.encode_rgb(film.transform(exposed));
        assert_eq!(film.transform_scene_linear(scene), expected);
    }
}
