//! Gamut extension matrix.
//!
//! Film formation desaturates strongly; running it in a gamut that is a
//! little wider than the working one keeps saturated input from clipping.
//! Each row of the matrix is a "primary" pulled towards white:
//!
//! ```text
//! row_c = mult_c * normalize_sum(hsv_to_rgb(hue_c + rot_c / 360, 1 / scale_c, 1))
//! ```
//!
//! with hues 0, 1/3 and 2/3 for red, green and blue.

use crate::config::GamutExtension;
use crate::{FlimError, FlimResult};
use flim_math::{Mat3, Vec3, hsv_to_rgb, wrap};

const PRIMARY_HUES: [f64; 3] = [0.0, 1.0 / 3.0, 2.0 / 3.0];

/// Builds one matrix row before the multiplier is applied.
fn primary_row(hue: f64, scale: f64, rotation: f64) -> FlimResult<Vec3> {
    let rgb = hsv_to_rgb(Vec3::new(wrap(hue + rotation / 360.0, 0.0, 1.0), 1.0 / scale, 1.0));
    let sum = rgb.sum();
    if !sum.is_finite() || sum.abs() < 1e-12 {
        return Err(FlimError::InvalidConfiguration(format!(
            "gamut extension primary at hue {:.3} with scale {} has no usable row",
            hue, scale
        )));
    }
    Ok(rgb / sum)
}

/// Builds the gamut extension matrix and its inverse.
///
/// Fails with [`FlimError::InvalidConfiguration`] for non-positive scales
/// or multipliers and for a singular matrix.
///
/// # Example
///
/// ```rust
/// use flim_film::{extension_matrix, GamutExtension};
///
/// let (m, inv) = extension_matrix(&GamutExtension::default()).unwrap();
/// let rgb = flim_math::Vec3::new(0.2, 0.5, 0.8);
/// assert!((inv * (m * rgb) - rgb).map(f64::abs).max_element() < 1e-12);
/// ```
pub fn extension_matrix(params: &GamutExtension) -> FlimResult<(Mat3, Mat3)> {
    let mut rows = [Vec3::ZERO; 3];
    for c in 0..3 {
        let scale = params.scale[c];
        let mult = params.multiplier[c];
        if !(scale > 0.0) || !(mult > 0.0) {
            return Err(FlimError::InvalidConfiguration(format!(
                "gamut extension scale and multiplier must be > 0, got {} and {} for channel {}",
                scale, mult, c
            )));
        }
        rows[c] = primary_row(PRIMARY_HUES[c], scale, params.rotation[c])? * mult;
    }

    let m = Mat3::from_row_vecs(rows[0], rows[1], rows[2]);
    let inv = m.inverse().ok_or_else(|| {
        FlimError::InvalidConfiguration(format!(
            "gamut extension matrix is singular (det = {:e})",
            m.determinant()
        ))
    })?;
    Ok((m, inv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_rows_sum_to_multiplier() {
        let params = GamutExtension {
            multiplier: [1.0, 0.8, 1.06],
            ..GamutExtension::default()
        };
        let (m, _) = extension_matrix(&params).unwrap();
        for c in 0..3 {
            assert_abs_diff_eq!(m.row(c).sum(), params.multiplier[c], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_inverse_is_inverse() {
        for params in [
            GamutExtension::default(),
            GamutExtension {
                scale: [1.3, 1.0, 2.0],
                rotation: [-10.0, 45.0, 370.0],
                multiplier: [0.9, 1.1, 1.2],
            },
        ] {
            let (m, inv) = extension_matrix(&params).unwrap();
            let id = m * inv;
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_abs_diff_eq!(id.m[i][j], expected, epsilon = 1e-10);
                }
            }
        }
    }

    #[test]
    fn test_unit_scale_is_identity() {
        let params = GamutExtension {
            scale: [1.0; 3],
            rotation: [0.0; 3],
            multiplier: [1.0; 3],
        };
        let (m, _) = extension_matrix(&params).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(m.m[i][j], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_default_rows_stay_positive() {
        let (m, _) = extension_matrix(&GamutExtension::default()).unwrap();
        assert!(m.m.iter().flatten().all(|&v| v >= 0.0));
        // diagonal dominates: each primary is still mostly itself
        for c in 0..3 {
            assert!(m.m[c][c] > 0.8);
        }
    }

    #[test]
    fn test_rejects_zero_scale_and_multiplier() {
        let mut params = GamutExtension::default();
        params.scale[0] = 0.0;
        assert!(matches!(extension_matrix(&params), Err(FlimError::InvalidConfiguration(_))));

        let mut params = GamutExtension::default();
        params.multiplier[2] = 0.0;
        assert!(matches!(extension_matrix(&params), Err(FlimError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_singular() {
        // every primary collapses to the same gray row
        let params = GamutExtension {
            scale: [1e12; 3],
            rotation: [0.0; 3],
            multiplier: [1.0; 3],
        };
        assert!(matches!(extension_matrix(&params), Err(FlimError::InvalidConfiguration(_))));
    }
}
