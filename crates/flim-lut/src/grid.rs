//! Sample grid: the lattice a 3D LUT is baked into.
//!
//! A [`SampleGrid`] is shape + flat storage. It can hold any shape so that
//! callers can hand over whatever they built; [`SampleGrid::cube_size`]
//! is the check that decides whether it is a usable RGB cube.

use crate::{LutError, LutResult};
use flim_math::Vec3;

/// Number of channels per grid cell.
pub const CHANNELS: usize = 3;

/// An n-dimensional lattice of `f64` values stored in C order.
///
/// # Example
///
/// ```rust
/// use flim_lut::SampleGrid;
///
/// let grid = SampleGrid::linear(3).unwrap();
/// assert_eq!(grid.get(2, 1, 0), Some([1.0, 0.5, 0.0]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl SampleGrid {
    /// Wraps flat storage with a shape.
    ///
    /// Fails with [`LutError::InvalidSize`] if the element count of `shape`
    /// does not match `data.len()`.
    pub fn from_shape_vec(shape: impl Into<Vec<usize>>, data: Vec<f64>) -> LutResult<Self> {
        let shape = shape.into();
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| LutError::InvalidSize(format!("shape {:?} overflows", shape)))?;
        if data.len() != expected {
            return Err(LutError::InvalidSize(format!(
                "expected {} values for shape {:?}, got {}",
                expected,
                shape,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Creates the identity cube of edge `size`.
    ///
    /// Cell `[i, j, k]` holds `(i, j, k) / (size - 1)`. This is the input a
    /// film grid run expects: a linear ramp in the compressed domain.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flim_lut::SampleGrid;
    ///
    /// let grid = SampleGrid::linear(2).unwrap();
    /// assert_eq!(grid.get(0, 0, 0), Some([0.0, 0.0, 0.0]));
    /// assert_eq!(grid.get(1, 1, 1), Some([1.0, 1.0, 1.0]));
    /// assert_eq!(grid.get(1, 0, 0), Some([1.0, 0.0, 0.0]));
    /// ```
    pub fn linear(size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize(format!(
                "linear grid needs at least 2 samples per axis, got {}",
                size
            )));
        }
        let n = (size - 1) as f64;
        let mut data = Vec::with_capacity(size * size * size * CHANNELS);
        for i in 0..size {
            for j in 0..size {
                for k in 0..size {
                    data.extend_from_slice(&[i as f64 / n, j as f64 / n, k as f64 / n]);
                }
            }
        }
        Ok(Self {
            shape: vec![size, size, size, CHANNELS],
            data,
        })
    }

    /// The grid shape, one entry per axis.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Validates that this is a cube of RGB triplets and returns its edge.
    ///
    /// Fails with [`LutError::Shape`] unless the shape is `(n, n, n, 3)`
    /// with `n >= 1`.
    pub fn cube_size(&self) -> LutResult<usize> {
        match self.shape.as_slice() {
            &[a, b, c, CHANNELS] if a == b && b == c && a > 0 => Ok(a),
            &[_, _, _, ch] if ch != CHANNELS => Err(LutError::Shape(format!(
                "expected {} channels per cell, got {}",
                CHANNELS, ch
            ))),
            &[a, b, c, _] => Err(LutError::Shape(format!(
                "spatial axes must be equal and non-empty, got {}x{}x{}",
                a, b, c
            ))),
            other => Err(LutError::Shape(format!(
                "expected 4 axes (3 spatial + channels), got {}",
                other.len()
            ))),
        }
    }

    /// Flat storage.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable flat storage.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consumes the grid, returning its flat storage.
    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Flat offset of cell `[i, j, k]` in a cube of edge `size`.
    #[inline]
    fn offset(size: usize, i: usize, j: usize, k: usize) -> usize {
        ((i * size + j) * size + k) * CHANNELS
    }

    /// Reads cell `[i, j, k]`. Returns `None` for non-cube grids or
    /// out-of-range coordinates.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<[f64; 3]> {
        let n = self.cube_size().ok()?;
        if i >= n || j >= n || k >= n {
            return None;
        }
        let o = Self::offset(n, i, j, k);
        Some([self.data[o], self.data[o + 1], self.data[o + 2]])
    }

    /// Trilinear lookup of an RGB value in [0, 1] on a baked cube.
    ///
    /// Input is clamped to the grid domain. Fails if the grid is not a
    /// cube or has fewer than 2 samples per axis.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flim_lut::SampleGrid;
    /// use flim_math::Vec3;
    ///
    /// let grid = SampleGrid::linear(5).unwrap();
    /// let out = grid.sample(Vec3::new(0.3, 0.6, 0.9)).unwrap();
    /// assert!((out - Vec3::new(0.3, 0.6, 0.9)).map(f64::abs).max_element() < 1e-12);
    /// ```
    pub fn sample(&self, rgb: Vec3) -> LutResult<Vec3> {
        let size = self.cube_size()?;
        if size < 2 {
            return Err(LutError::Shape(format!(
                "sampling needs at least 2 samples per axis, got {}",
                size
            )));
        }
        let n = (size - 1) as f64;
        let p = rgb.clamp01() * n;

        let ri = (p.x.floor() as usize).min(size - 2);
        let gi = (p.y.floor() as usize).min(size - 2);
        let bi = (p.z.floor() as usize).min(size - 2);

        let rf = p.x - ri as f64;
        let gf = p.y - gi as f64;
        let bf = p.z - bi as f64;

        let at = |i: usize, j: usize, k: usize| {
            let o = Self::offset(size, i, j, k);
            Vec3::new(self.data[o], self.data[o + 1], self.data[o + 2])
        };

        let c00 = at(ri, gi, bi).lerp(at(ri + 1, gi, bi), rf);
        let c01 = at(ri, gi, bi + 1).lerp(at(ri + 1, gi, bi + 1), rf);
        let c10 = at(ri, gi + 1, bi).lerp(at(ri + 1, gi + 1, bi), rf);
        let c11 = at(ri, gi + 1, bi + 1).lerp(at(ri + 1, gi + 1, bi + 1), rf);

        let c0 = c00.lerp(c10, gf);
        let c1 = c01.lerp(c11, gf);

        Ok(c0.lerp(c1, bf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_layout_is_c_order() {
        let grid = SampleGrid::linear(3).unwrap();
        // channel fastest, then third spatial axis
        assert_eq!(&grid.data()[0..6], &[0.0, 0.0, 0.0, 0.0, 0.0, 0.5]);
        assert_eq!(grid.get(0, 2, 1), Some([0.0, 1.0, 0.5]));
    }

    #[test]
    fn test_linear_rejects_single_sample() {
        assert!(matches!(SampleGrid::linear(1), Err(LutError::InvalidSize(_))));
    }

    #[test]
    fn test_from_shape_vec_size_mismatch() {
        let err = SampleGrid::from_shape_vec(vec![2, 2, 2, 3], vec![0.0; 23]).unwrap_err();
        assert!(matches!(err, LutError::InvalidSize(_)));
    }

    #[test]
    fn test_cube_size_rejects_non_cubes() {
        let flat = SampleGrid::from_shape_vec(vec![2, 2, 3, 3], vec![0.0; 36]).unwrap();
        assert!(matches!(flat.cube_size(), Err(LutError::Shape(_))));

        let rgba = SampleGrid::from_shape_vec(vec![2, 2, 2, 4], vec![0.0; 32]).unwrap();
        assert!(matches!(rgba.cube_size(), Err(LutError::Shape(_))));

        let image = SampleGrid::from_shape_vec(vec![4, 4, 3], vec![0.0; 48]).unwrap();
        assert!(matches!(image.cube_size(), Err(LutError::Shape(_))));

        let empty = SampleGrid::from_shape_vec(vec![0, 0, 0, 3], vec![]).unwrap();
        assert!(matches!(empty.cube_size(), Err(LutError::Shape(_))));
    }

    #[test]
    fn test_single_cell_cube_is_valid() {
        let one = SampleGrid::from_shape_vec(vec![1, 1, 1, 3], vec![0.5; 3]).unwrap();
        assert_eq!(one.cube_size().unwrap(), 1);
        assert!(one.sample(Vec3::splat(0.5)).is_err());
    }

    #[test]
    fn test_sample_hits_grid_points() {
        let mut grid = SampleGrid::linear(3).unwrap();
        for v in grid.data_mut() {
            *v = *v * *v;
        }
        let out = grid.sample(Vec3::new(0.5, 1.0, 0.0)).unwrap();
        assert!((out - Vec3::new(0.25, 1.0, 0.0)).map(f64::abs).max_element() < 1e-12);
    }

    #[test]
    fn test_sample_clamps_domain() {
        let grid = SampleGrid::linear(2).unwrap();
        let out = grid.sample(Vec3::new(-1.0, 2.0, 0.5)).unwrap();
        assert!((out - Vec3::new(0.0, 1.0, 0.5)).map(f64::abs).max_element() < 1e-12);
    }
}
