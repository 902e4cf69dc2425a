//! Grid traversal engine.
//!
//! Runs the film transform over every cell of a cubic sample grid:
//!
//! 1. Validate the grid shape
//! 2. Derive the run state from the configuration
//! 3. Decompress every cell from the log2 domain and apply pre-exposure
//! 4. Transform every cell in a scoped worker pool
//! 5. Apply the display encoding
//!
//! Cells are independent, so the pool maps over disjoint 3-value chunks of
//! the output buffer. Every cell is written by exactly one task, which
//! makes the output identical for any worker count.
//!
//! # Example
//!
//! ```rust
//! use flim_film::{apply, Configuration};
//! use flim_lut::SampleGrid;
//!
//! let grid = SampleGrid::linear(5).unwrap();
//! let baked = apply(&grid, &Configuration::default()).unwrap();
//! assert_eq!(baked.shape(), grid.shape());
//! assert!(baked.data().iter().all(|v| (0.0..=1.0).contains(v)));
//! ```

use crate::calibrate::RunState;
use crate::config::Configuration;
use crate::pipeline::transform;
use crate::{FlimError, FlimResult};
use flim_lut::{CHANNELS, Lg2Allocation, SampleGrid};
use flim_math::Vec3;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Per-call engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Spread cells over a worker pool. When false one worker is used.
    pub parallel: bool,
    /// Pool size; 0 uses the available hardware parallelism.
    pub workers: usize,
    /// Log each completed slice at debug level.
    pub progress: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            workers: 0,
            progress: false,
        }
    }
}

impl ApplyOptions {
    /// Single worker.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Fixed pool size.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    /// Number of worker threads this call will use.
    pub fn worker_count(&self) -> usize {
        if !self.parallel {
            1
        } else if self.workers > 0 {
            self.workers
        } else {
            std::thread::available_parallelism().map_or(1, |n| n.get())
        }
    }
}

/// Bakes `config` into a copy of `grid` with default options.
///
/// See [`apply_with`].
pub fn apply(grid: &SampleGrid, config: &Configuration) -> FlimResult<SampleGrid> {
    apply_with(grid, config, &ApplyOptions::default())
}

/// Bakes `config` into a copy of `grid`.
///
/// `grid` must be a `(n, n, n, 3)` cube holding values in the compressed
/// log2 domain (usually [`SampleGrid::linear`]). The result has the same
/// shape and holds display-encoded values in [0, 1].
///
/// # Errors
///
/// - [`FlimError::Shape`] if the grid is not a cube of RGB triplets
/// - [`FlimError::InvalidConfiguration`] if `config` does not validate
/// - [`FlimError::NonFinite`] if any cell holds or produces NaN/inf; no
///   partial output is returned
/// - [`FlimError::ThreadPool`] if the worker pool cannot be created
pub fn apply_with(
    grid: &SampleGrid,
    config: &Configuration,
    options: &ApplyOptions,
) -> FlimResult<SampleGrid> {
    let size = grid.cube_size()?;
    let state = RunState::new(config)?;
    let alloc = Lg2Allocation::new(config.lut_compress_log2_min, config.lut_compress_log2_max)?;
    let workers = options.worker_count();

    info!(
        size,
        workers,
        pre_exposure = config.pre_exposure,
        black_point = state.black_point(),
        "Baking film grid"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("flim-worker-{}", index))
        .build()?;

    let gain = config.pre_exposure.exp2();
    let slice_cells = size * size;
    let done = AtomicUsize::new(0);

    let data = pool.install(|| -> FlimResult<Vec<f64>> {
        let mut data = grid.data().to_vec();

        data.par_chunks_mut(CHANNELS)
            .enumerate()
            .try_for_each(|(index, cell)| {
                for v in cell.iter_mut() {
                    if !v.is_finite() {
                        return Err(non_finite(index, size, *v));
                    }
                    *v = alloc.decode(*v) * gain;
                }
                Ok(())
            })?;

        data.par_chunks_mut(CHANNELS)
            .enumerate()
            .try_for_each(|(index, cell)| {
                let out = transform(Vec3::new(cell[0], cell[1], cell[2]), config, &state);
                if let Some(&bad) = out.to_array().iter().find(|v| !v.is_finite()) {
                    return Err(non_finite(index, size, bad));
                }
                cell.copy_from_slice(&out.to_array());

                if options.progress {
                    let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if finished % slice_cells == 0 {
                        debug!(slice = finished / slice_cells, of = size, "Slice done");
                    }
                }
                Ok(())
            })?;

        data.par_iter_mut()
            .for_each(|v| *v = config.display.encode(*v));

        Ok(data)
    })?;

    debug!(cells = size * size * size, "Film grid baked");

    Ok(SampleGrid::from_shape_vec(grid.shape().to_vec(), data)?)
}

/// Cell coordinate of flat cell `index` in a cube of edge `size`.
fn cell_of(index: usize, size: usize) -> [usize; 3] {
    [index / (size * size), (index / size) % size, index % size]
}

fn non_finite(index: usize, size: usize, value: f64) -> FlimError {
    FlimError::NonFinite {
        cell: cell_of(index, size),
        value,
    }
}
