//! # flim-lut
//!
//! Sample grid storage for film emulation 3D LUTs.
//!
//! # Types
//!
//! - [`SampleGrid`] - an n-dimensional lattice of `f64` values; the film
//!   engine accepts only cubes of RGB triplets, shape `(n, n, n, 3)`
//! - [`Lg2Allocation`] - the log2 compression that maps scene-linear
//!   values into the [0, 1] grid domain and back
//!
//! # Usage
//!
//! ```rust
//! use flim_lut::{Lg2Allocation, SampleGrid};
//!
//! let grid = SampleGrid::linear(17).unwrap();
//! assert_eq!(grid.shape(), &[17, 17, 17, 3]);
//! assert_eq!(grid.cube_size().unwrap(), 17);
//!
//! let alloc = Lg2Allocation::new(-10.0, 10.0).unwrap();
//! assert_eq!(alloc.decode(0.0), 0.0);
//! ```
//!
//! # Layout
//!
//! Storage is C order: the last axis (channel) varies fastest, then the
//! third spatial axis. Cell `[i, j, k]` of the linear grid holds
//! `(i, j, k) / (n - 1)`, so axis 0 indexes red.
//!
//! # Dependencies
//!
//! - `flim-math` - vector type for sampling
//! - [`thiserror`] - Error handling
//!
//! # Used By
//!
//! - `flim-film` - grid traversal engine

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod allocation;
mod error;
mod grid;

pub use allocation::Lg2Allocation;
pub use error::{LutError, LutResult};
pub use grid::{CHANNELS, SampleGrid};
