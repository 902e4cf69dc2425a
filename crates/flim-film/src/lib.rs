//! # flim-film
//!
//! Analog film emulation baked into 3D LUT grids.
//!
//! Scene-linear color is exposed onto a simulated color negative, the
//! negative is printed onto a simulated print stock, and the result is
//! normalized, tinted and encoded for display. The whole chain is a pure
//! function of one RGB triplet, sampled on a regular grid.
//!
//! # Modules
//!
//! - [`SuperSigmoid`] / [`curve`] - toe/line/shoulder response curve
//! - [`extension_matrix`] - gamut extension around film formation
//! - [`develop`] - dye layers and one film pass
//! - [`RunState`] - calibration and everything derived before sampling
//! - [`uniform_offset`] - ratio-preserving black/white point remap
//! - [`transform`] - the per-sample pipeline
//! - [`apply`] / [`apply_with`] - the grid traversal engine
//!
//! # Usage
//!
//! ```rust
//! use flim_film::{apply_with, ApplyOptions, Configuration};
//! use flim_lut::SampleGrid;
//!
//! let grid = SampleGrid::linear(9).unwrap();
//! let options = ApplyOptions { workers: 2, ..ApplyOptions::default() };
//! let baked = apply_with(&grid, &Configuration::default(), &options).unwrap();
//! assert_eq!(baked.cube_size().unwrap(), 9);
//! ```
//!
//! Point queries without a grid:
//!
//! ```rust
//! use flim_film::{Configuration, FilmProcessor};
//! use flim_math::Vec3;
//!
//! let film = FilmProcessor::new(Configuration::default()).unwrap();
//! let gray = film.transform_scene_linear(Vec3::splat(0.18));
//! assert!(gray.x > 0.2 && gray.x < 0.8);
//! ```
//!
//! # Logging
//!
//! Runs emit `tracing` events (`info` at start, `debug` for the calibrated
//! run state and optional per-slice progress). No subscriber is installed.
//!
//! # Dependencies
//!
//! - `flim-math` - vectors, matrices, HSV
//! - `flim-lut` - grid storage and log2 allocation
//! - `flim-transfer` - display encodings
//! - [`rayon`] - worker pool
//! - [`serde`] - configuration (de)serialization
//! - [`thiserror`] - Error handling
//! - [`tracing`] - run logging

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod calibrate;
mod config;
mod curve;
mod develop;
mod engine;
mod error;
mod gamut;
mod offset;
mod pipeline;

pub use calibrate::{CALIBRATION_WHITE, RunState};
pub use config::{
    BlackPoint, Configuration, DisplayEncoding, FilmStock, GamutExtension, ResponseCurve,
};
pub use curve::{SuperSigmoid, curve};
pub use develop::{CharacteristicCurve, DyeLayer, LAYERS, develop, dye_layer};
pub use engine::{ApplyOptions, apply, apply_with};
pub use error::{FlimError, FlimResult};
pub use gamut::extension_matrix;
pub use offset::{MONO_EPSILON, uniform_offset};
pub use pipeline::{FilmProcessor, transform};
