//! # flim-math
//!
//! Math utilities for the film emulation pipeline.
//!
//! This crate provides the numeric primitives the film simulation is
//! written in:
//!
//! - [`Vec3`] - RGB triplets with component-wise arithmetic
//! - [`Mat3`] - 3x3 matrices for the gamut extension and its inverse
//! - Interpolation utilities ([`lerp`], [`remap`], [`remap_clamp`], [`wrap`])
//! - HSV conversions with normalized hue ([`rgb_to_hsv`], [`hsv_to_rgb`], [`hue_sat`])
//!
//! # Design
//!
//! All math is `f64`. Matrices are **row-major** and multiply **column
//! vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use flim_math::{Mat3, Vec3};
//!
//! let m = Mat3::from_rows([
//!     [0.9, 0.05, 0.05],
//!     [0.05, 0.9, 0.05],
//!     [0.05, 0.05, 0.9],
//! ]);
//! let inv = m.inverse().unwrap();
//! let rgb = Vec3::new(1.0, 0.5, 0.25);
//! let back = inv * (m * rgb);
//! assert!((back - rgb).map(f64::abs).max_element() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - matrix inversion and interop
//!
//! # Used By
//!
//! - `flim-lut` - grid sampling
//! - `flim-film` - the film simulation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod hsv;
mod interp;
mod mat3;
mod vec3;

pub use hsv::*;
pub use interp::*;
pub use mat3::*;
pub use vec3::*;
