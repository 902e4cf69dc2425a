//! # flim-transfer
//!
//! Display transfer functions for the encoded output of a film grid.
//!
//! Transfer functions convert between linear light values and encoded
//! values for display.
//!
//! # Terminology
//!
//! - **OETF** (Opto-Electronic Transfer Function): Linear -> Encoded
//! - **EOTF** (Electro-Optical Transfer Function): Encoded -> Linear
//!
//! # Supported Transfer Functions
//!
//! | Function | Use Case | Range |
//! |----------|----------|-------|
//! | [`gamma`] | Pure power law, "sRGB 2.2" displays | [0, 1] |
//! | [`srgb`] | Piecewise IEC 61966-2-1 | [0, 1] |
//!
//! # Usage
//!
//! ```rust
//! use flim_transfer::{gamma, srgb};
//!
//! let encoded = gamma::oetf_22(0.18);
//! let linear = gamma::eotf_22(encoded);
//! assert!((linear - 0.18).abs() < 1e-12);
//!
//! let encoded = srgb::oetf(0.18);
//! assert!(encoded > 0.46 && encoded < 0.47);
//! ```
//!
//! # Used By
//!
//! - `flim-film` - the final bulk encoding of a processed grid

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod gamma;
pub mod srgb;

pub use gamma::{gamma_eotf, gamma_oetf};
pub use srgb::{eotf as srgb_eotf, oetf as srgb_oetf};
