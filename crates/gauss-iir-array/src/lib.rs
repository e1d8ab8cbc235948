#![deny(missing_docs)]
//! Numeric array bindings for the recursive Gaussian filtering engine
//!
//! The bindings take care of everything the engine trusts its callers with: validating
//! the scalar parameters, converting host arrays of any primitive numeric type into
//! contiguous single precision planes, splitting trailing dimensions into independent
//! planes and filtering the imaginary part of complex arrays.

/// Dense host array representation.
pub mod array;

/// Error types for the array bindings.
pub mod error;

/// Gaussian blur operations on host arrays.
pub mod ops;

/// Validated blur parameters.
pub mod params;

pub use crate::array::HostArray;
pub use crate::error::ArrayError;
pub use crate::ops::{
    blur_planes, gaussian_iir_1d, gaussian_iir_2d, gaussian_iir_3d, gaussian_iir_nd,
};
pub use crate::params::{BatchStrategy, BlurParams, DEFAULT_NUMSTEPS};
