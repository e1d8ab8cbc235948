#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `gauss-iir-core` approximates convolution with a Gaussian by running a cascade of
//! first-order recursive filters forward and backward along every axis of a buffer
//! (Alvarez and Mazorra). The cost per sample does not depend on `sigma`.
//!
//! The crate is organized in four pieces:
//!
//! - **Coefficients**: the filter pole and gain factors derived from `(sigma, numsteps)`
//! - **Line filter**: the recursive forward/backward pass over one line of samples
//! - **Shape**: axis extents and strides of an N-dimensional buffer, axis 0 fastest
//! - **Blur**: the separable driver filtering every line along every axis
//!
//! # Quick Start
//!
//! ```rust
//! use gauss_iir_core::{blur, Shape};
//!
//! // a 4x3 image with a single bright pixel
//! let mut data = vec![0.0f32; 12];
//! data[5] = 1.0;
//!
//! let shape = Shape::new(&[4, 3]).unwrap();
//! blur(&mut data, &shape, 1.0, 4).unwrap();
//!
//! assert!(data[5] < 1.0);
//! assert!(data[4] > 0.0);
//! ```

/// Filter coefficients derived from the Gaussian parameters.
pub mod coefficients;

/// Error types for the filtering engine.
pub mod error;

/// Recursive line filters.
pub mod line;

/// Execution strategies for the axis passes.
pub mod parallel;

/// N-dimensional buffer layout.
pub mod shape;

mod blur;

pub use crate::blur::{blur, blur_with_strategy};
pub use crate::coefficients::Coefficients;
pub use crate::error::{FilterError, ShapeError};
pub use crate::parallel::ExecutionStrategy;
pub use crate::shape::{AxisLayout, Shape};
