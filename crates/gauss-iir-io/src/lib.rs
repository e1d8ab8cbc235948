#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access, encoding and decoding failures.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image_planar`] for automatic format detection.
pub mod functional;

/// Planar single precision images.
pub mod planar;

pub use crate::error::IoError;
pub use crate::functional::{read_image_planar, write_image_planar, DEFAULT_JPEG_QUALITY};
pub use crate::planar::PlanarImage;
