use gauss_iir_core::{FilterError, ShapeError};

/// An error type for the array bindings.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ArrayError {
    /// Error when sigma is not a positive finite number.
    #[error("Sigma must be a positive scalar, got {0}")]
    InvalidSigma(f64),

    /// Error when the number of steps is not a positive integer.
    #[error("Number of steps must be a positive scalar, got {0}")]
    InvalidNumSteps(i64),

    /// Error when a parameter array holds more or less than one element.
    #[error("{0} must be a scalar, got an array with {1} elements")]
    NotAScalar(&'static str, usize),

    /// Error when the array has no dimensions.
    #[error("Array must have at least one dimension")]
    NoDimensions,

    /// Error when the data length does not match the dimensions.
    #[error("Data length ({0}) does not match the array dimensions ({1})")]
    DataLengthMismatch(usize, usize),

    /// Error when the real and imaginary parts have different lengths.
    #[error("Real part length ({0}) does not match imaginary part length ({1})")]
    ComplexPartsMismatch(usize, usize),

    /// Error when the array has fewer dimensions than the filter needs.
    #[error("Array should have at least {0} dimensions, got {1}")]
    NotEnoughDimensions(usize, usize),

    /// Error when the plane shape is not valid.
    #[error("Failed to create the plane shape. {0}")]
    InvalidShape(#[from] ShapeError),

    /// Error from the filtering engine.
    #[error("Failed to filter the array. {0}")]
    FilterError(#[from] FilterError),
}
