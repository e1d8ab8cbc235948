/// An error type for the shape of a buffer.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ShapeError {
    /// Error when the shape has no axes.
    #[error("Shape must have at least one axis")]
    EmptyShape,

    /// Error when an axis has no samples.
    #[error("Axis {0} has zero extent, every axis must hold at least one sample")]
    ZeroExtent(usize),

    /// Error when the number of elements does not fit in memory.
    #[error("Number of elements of shape {0:?} overflows usize")]
    NumelOverflow(Vec<usize>),
}

/// An error type for the filtering engine.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// Error when the buffer does not hold exactly one plane of the shape.
    #[error("Buffer length ({0}) does not match the shape element count ({1})")]
    BufferSizeMismatch(usize, usize),

    /// Error when the requested thread count is invalid.
    #[error("Thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// Error when the local thread pool failed to build.
    #[error("Failed to build thread pool: {0}")]
    ThreadPoolBuild(String),
}
