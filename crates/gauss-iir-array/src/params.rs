use num_traits::AsPrimitive;

use gauss_iir_core::ExecutionStrategy;

use crate::{array::HostArray, error::ArrayError};

/// Number of cascaded passes used when the caller does not give one.
pub const DEFAULT_NUMSTEPS: usize = 4;

/// Controls how the independent planes of a batch are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchStrategy {
    /// Filter the planes one after the other.
    #[default]
    Serial,

    /// Filter the planes on the global Rayon thread pool.
    Parallel,
}

/// Validated parameters of a Gaussian blur.
///
/// # Examples
///
/// ```rust
/// use gauss_iir_array::{BlurParams, DEFAULT_NUMSTEPS};
///
/// let params = BlurParams::with_sigma(2.0).unwrap();
/// assert_eq!(params.sigma(), 2.0);
/// assert_eq!(params.numsteps(), DEFAULT_NUMSTEPS);
///
/// assert!(BlurParams::new(0.0, 4).is_err());
/// assert!(BlurParams::new(1.0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurParams {
    sigma: f32,
    numsteps: usize,
    strategy: ExecutionStrategy,
    batch_strategy: BatchStrategy,
}

impl BlurParams {
    /// Create new blur parameters.
    ///
    /// # Arguments
    ///
    /// * `sigma` - The standard deviation of the Gaussian in samples.
    /// * `numsteps` - The number of cascaded passes.
    ///
    /// # Errors
    ///
    /// If sigma is not strictly positive in single precision, or not finite, or if
    /// `numsteps` is not strictly positive.
    pub fn new(sigma: f64, numsteps: i64) -> Result<Self, ArrayError> {
        // the filter runs in single precision, so validate the narrowed value
        let sigma_f32 = sigma as f32;
        if !sigma_f32.is_finite() || sigma_f32 <= 0.0 {
            return Err(ArrayError::InvalidSigma(sigma));
        }

        if numsteps <= 0 {
            return Err(ArrayError::InvalidNumSteps(numsteps));
        }

        Ok(Self {
            sigma: sigma_f32,
            numsteps: numsteps as usize,
            strategy: ExecutionStrategy::default(),
            batch_strategy: BatchStrategy::default(),
        })
    }

    /// Create new blur parameters with [`DEFAULT_NUMSTEPS`] passes.
    pub fn with_sigma(sigma: f64) -> Result<Self, ArrayError> {
        Self::new(sigma, DEFAULT_NUMSTEPS as i64)
    }

    /// Create new blur parameters from host scalars.
    ///
    /// Both parameters must be arrays holding exactly one element. A fractional number of
    /// steps is truncated toward zero before validation.
    ///
    /// # Arguments
    ///
    /// * `sigma` - A scalar array with the standard deviation.
    /// * `numsteps` - An optional scalar array with the number of passes, defaults to
    ///   [`DEFAULT_NUMSTEPS`].
    pub fn from_scalars<S, N>(
        sigma: &HostArray<S>,
        numsteps: Option<&HostArray<N>>,
    ) -> Result<Self, ArrayError>
    where
        S: AsPrimitive<f64>,
        N: AsPrimitive<f64>,
    {
        let sigma = scalar_value(sigma, "Sigma")?;
        let numsteps = match numsteps {
            Some(numsteps) => scalar_value(numsteps, "Number of steps")?.trunc() as i64,
            None => DEFAULT_NUMSTEPS as i64,
        };
        Self::new(sigma, numsteps)
    }

    /// Set the execution strategy used inside every plane.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set how the planes of a batch are dispatched.
    pub fn with_batch_strategy(mut self, batch_strategy: BatchStrategy) -> Self {
        self.batch_strategy = batch_strategy;
        self
    }

    /// The standard deviation of the Gaussian in samples.
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// The number of cascaded passes.
    pub fn numsteps(&self) -> usize {
        self.numsteps
    }

    /// The execution strategy used inside every plane.
    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    /// How the planes of a batch are dispatched.
    pub fn batch_strategy(&self) -> BatchStrategy {
        self.batch_strategy
    }
}

fn scalar_value<T: AsPrimitive<f64>>(
    array: &HostArray<T>,
    name: &'static str,
) -> Result<f64, ArrayError> {
    match (array.real(), array.is_complex()) {
        ([value], false) => Ok(value.as_()),
        _ => Err(ArrayError::NotAScalar(name, array.numel())),
    }
}
