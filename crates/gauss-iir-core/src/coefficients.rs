/// Coefficients of the cascaded first-order recursive filter.
///
/// The values are derived in double precision and rounded to single precision,
/// which is the precision of the samples they are applied to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    /// Pole of the first-order recursion, strictly between 0 and 1.
    pub nu: f32,
    /// Scale applied to the first and last sample of a line before each sweep.
    ///
    /// It equals `1 / (1 - nu)` and reproduces a half-sample symmetric extension.
    pub boundary_scale: f32,
    /// Gain correction applied once to the whole buffer after all the axes.
    pub post_scale: f32,
}

impl Coefficients {
    /// Derive the filter coefficients.
    ///
    /// # Arguments
    ///
    /// * `sigma` - The standard deviation of the Gaussian in samples.
    /// * `numsteps` - The number of cascaded forward/backward passes.
    /// * `num_dims` - The number of axes the buffer is filtered along.
    ///
    /// # Returns
    ///
    /// The coefficients shared by every line of every axis.
    ///
    /// PRECONDITION: `sigma > 0` and `numsteps >= 1`.
    pub fn new(sigma: f32, numsteps: usize, num_dims: usize) -> Self {
        // the square root below cancels badly in single precision
        let sigma = f64::from(sigma);
        let lambda = (sigma * sigma) / (2.0 * numsteps as f64);
        let dnu = (1.0 + 2.0 * lambda - (1.0 + 4.0 * lambda).sqrt()) / (2.0 * lambda);

        Self {
            nu: dnu as f32,
            boundary_scale: (1.0 / (1.0 - dnu)) as f32,
            post_scale: (dnu / lambda).powf((numsteps * num_dims) as f64) as f32,
        }
    }
}
