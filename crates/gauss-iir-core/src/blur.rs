use log::debug;

use crate::{
    coefficients::Coefficients,
    error::FilterError,
    line::filter_line_strided,
    parallel::{
        par_filter_contiguous_lines, par_filter_interleaved_lines, par_scale, ExecutionStrategy,
    },
    shape::{AxisLayout, Shape},
};

/// Blur a buffer in place with a recursive approximation of a Gaussian.
///
/// Uses [`ExecutionStrategy::Auto`]. For explicit control, use [`blur_with_strategy`].
///
/// # Arguments
///
/// * `data` - The samples of one plane, fastest axis first, modified in place.
/// * `shape` - The extents of the plane.
/// * `sigma` - The standard deviation of the Gaussian in samples.
/// * `numsteps` - The number of cascaded passes, more steps implies better accuracy.
///
/// A `sigma` that is not strictly positive, or zero `numsteps`, leaves the buffer untouched.
///
/// # Errors
///
/// If the buffer length is not the element count of `shape`.
///
/// # Example
///
/// ```rust
/// use gauss_iir_core::{blur, Shape};
///
/// let mut data = vec![0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 0.0];
/// blur(&mut data, &Shape::new(&[9]).unwrap(), 1.5, 4).unwrap();
///
/// assert!(data[4] < 10.0);
/// assert!(data[4] > data[3] && data[4] > data[5]);
/// ```
pub fn blur(
    data: &mut [f32],
    shape: &Shape,
    sigma: f32,
    numsteps: usize,
) -> Result<(), FilterError> {
    blur_with_strategy(data, shape, sigma, numsteps, ExecutionStrategy::Auto)
}

/// Blur a buffer in place with execution strategy control.
///
/// The axes are filtered one after the other, fastest axis first. All the lines of an
/// axis are done before the next axis starts, and the gain correction is applied once
/// at the end.
///
/// # Arguments
///
/// * `data` - The samples of one plane, fastest axis first, modified in place.
/// * `shape` - The extents of the plane.
/// * `sigma` - The standard deviation of the Gaussian in samples.
/// * `numsteps` - The number of cascaded passes.
/// * `strategy` - The execution strategy: `Auto`, `Serial`, `Parallel` or `Fixed`.
pub fn blur_with_strategy(
    data: &mut [f32],
    shape: &Shape,
    sigma: f32,
    numsteps: usize,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    if data.len() != shape.numel() {
        return Err(FilterError::BufferSizeMismatch(data.len(), shape.numel()));
    }

    if sigma.is_nan() || sigma <= 0.0 || numsteps == 0 {
        return Ok(());
    }

    let parallel = strategy.is_parallel(data.len());
    debug!(
        "blur {} sigma={} numsteps={} parallel={}",
        shape, sigma, numsteps, parallel
    );

    let coeffs = Coefficients::new(sigma, numsteps, shape.ndim());

    strategy.install(|| {
        for layout in shape.axes() {
            if parallel {
                filter_axis_parallel(data, layout, &coeffs, numsteps);
            } else {
                filter_axis_serial(data, layout, &coeffs, numsteps);
            }
        }

        if parallel {
            par_scale(data, coeffs.post_scale);
        } else {
            data.iter_mut().for_each(|v| *v *= coeffs.post_scale);
        }
    })
}

fn filter_axis_serial(
    data: &mut [f32],
    layout: AxisLayout,
    coeffs: &Coefficients,
    numsteps: usize,
) {
    for offset in layout.line_offsets() {
        filter_line_strided(
            &mut data[offset..],
            layout.stride,
            layout.extent,
            coeffs,
            numsteps,
        );
    }
}

fn filter_axis_parallel(
    data: &mut [f32],
    layout: AxisLayout,
    coeffs: &Coefficients,
    numsteps: usize,
) {
    if layout.stride == 1 {
        par_filter_contiguous_lines(data, layout, coeffs, numsteps);
    } else {
        par_filter_interleaved_lines(data, layout, coeffs, numsteps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_blur_impulse() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = vec![0.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.0, 0.0, 0.0];
        blur(&mut data, &Shape::new(&[9])?, 1.5, 4)?;

        let peak = data[4];
        assert!(peak < 10.0);
        assert!(peak > data[3] && peak > data[5]);

        // monotonic decay away from the center
        for i in 0..4 {
            assert!(data[i] < data[i + 1]);
            assert!(data[8 - i] < data[7 - i]);
        }

        // causal sweep first leaves a small asymmetry close to the edges
        for i in 0..4 {
            assert!((data[i] - data[8 - i]).abs() < 0.05);
        }

        let sum = data.iter().sum::<f32>();
        assert_relative_eq!(sum, 10.0, max_relative = 0.05);
        Ok(())
    }

    #[test]
    fn test_blur_noop_sigma() -> Result<(), Box<dyn std::error::Error>> {
        let shape = Shape::new(&[3, 2])?;
        let original = vec![1.0, -2.0, 3.5, 0.0, 7.0, 1e-3];

        for sigma in [0.0, -0.0, -1.0, f32::NAN, f32::NEG_INFINITY] {
            let mut data = original.clone();
            blur(&mut data, &shape, sigma, 4)?;
            let bits = |v: &[f32]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
            assert_eq!(bits(&data), bits(&original));
        }
        Ok(())
    }

    #[test]
    fn test_blur_noop_numsteps() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = vec![0.0, 1.0, 0.0];
        blur(&mut data, &Shape::new(&[3])?, 2.0, 0)?;
        assert_eq!(data, vec![0.0, 1.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_blur_size_mismatch() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = vec![1.0; 5];
        let res = blur(&mut data, &Shape::new(&[2, 3])?, 1.0, 3);
        assert_eq!(res, Err(FilterError::BufferSizeMismatch(5, 6)));
        assert_eq!(data, vec![1.0; 5]);
        Ok(())
    }

    #[test]
    fn test_blur_single_sample() -> Result<(), Box<dyn std::error::Error>> {
        let (sigma, numsteps) = (2.0, 3);
        let mut data = vec![5.0];
        blur(&mut data, &Shape::new(&[1])?, sigma, numsteps)?;

        let coeffs = Coefficients::new(sigma, numsteps, 1);
        let expected =
            5.0 * coeffs.boundary_scale.powi(2 * numsteps as i32) * coeffs.post_scale;
        assert_relative_eq!(data[0], expected, max_relative = 1e-5);
        Ok(())
    }

    #[test]
    fn test_blur_fixed_pool_error() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = vec![1.0; 4];
        let res = blur_with_strategy(
            &mut data,
            &Shape::new(&[4])?,
            1.0,
            2,
            ExecutionStrategy::Fixed(0),
        );
        assert_eq!(res, Err(FilterError::InvalidThreadCount(0)));
        Ok(())
    }
}
