use log::debug;
use num_traits::AsPrimitive;
use rayon::prelude::*;

use gauss_iir_core::{blur_with_strategy, Shape};

use crate::{
    array::HostArray,
    error::ArrayError,
    params::{BatchStrategy, BlurParams},
};

/// Blur every plane of a stack of same-shaped planes in place.
///
/// The planes are laid out one after the other and each one is filtered independently
/// with the same parameters.
///
/// # Arguments
///
/// * `data` - The planes, modified in place.
/// * `shape` - The shape of one plane.
/// * `params` - The blur parameters.
///
/// # Errors
///
/// If the data length is not a multiple of the plane size.
pub fn blur_planes(
    data: &mut [f32],
    shape: &Shape,
    params: &BlurParams,
) -> Result<(), ArrayError> {
    let plane_len = shape.numel();
    if data.len() % plane_len != 0 {
        return Err(ArrayError::DataLengthMismatch(data.len(), plane_len));
    }

    let num_planes = data.len() / plane_len;
    debug!(
        "blurring {} plane(s) of {} with {:?}",
        num_planes,
        shape,
        params.batch_strategy()
    );

    let blur_plane = |plane: &mut [f32]| {
        blur_with_strategy(
            plane,
            shape,
            params.sigma(),
            params.numsteps(),
            params.strategy(),
        )
    };

    match params.batch_strategy() {
        BatchStrategy::Serial => data.chunks_exact_mut(plane_len).try_for_each(blur_plane)?,
        BatchStrategy::Parallel => data
            .par_chunks_exact_mut(plane_len)
            .try_for_each(blur_plane)?,
    }

    Ok(())
}

/// Blur the first `filter_dims` dimensions of a host array.
///
/// Every trailing dimension is a batch dimension: each plane spanned by the first
/// `filter_dims` dimensions is blurred independently. The imaginary part of a complex
/// array is blurred the same way as the real part.
///
/// # Arguments
///
/// * `src` - The host array, of any primitive numeric type.
/// * `filter_dims` - The number of leading dimensions to filter along.
/// * `params` - The blur parameters.
///
/// # Returns
///
/// A new single precision array with the dimensions of `src`.
///
/// # Errors
///
/// If the array has fewer than `filter_dims` dimensions.
pub fn gaussian_iir_nd<T>(
    src: &HostArray<T>,
    filter_dims: usize,
    params: &BlurParams,
) -> Result<HostArray<f32>, ArrayError>
where
    T: AsPrimitive<f32>,
{
    let dims = src.dims();
    if dims.len() < filter_dims {
        return Err(ArrayError::NotEnoughDimensions(filter_dims, dims.len()));
    }

    filter_host_array(src, &dims[..filter_dims], params)
}

/// Blur a host array as a batch of lines.
///
/// When the first dimension is larger than one, every column of that length is a line.
/// Otherwise all the elements form a single line, whatever the trailing dimensions.
///
/// # Example
///
/// ```rust
/// use gauss_iir_array::{gaussian_iir_1d, BlurParams, HostArray};
///
/// let row = HostArray::new(vec![1, 5], vec![0u8, 0, 100, 0, 0]).unwrap();
/// let out = gaussian_iir_1d(&row, &BlurParams::new(1.0, 4).unwrap()).unwrap();
///
/// assert_eq!(out.dims(), &[1, 5]);
/// assert!(out.real()[1] > 0.0);
/// ```
pub fn gaussian_iir_1d<T>(
    src: &HostArray<T>,
    params: &BlurParams,
) -> Result<HostArray<f32>, ArrayError>
where
    T: AsPrimitive<f32>,
{
    let dims = src.dims();
    let length = match dims {
        [first, ..] if *first > 1 => *first,
        [_, rest @ ..] => rest.iter().product(),
        [] => 1,
    };
    filter_host_array(src, &[length], params)
}

/// Blur a host array along its first two dimensions.
///
/// A one dimensional array is treated as a single column.
pub fn gaussian_iir_2d<T>(
    src: &HostArray<T>,
    params: &BlurParams,
) -> Result<HostArray<f32>, ArrayError>
where
    T: AsPrimitive<f32>,
{
    match src.dims() {
        [rows] => filter_host_array(src, &[*rows, 1], params),
        dims => filter_host_array(src, &dims[..2], params),
    }
}

/// Blur a host array along its first three dimensions.
///
/// # Errors
///
/// If the array has fewer than three dimensions.
pub fn gaussian_iir_3d<T>(
    src: &HostArray<T>,
    params: &BlurParams,
) -> Result<HostArray<f32>, ArrayError>
where
    T: AsPrimitive<f32>,
{
    gaussian_iir_nd(src, 3, params)
}

fn filter_host_array<T>(
    src: &HostArray<T>,
    plane_extents: &[usize],
    params: &BlurParams,
) -> Result<HostArray<f32>, ArrayError>
where
    T: AsPrimitive<f32>,
{
    let mut dst = src.to_f32();
    if dst.numel() == 0 {
        debug!("skipping empty array with dims {:?}", dst.dims());
        return Ok(dst);
    }

    let shape = Shape::new(plane_extents)?;

    let (real, imag) = dst.parts_mut();
    blur_planes(real, &shape, params)?;
    if let Some(imag) = imag {
        blur_planes(imag, &shape, params)?;
    }

    Ok(dst)
}
