use num_traits::AsPrimitive;

use gauss_iir_core::ShapeError;

use crate::error::ArrayError;

/// A dense host array, optionally complex.
///
/// Dimensions follow the column-major convention of numeric hosts: axis 0 is the fastest
/// varying axis in memory. A complex array stores its real and imaginary parts as two
/// separate planes of the same dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct HostArray<T> {
    dims: Vec<usize>,
    real: Vec<T>,
    imag: Option<Vec<T>>,
}

impl<T> HostArray<T> {
    /// Create a new real array.
    ///
    /// # Arguments
    ///
    /// * `dims` - The extent of every dimension, fastest first.
    /// * `data` - The elements of the array.
    ///
    /// # Errors
    ///
    /// If there are no dimensions or the data length does not match them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gauss_iir_array::HostArray;
    ///
    /// let array = HostArray::new(vec![3, 2], vec![1u8, 2, 3, 4, 5, 6]).unwrap();
    ///
    /// assert_eq!(array.dims(), &[3, 2]);
    /// assert_eq!(array.numel(), 6);
    /// assert!(!array.is_complex());
    /// ```
    pub fn new(dims: Vec<usize>, data: Vec<T>) -> Result<Self, ArrayError> {
        let numel = numel_from_dims(&dims)?;
        if data.len() != numel {
            return Err(ArrayError::DataLengthMismatch(data.len(), numel));
        }

        Ok(Self {
            dims,
            real: data,
            imag: None,
        })
    }

    /// Create a new complex array from its real and imaginary parts.
    ///
    /// # Errors
    ///
    /// If the parts have different lengths or do not match the dimensions.
    pub fn complex(dims: Vec<usize>, real: Vec<T>, imag: Vec<T>) -> Result<Self, ArrayError> {
        if real.len() != imag.len() {
            return Err(ArrayError::ComplexPartsMismatch(real.len(), imag.len()));
        }

        let mut array = Self::new(dims, real)?;
        array.imag = Some(imag);
        Ok(array)
    }

    /// Create a `1x1` array holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            dims: vec![1, 1],
            real: vec![value],
            imag: None,
        }
    }

    /// The extent of every dimension, fastest first.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of elements of each part.
    pub fn numel(&self) -> usize {
        self.real.len()
    }

    /// Whether the array has an imaginary part.
    pub fn is_complex(&self) -> bool {
        self.imag.is_some()
    }

    /// The real part of the array.
    pub fn real(&self) -> &[T] {
        &self.real
    }

    /// The imaginary part of the array, if any.
    pub fn imag(&self) -> Option<&[T]> {
        self.imag.as_deref()
    }

    /// Consume the array and return its dimensions, real part and imaginary part.
    pub fn into_parts(self) -> (Vec<usize>, Vec<T>, Option<Vec<T>>) {
        (self.dims, self.real, self.imag)
    }

    /// Convert every element to single precision.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gauss_iir_array::HostArray;
    ///
    /// let array = HostArray::new(vec![3], vec![1i16, -2, 300]).unwrap();
    /// assert_eq!(array.to_f32().real(), &[1.0, -2.0, 300.0]);
    /// ```
    pub fn to_f32(&self) -> HostArray<f32>
    where
        T: AsPrimitive<f32>,
    {
        let convert = |part: &[T]| part.iter().map(|v| v.as_()).collect::<Vec<f32>>();
        HostArray {
            dims: self.dims.clone(),
            real: convert(self.real.as_slice()),
            imag: self.imag.as_deref().map(convert),
        }
    }

    /// Mutable access to the real part and the optional imaginary part.
    pub(crate) fn parts_mut(&mut self) -> (&mut [T], Option<&mut [T]>) {
        (self.real.as_mut_slice(), self.imag.as_deref_mut())
    }
}

fn numel_from_dims(dims: &[usize]) -> Result<usize, ArrayError> {
    if dims.is_empty() {
        return Err(ArrayError::NoDimensions);
    }
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| ShapeError::NumelOverflow(dims.to_vec()).into())
}
