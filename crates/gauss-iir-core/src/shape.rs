use crate::error::ShapeError;

/// Compute the strides of a dense buffer from its axis extents.
///
/// Axis 0 is contiguous and every following axis strides over all the previous ones.
///
/// # Examples
///
/// ```rust
/// use gauss_iir_core::shape::get_strides_from_extents;
///
/// // a 4x3 image stored row by row: x moves by 1, y moves by a full row
/// assert_eq!(get_strides_from_extents(&[4, 3]), vec![1, 4]);
///
/// // a 4x3x2 volume
/// assert_eq!(get_strides_from_extents(&[4, 3, 2]), vec![1, 4, 12]);
/// ```
pub fn get_strides_from_extents(extents: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(extents.len());
    let mut stride = 1;
    for &extent in extents {
        strides.push(stride);
        stride *= extent;
    }
    strides
}

/// Memory layout of the lines running along one axis of a buffer.
///
/// A buffer is a sequence of `num_blocks` blocks of `extent * stride` samples. Inside a
/// block there are `stride` interleaved lines, each visiting `extent` samples `stride`
/// elements apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisLayout {
    /// Number of samples on each line.
    pub extent: usize,
    /// Distance in elements between two consecutive samples of a line.
    pub stride: usize,
    /// Number of blocks of interleaved lines.
    pub num_blocks: usize,
}

impl AxisLayout {
    /// Number of elements spanned by one block of lines.
    pub fn block_len(&self) -> usize {
        self.extent * self.stride
    }

    /// Total number of lines along the axis.
    pub fn num_lines(&self) -> usize {
        self.num_blocks * self.stride
    }

    /// Iterate over the offset of the first sample of every line along the axis.
    ///
    /// Offsets are produced in increasing order.
    pub fn line_offsets(self) -> impl Iterator<Item = usize> {
        let block_len = self.block_len();
        let stride = self.stride;
        (0..self.num_blocks).flat_map(move |block| {
            let base = block * block_len;
            base..base + stride
        })
    }
}

/// The extents of a dense N-dimensional buffer.
///
/// The shape follows the image convention `[width, height, depth, ...]`: axis 0 is the
/// fastest varying axis in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    extents: Vec<usize>,
    strides: Vec<usize>,
    numel: usize,
}

impl Shape {
    /// Create a new shape.
    ///
    /// # Arguments
    ///
    /// * `extents` - The number of samples along each axis, fastest axis first.
    ///
    /// # Errors
    ///
    /// If there are no axes, any axis is empty or the element count overflows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gauss_iir_core::Shape;
    ///
    /// let shape = Shape::new(&[640, 480, 3]).unwrap();
    ///
    /// assert_eq!(shape.ndim(), 3);
    /// assert_eq!(shape.numel(), 640 * 480 * 3);
    /// assert_eq!(shape.strides(), &[1, 640, 640 * 480]);
    /// ```
    pub fn new(extents: &[usize]) -> Result<Self, ShapeError> {
        if extents.is_empty() {
            return Err(ShapeError::EmptyShape);
        }

        if let Some(axis) = extents.iter().position(|&extent| extent == 0) {
            return Err(ShapeError::ZeroExtent(axis));
        }

        let numel = extents
            .iter()
            .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
            .ok_or_else(|| ShapeError::NumelOverflow(extents.to_vec()))?;

        Ok(Self {
            extents: extents.to_vec(),
            strides: get_strides_from_extents(extents),
            numel,
        })
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.extents.len()
    }

    /// Number of elements of one plane with this shape.
    pub fn numel(&self) -> usize {
        self.numel
    }

    /// The extent of every axis, fastest axis first.
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// The stride of every axis, fastest axis first.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// The line layout along the given axis, `None` if the axis does not exist.
    pub fn axis(&self, axis: usize) -> Option<AxisLayout> {
        let extent = *self.extents.get(axis)?;
        let stride = self.strides[axis];
        Some(AxisLayout {
            extent,
            stride,
            num_blocks: self.numel / (extent * stride),
        })
    }

    /// Iterate over the line layout of every axis, fastest axis first.
    pub fn axes(&self) -> impl Iterator<Item = AxisLayout> + '_ {
        (0..self.ndim()).filter_map(|axis| self.axis(axis))
    }
}

impl TryFrom<Vec<usize>> for Shape {
    type Error = ShapeError;

    fn try_from(extents: Vec<usize>) -> Result<Self, Self::Error> {
        Shape::new(&extents)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let extents = self
            .extents
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("x");
        write!(f, "Shape {{ {} }}", extents)
    }
}
