use rayon::prelude::*;

use crate::{
    coefficients::Coefficients,
    error::FilterError,
    line::{filter_lanes, filter_line},
    shape::AxisLayout,
};

/// Number of elements from which [`ExecutionStrategy::Auto`] switches to parallel execution.
pub const PARALLEL_THRESHOLD: usize = 1 << 16;

/// Number of neighbouring lines filtered together by one parallel task.
const LANE_TILE: usize = 256;

/// Controls how the lines of one axis pass are executed.
///
/// Whatever the strategy, an axis pass finishes before the next one starts and the
/// filtered buffer is the same bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Pick [`ExecutionStrategy::Parallel`] for buffers of at least [`PARALLEL_THRESHOLD`]
    /// elements and [`ExecutionStrategy::Serial`] otherwise.
    #[default]
    Auto,

    /// Run sequentially on the current thread, one line after the other.
    ///
    /// Useful for small buffers, debugging, or when the caller already runs
    /// several buffers in parallel.
    Serial,

    /// Use the global Rayon thread pool to filter the lines of an axis in parallel.
    ///
    /// Unlike [`ExecutionStrategy::Serial`], which filters in place without extra memory,
    /// every pass along an axis other than axis 0 allocates one slice handle per row of
    /// every tile, about `numel / 256 * extent` handles. The handles are freed when the
    /// pass ends.
    Parallel,

    /// Same as [`ExecutionStrategy::Parallel`], on a thread pool of `n` threads built
    /// for the call and dropped afterwards.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Whether a buffer with `numel` elements is filtered in parallel.
    pub fn is_parallel(&self, numel: usize) -> bool {
        match self {
            ExecutionStrategy::Auto => numel >= PARALLEL_THRESHOLD,
            ExecutionStrategy::Serial => false,
            ExecutionStrategy::Parallel | ExecutionStrategy::Fixed(_) => true,
        }
    }

    /// Run `op`, on a local thread pool for [`ExecutionStrategy::Fixed`].
    pub(crate) fn install<R, F>(&self, op: F) -> Result<R, FilterError>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match *self {
            ExecutionStrategy::Fixed(n) => {
                if n == 0 {
                    return Err(FilterError::InvalidThreadCount(n));
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| FilterError::ThreadPoolBuild(e.to_string()))?;
                Ok(pool.install(op))
            }
            _ => Ok(op()),
        }
    }
}

/// Filter every line along axis 0 in parallel, one task per contiguous line.
pub(crate) fn par_filter_contiguous_lines(
    data: &mut [f32],
    layout: AxisLayout,
    coeffs: &Coefficients,
    numsteps: usize,
) {
    data.par_chunks_mut(layout.extent)
        .for_each(|line| filter_line(line, coeffs, numsteps));
}

/// Filter every line along an axis with a stride larger than one in parallel.
///
/// Each block of interleaved lines is cut into column tiles of at most [`LANE_TILE`]
/// lines. A tile is a set of disjoint row slices, so tiles are filtered concurrently
/// without synchronization.
pub(crate) fn par_filter_interleaved_lines(
    data: &mut [f32],
    layout: AxisLayout,
    coeffs: &Coefficients,
    numsteps: usize,
) {
    let tiles_per_block = layout.stride.div_ceil(LANE_TILE);
    let mut bundles: Vec<Vec<&mut [f32]>> =
        Vec::with_capacity(layout.num_blocks * tiles_per_block);

    for block in data.chunks_mut(layout.block_len()) {
        let first = bundles.len();
        bundles.extend((0..tiles_per_block).map(|_| Vec::with_capacity(layout.extent)));

        for row in block.chunks_mut(layout.stride) {
            for (tile, lanes) in row.chunks_mut(LANE_TILE).enumerate() {
                bundles[first + tile].push(lanes);
            }
        }
    }

    bundles
        .into_par_iter()
        .for_each(|mut rows| filter_lanes(&mut rows, coeffs, numsteps));
}

/// Multiply every element by `scale` in parallel.
pub(crate) fn par_scale(data: &mut [f32], scale: f32) {
    data.par_iter_mut().for_each(|v| *v *= scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_parallel() {
        assert!(!ExecutionStrategy::Serial.is_parallel(usize::MAX));
        assert!(ExecutionStrategy::Parallel.is_parallel(1));
        assert!(ExecutionStrategy::Fixed(2).is_parallel(1));
        assert!(!ExecutionStrategy::Auto.is_parallel(PARALLEL_THRESHOLD - 1));
        assert!(ExecutionStrategy::Auto.is_parallel(PARALLEL_THRESHOLD));
        assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::Auto);
    }

    #[test]
    fn test_install_fixed() -> Result<(), FilterError> {
        let threads = ExecutionStrategy::Fixed(2).install(rayon::current_num_threads)?;
        assert_eq!(threads, 2);
        Ok(())
    }

    #[test]
    fn test_install_fixed_error() {
        let res = ExecutionStrategy::Fixed(0).install(|| ());
        assert_eq!(res, Err(FilterError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_interleaved_lines_wide_block() {
        // more lanes than a single tile holds
        let layout = AxisLayout {
            extent: 3,
            stride: LANE_TILE + 5,
            num_blocks: 2,
        };
        let coeffs = Coefficients::new(1.0, 2, 2);

        let data = (0..layout.block_len() * layout.num_blocks)
            .map(|i| (i % 13) as f32)
            .collect::<Vec<_>>();

        let mut expected = data.clone();
        for offset in layout.line_offsets() {
            crate::line::filter_line_strided(
                &mut expected[offset..],
                layout.stride,
                layout.extent,
                &coeffs,
                2,
            );
        }

        let mut actual = data;
        par_filter_interleaved_lines(&mut actual, layout, &coeffs, 2);
        assert_eq!(actual, expected);
    }
}
