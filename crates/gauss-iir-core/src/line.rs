//! Recursive line filters.
//!
//! One cascade step runs a causal sweep followed by an anti-causal sweep of the first-order
//! recursion `s[i] += nu * s[i -/+ 1]`. Before each sweep the sample the recursion starts
//! from is multiplied by the boundary scale, which is equivalent to extending the line
//! symmetrically to infinity. None of these filters applies the post scale.

use crate::coefficients::Coefficients;

/// Filter a contiguous line in place.
///
/// # Arguments
///
/// * `line` - The samples of the line.
/// * `coeffs` - The filter coefficients.
/// * `numsteps` - The number of cascaded forward/backward passes.
pub fn filter_line(line: &mut [f32], coeffs: &Coefficients, numsteps: usize) {
    let length = line.len();
    filter_line_strided(line, 1, length, coeffs, numsteps);
}

/// Filter a line whose samples are `stride` elements apart, in place.
///
/// # Arguments
///
/// * `data` - The buffer, starting at the first sample of the line.
/// * `stride` - The distance in elements between two consecutive samples.
/// * `length` - The number of samples on the line.
/// * `coeffs` - The filter coefficients.
/// * `numsteps` - The number of cascaded forward/backward passes.
///
/// PRECONDITION: `data` holds at least `(length - 1) * stride + 1` elements.
pub fn filter_line_strided(
    data: &mut [f32],
    stride: usize,
    length: usize,
    coeffs: &Coefficients,
    numsteps: usize,
) {
    let Some(last) = length.checked_sub(1) else {
        return;
    };
    debug_assert!(last * stride < data.len());

    let (nu, boundary_scale) = (coeffs.nu, coeffs.boundary_scale);
    let last = last * stride;

    for _ in 0..numsteps {
        data[0] *= boundary_scale;

        // causal
        let mut i = stride;
        while i <= last {
            data[i] += nu * data[i - stride];
            i += stride;
        }

        data[last] *= boundary_scale;

        // anti-causal
        let mut i = last;
        while i > 0 {
            data[i - stride] += nu * data[i];
            i -= stride;
        }
    }
}

/// Filter a bundle of neighbouring lines in place.
///
/// `rows[i]` holds sample `i` of every line in the bundle, so all the rows must have the
/// same width. Each line goes through exactly the same operations as with
/// [`filter_line_strided`], the rows only let the sweeps run over contiguous memory.
///
/// # Arguments
///
/// * `rows` - One row per sample index, one column per line.
/// * `coeffs` - The filter coefficients.
/// * `numsteps` - The number of cascaded forward/backward passes.
pub fn filter_lanes(rows: &mut [&mut [f32]], coeffs: &Coefficients, numsteps: usize) {
    let Some(last) = rows.len().checked_sub(1) else {
        return;
    };

    let (nu, boundary_scale) = (coeffs.nu, coeffs.boundary_scale);

    for _ in 0..numsteps {
        scale_row(&mut *rows[0], boundary_scale);

        // causal
        for i in 1..=last {
            let (prev, next) = rows.split_at_mut(i);
            accumulate_row(&mut *next[0], &*prev[i - 1], nu);
        }

        scale_row(&mut *rows[last], boundary_scale);

        // anti-causal
        for i in (0..last).rev() {
            let (head, tail) = rows.split_at_mut(i + 1);
            accumulate_row(&mut *head[i], &*tail[0], nu);
        }
    }
}

fn scale_row(row: &mut [f32], scale: f32) {
    row.iter_mut().for_each(|v| *v *= scale);
}

fn accumulate_row(dst: &mut [f32], src: &[f32], nu: f32) {
    dst.iter_mut().zip(src.iter()).for_each(|(d, &s)| *d += nu * s);
}
