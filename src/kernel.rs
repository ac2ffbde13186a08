// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use rawpointer::PointerExt;

use crate::archparam::{KC, MAX_LANE_WIDTH};
use crate::util::range_chunk;

/// Gather buffer for one lane: each row holds one column of B, `KC` deep.
pub(crate) type Panel = [[f32; KC]; MAX_LANE_WIDTH];

/// Compute the lane of `width` columns starting at column `col` of C.
///
/// + n: dimension of the square matrices
/// + a, b: row major inputs
/// + c: row major output, only columns `col..col + width` are written
/// + panel: scratch space owned by the calling worker
///
/// Dispatches to the lane kernel compiled for `width`.
#[inline]
pub(crate) unsafe fn lane(width: usize, n: usize,
                          a: *const f32, b: *const f32, c: *mut f32,
                          col: usize, panel: &mut Panel)
{
    debug_assert!(col + width <= n);
    match width {
        1 => lane_kernel::<1>(n, a, b, c, col, panel),
        2 => lane_kernel::<2>(n, a, b, c, col, panel),
        3 => lane_kernel::<3>(n, a, b, c, col, panel),
        4 => lane_kernel::<4>(n, a, b, c, col, panel),
        5 => lane_kernel::<5>(n, a, b, c, col, panel),
        6 => lane_kernel::<6>(n, a, b, c, col, panel),
        7 => lane_kernel::<7>(n, a, b, c, col, panel),
        8 => lane_kernel::<8>(n, a, b, c, col, panel),
        _ => unreachable!("unsupported lane width {}", width),
    }
}

/// Lane kernel for `NR` columns
///
/// C[k, col + j] ← Σ_l A[k, l] B[l, col + j]   for all rows k, j < NR
///
/// The shared dimension is walked in blocks of `KC`. For each block the
/// lane's columns of B are gathered into `panel`, then each row of A is
/// read once and dotted with all `NR` panel rows. Partial sums are parked
/// in C between blocks, which keeps the summation for every element in
/// plain sequential order.
#[inline(never)]
unsafe fn lane_kernel<const NR: usize>(n: usize,
                                       a: *const f32, b: *const f32, c: *mut f32,
                                       col: usize, panel: &mut Panel)
{
    let rs = n as isize;
    let b = b.add(col);
    let c = c.add(col);

    // LOOP 2: split the shared dimension in kc parts (A, B)
    for (l2, kc) in range_chunk(n, KC) {
        let a = a.stride_offset(1, KC * l2);
        let b = b.stride_offset(rs, KC * l2);

        // Pack B -> panel, transposed so each column is contiguous
        for l in 0..kc {
            let brow = b.stride_offset(rs, l);
            for j in 0..NR {
                panel[j][l] = *brow.add(j);
            }
        }

        // LOOP 1: through the rows of A while the panel is constant (A, C)
        for k in 0..n {
            let arow = a.stride_offset(rs, k);
            let crow = c.stride_offset(rs, k);

            let mut ab = [0f32; NR];
            if l2 != 0 {
                // continue the sums of the previous block
                for j in 0..NR {
                    ab[j] = *crow.add(j);
                }
            }
            for l in 0..kc {
                let x = *arow.add(l);
                for j in 0..NR {
                    ab[j] += panel[j][l] * x;
                }
            }
            for j in 0..NR {
                *crow.add(j) = ab[j];
            }
        }
    }
}
