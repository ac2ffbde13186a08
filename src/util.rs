// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::cmp::min;

#[derive(Copy, Clone)]
pub struct RangeChunk { i: usize, n: usize, chunk: usize }

/// Create an iterator that splits `n` in chunks of size `chunk`;
/// the last item can be an uneven chunk.
pub fn range_chunk(n: usize, chunk: usize) -> RangeChunk {
    debug_assert_ne!(chunk, 0);
    RangeChunk {
        i: 0,
        n,
        chunk,
    }
}

impl Iterator for RangeChunk {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.n == 0 {
            None
        } else {
            let i = self.i;
            let rem = min(self.n, self.chunk);
            self.i += 1;
            self.n -= rem;
            Some((i, rem))
        }
    }
}

/// Number of lanes of `width` columns needed to cover `n` columns
#[inline]
pub fn lane_count(n: usize, width: usize) -> usize {
    let mut d = n / width;
    d += (n % width != 0) as usize;
    d
}

/// Lanes owned by one worker, as `(first column, lane width)` pairs.
#[derive(Copy, Clone, Debug)]
pub struct LaneIter { col: usize, n: usize, width: usize, step: usize }

/// Create an iterator over the lanes of worker `index` out of `total`.
///
/// The columns `0..n` are split in lanes of `width` (the last one can be
/// narrower); lanes are dealt out round robin, so worker `index` starts at
/// column `index * width` and steps by `total * width`.
pub fn worker_lanes(n: usize, width: usize, index: usize, total: usize) -> LaneIter {
    debug_assert_ne!(width, 0);
    debug_assert!(index < total, "worker index {} out of range for {} workers", index, total);
    LaneIter {
        col: index * width,
        n,
        width,
        step: total * width,
    }
}

impl Iterator for LaneIter {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.col >= self.n {
            None
        } else {
            let col = self.col;
            let w = min(self.width, self.n - col);
            self.col = self.col.saturating_add(self.step);
            Some((col, w))
        }
    }
}
