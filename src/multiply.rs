// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::archparam::{KC, MAX_LANE_WIDTH};
use crate::config::MultiplyConfig;
use crate::kernel;
use crate::ptr::Ptr;
use crate::threading::{for_each_worker, get_thread_pool};
use crate::util::{lane_count, worker_lanes};

/// Square matrix multiplication (f32)
///
/// C ← A B
///
/// + n: dimension; A, B, C are n by n matrices
/// + a, b, c: row major matrices of `n * n` elements
///
/// The previous contents of `c` are overwritten. Uses the process default
/// configuration, see [`MultiplyConfig`].
///
/// ```
/// let a = [1., 2.,
///          3., 4.];
/// let b = [5., 6.,
///          7., 8.];
/// let mut c = [0.; 4];
/// sqmatmul::multiply(&a, &b, &mut c, 2);
/// assert_eq!(c, [19., 22.,
///                43., 50.]);
/// ```
///
/// ***Panics*** if any of the slices does not have exactly `n * n` elements.
pub fn multiply(a: &[f32], b: &[f32], c: &mut [f32], n: usize) {
    multiply_with(&MultiplyConfig::new(), a, b, c, n)
}

/// Square matrix multiplication (f32) with an explicit configuration
///
/// C ← A B
///
/// See [`multiply`].
///
/// ***Panics*** if any of the slices does not have exactly `n * n` elements.
pub fn multiply_with(config: &MultiplyConfig, a: &[f32], b: &[f32], c: &mut [f32], n: usize) {
    let len = match n.checked_mul(n) {
        Some(len) => len,
        None => panic!("dimension {} overflows the element count", n),
    };
    assert_eq!(a.len(), len, "A: expected {}x{}={} elements", n, n, len);
    assert_eq!(b.len(), len, "B: expected {}x{}={} elements", n, n, len);
    assert_eq!(c.len(), len, "C: expected {}x{}={} elements", n, n, len);

    unsafe {
        lane_loop(config, n, a.as_ptr(), b.as_ptr(), c.as_mut_ptr())
    }
}

/// Square matrix multiplication (f32), unchecked
///
/// C ← A B
///
/// + n: dimension; A, B, C are n by n matrices
/// + a, b, c: pointer to the first element of a row major matrix
///
/// # Safety
///
/// `a` and `b` must be valid for reads and `c` valid for writes of
/// `n * n` elements, and `c` must not overlap `a` or `b`.
/// C does not need to be initialized.
pub unsafe fn sgemm_square(n: usize, a: *const f32, b: *const f32, c: *mut f32) {
    sgemm_square_with(&MultiplyConfig::new(), n, a, b, c)
}

/// Square matrix multiplication (f32), unchecked, with an explicit
/// configuration
///
/// # Safety
///
/// See [`sgemm_square`].
pub unsafe fn sgemm_square_with(config: &MultiplyConfig, n: usize,
                                a: *const f32, b: *const f32, c: *mut f32)
{
    lane_loop(config, n, a, b, c)
}

/// Deal the lanes of C out to the workers and run them to completion.
unsafe fn lane_loop(config: &MultiplyConfig, n: usize,
                    a: *const f32, b: *const f32, c: *mut f32)
{
    if n == 0 {
        return;
    }
    debug_assert!(!a.is_null() && !b.is_null() && !c.is_null());

    let width = config.lane_width();
    debug_assert!(width >= 1 && width <= MAX_LANE_WIDTH);
    // workers without a lane would stay idle
    let nworkers = config.workers().min(lane_count(n, width));
    dprint!("multiply n={}, workers={}, lane_width={}, kc={}", n, nworkers, width, KC);

    let a = Ptr::new(a);
    let b = Ptr::new(b);
    let c = Ptr::new(c);

    for_each_worker(get_thread_pool(), nworkers, &|worker| {
        let mut panel = [[0.; KC]; MAX_LANE_WIDTH];
        for (col, w) in worker_lanes(n, width, worker, nworkers) {
            kernel::lane(w, n, a.ptr(), b.ptr(), c.ptr(), col, &mut panel);
        }
    });
}
