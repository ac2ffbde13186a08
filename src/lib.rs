// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//!
//! Multithreaded matrix multiplication for dense square `f32` matrices.
//!
//! ## Matrix Representation
//!
//! A matrix of dimension *n* is a slice of *n × n* elements in row major
//! order: element *i, j* is at index `i * n + j`. The caller owns all three
//! matrices; the product is written into the output, overwriting it.
//!
//! ```
//! use sqmatmul::multiply;
//!
//! let n = 64;
//! let a = vec![1.; n * n];
//! let b = vec![2.; n * n];
//! let mut c = vec![0.; n * n];
//!
//! multiply(&a, &b, &mut c, n);
//! assert!(c.iter().all(|&x| x == 128.));
//! ```
//!
//! ## Algorithm
//!
//! The columns of the output are split in *lanes* of a few (by default 4)
//! adjacent columns. A lane's columns of B are gathered into a small
//! contiguous panel, and each row of A is then read once and dotted with
//! every column of the panel. Lanes are dealt out round robin to a fixed
//! number of workers, each of which owns its columns of C outright, so no
//! synchronization is needed beyond joining the workers at the end.
//!
//! Every element of C is summed sequentially over the shared dimension,
//! so the result does not depend on the worker count or lane width.
//!
//! ## Configuration
//!
//! [`MultiplyConfig`] selects the worker count and lane width per call.
//! With the `threading` feature (on by default) the process defaults are
//! read once from the environment:
//!
//! - `SQMATMUL_NUM_THREADS`: workers and pool threads, else the number of
//!   physical cores
//! - `SQMATMUL_LANE_WIDTH`: lane width in `1..=MAX_LANE_WIDTH`, else 4
//!
//! Without `threading`, workers run one after another on the calling thread.
//!
//! With the `constconf` feature the panel depth can be set at build time
//! with `SQMATMUL_KC`.
//!
//! ## Other Notes
//!
//! The functions in this crate are thread safe, as long as the destination
//! matrix is distinct.

extern crate rawpointer;

#[macro_use] mod debugmacros;
mod archparam;
#[cfg(any(test, feature = "constconf"))]
mod constparse;
mod config;
mod kernel;
mod multiply;
mod ptr;
mod threading;
mod util;

pub use crate::archparam::MAX_LANE_WIDTH;
pub use crate::config::MultiplyConfig;
pub use crate::multiply::{multiply, multiply_with, sgemm_square, sgemm_square_with};
