// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tuning parameters
//!
//! With the `constconf` feature, values marked configurable can be set
//! from the build environment, for example `SQMATMUL_KC=512`.

macro_rules! conf_val {
    ($(#[$m:meta])* $name:ident, $env:literal, $default:expr) => {
        $(#[$m])*
        #[cfg(feature = "constconf")]
        pub(crate) const $name: usize = match option_env!($env) {
            Some(s) => crate::constparse::parse_unwarp(s),
            None => $default,
        };

        $(#[$m])*
        #[cfg(not(feature = "constconf"))]
        pub(crate) const $name: usize = $default;
    };
}

conf_val! {
    /// Depth of a lane panel: rows of B gathered per block of the shared
    /// dimension. Configurable with `SQMATMUL_KC`.
    KC, "SQMATMUL_KC", 256
}

/// Widest supported lane
pub const MAX_LANE_WIDTH: usize = 8;

/// Default lane width, four `f32` columns
pub(crate) const LANE_WIDTH: usize = 4;

const _: () = assert!(KC > 0);
const _: () = assert!(LANE_WIDTH >= 1 && LANE_WIDTH <= MAX_LANE_WIDTH);
