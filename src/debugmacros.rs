// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// debug-build tracing, compiled out in release
#[cfg(debug_assertions)]
macro_rules! dprint {
    ($($t:tt)*) => {
        println!($($t)*)
    }
}

#[cfg(not(debug_assertions))]
macro_rules! dprint {
    ($($t:tt)*) => {
    }
}
