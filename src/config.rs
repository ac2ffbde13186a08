// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::archparam::MAX_LANE_WIDTH;
use crate::threading;

/// Work distribution settings for one multiplication.
///
/// The defaults come from the environment when the `threading` feature is
/// enabled: `SQMATMUL_NUM_THREADS` (else the number of physical cores) and
/// `SQMATMUL_LANE_WIDTH` (else 4).
///
/// ```
/// use sqmatmul::MultiplyConfig;
///
/// let config = MultiplyConfig::new().with_workers(2).with_lane_width(8);
/// assert_eq!(config.workers(), 2);
/// assert_eq!(config.lane_width(), 8);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MultiplyConfig {
    workers: usize,
    lane_width: usize,
}

impl MultiplyConfig {
    /// The process wide default configuration
    pub fn new() -> Self {
        MultiplyConfig {
            workers: threading::default_workers(),
            lane_width: threading::default_lane_width(),
        }
    }

    /// Use `workers` workers.
    ///
    /// Workers beyond the number of lanes in a given product stay idle.
    /// Workers beyond the size of the thread pool share its threads.
    ///
    /// ***Panics*** if `workers` is zero.
    pub fn with_workers(mut self, workers: usize) -> Self {
        assert!(workers > 0, "worker count must be at least 1");
        self.workers = workers;
        self
    }

    /// Process `width` output columns together per lane.
    ///
    /// ***Panics*** unless `1 <= width <= MAX_LANE_WIDTH`.
    pub fn with_lane_width(mut self, width: usize) -> Self {
        assert!(width >= 1 && width <= MAX_LANE_WIDTH,
                "lane width must be in 1..={}, got {}", MAX_LANE_WIDTH, width);
        self.lane_width = width;
        self
    }

    /// Number of workers to split the lanes between
    pub fn workers(&self) -> usize { self.workers }

    /// Output columns per lane
    pub fn lane_width(&self) -> usize { self.lane_width }
}

impl Default for MultiplyConfig {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let config = MultiplyConfig::new().with_workers(3).with_lane_width(1);
        assert_eq!(config.workers(), 3);
        assert_eq!(config.lane_width(), 1);
        assert_eq!(MultiplyConfig::default(), MultiplyConfig::new());
    }

    #[test]
    #[should_panic(expected = "worker count")]
    fn zero_workers() {
        MultiplyConfig::new().with_workers(0);
    }

    #[test]
    #[should_panic(expected = "lane width")]
    fn lane_too_wide() {
        MultiplyConfig::new().with_lane_width(MAX_LANE_WIDTH + 1);
    }

    #[test]
    #[should_panic(expected = "lane width")]
    fn lane_empty() {
        MultiplyConfig::new().with_lane_width(0);
    }
}
