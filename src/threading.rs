// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//!
//! Threading support functions and statics

#[cfg(feature="threading")]
use std::str::FromStr;
#[cfg(feature="threading")]
use once_cell::sync::Lazy;

#[cfg(feature="threading")]
pub use thread_tree::ThreadTree as ThreadPool;
#[cfg(feature="threading")]
pub use thread_tree::ThreadTreeCtx as ThreadPoolCtx;

use crate::archparam;

/// Dummy threadpool
#[cfg(not(feature="threading"))]
pub(crate) struct ThreadPool;

#[cfg(not(feature="threading"))]
pub(crate) type ThreadPoolCtx<'a> = &'a ();

#[cfg(not(feature="threading"))]
impl ThreadPool {
    /// Get top dummy thread pool context
    pub(crate) fn top(&self) -> ThreadPoolCtx<'_> { &() }
}

pub(crate) fn get_thread_pool<'a>() -> ThreadPoolCtx<'a> {
    REGISTRY.thread_pool().top()
}

/// Default number of workers per multiplication
pub(crate) fn default_workers() -> usize {
    REGISTRY.nthreads
}

/// Default lane width
pub(crate) fn default_lane_width() -> usize {
    REGISTRY.lane_width
}

struct Registry {
    nthreads: usize,
    lane_width: usize,
    #[cfg(feature="threading")]
    thread_pool: Box<ThreadPool>,
}

impl Registry {
    fn thread_pool(&self) -> &ThreadPool {
        #[cfg(feature="threading")]
        return &*self.thread_pool;
        #[cfg(not(feature="threading"))]
        return &ThreadPool;
    }
}

#[cfg(not(feature="threading"))]
const REGISTRY: &'static Registry = &Registry { nthreads: 1, lane_width: archparam::LANE_WIDTH };

#[cfg(feature="threading")]
static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let threads = workers_from(env_usize("SQMATMUL_NUM_THREADS"));
    let lane_width = lane_width_from(env_usize("SQMATMUL_LANE_WIDTH"));

    let tp = if threads <= 1 {
        Box::new(ThreadPool::new_level0())
    } else {
        ThreadPool::new_with_level(tree_level(threads))
    };

    Registry {
        nthreads: threads,
        lane_width,
        thread_pool: tp,
    }
});

/// Default worker count from the `SQMATMUL_NUM_THREADS` setting
#[cfg(feature="threading")]
fn workers_from(setting: Option<Result<usize, ()>>) -> usize {
    match setting {
        Some(Ok(nt)) => 1.max(nt),
        Some(Err(())) => {
            eprintln!("Failed to parse SQMATMUL_NUM_THREADS");
            1
        }
        None => num_cpus::get_physical(),
    }
}

/// Default lane width from the `SQMATMUL_LANE_WIDTH` setting
#[cfg(feature="threading")]
fn lane_width_from(setting: Option<Result<usize, ()>>) -> usize {
    match setting {
        Some(Ok(w)) => {
            let clamped = w.max(1).min(archparam::MAX_LANE_WIDTH);
            if clamped != w {
                eprintln!("SQMATMUL_LANE_WIDTH={} out of range 1..={}, using {}",
                          w, archparam::MAX_LANE_WIDTH, clamped);
            }
            clamped
        }
        Some(Err(())) => {
            eprintln!("Failed to parse SQMATMUL_LANE_WIDTH");
            archparam::LANE_WIDTH
        }
        None => archparam::LANE_WIDTH,
    }
}

/// Read a non-empty environment variable as usize
#[cfg(feature="threading")]
fn env_usize(name: &str) -> Option<Result<usize, ()>> {
    parse_setting(::std::env::var(name).ok().as_deref())
}

/// Parse a setting; unset and blank values count as absent
#[cfg(feature="threading")]
fn parse_setting(value: Option<&str>) -> Option<Result<usize, ()>> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => Some(usize::from_str(s).map_err(|_| ())),
        _otherwise => None,
    }
}

/// Levels of a thread tree with at least `threads` leaves
#[cfg(feature="threading")]
fn tree_level(threads: usize) -> usize {
    // the tree supports at most 12 levels
    let mut level = 0;
    while level < 12 && (1 << level) < threads {
        level += 1;
    }
    level
}

/// Run `f(worker)` for every worker in `0..nworkers` and return when all
/// of them have finished.
///
/// The worker range is split in halves recursively, and each half is
/// joined into the thread tree below `pool`. When the tree runs out of
/// threads the remaining workers run in turn on the leaf thread.
#[cfg(feature="threading")]
pub(crate) fn for_each_worker<F>(pool: ThreadPoolCtx<'_>, nworkers: usize, f: &F)
    where F: Fn(usize) + Sync
{
    fn split<F>(ctx: ThreadPoolCtx<'_>, start: usize, end: usize, f: &F)
        where F: Fn(usize) + Sync
    {
        if end - start <= 1 {
            if start < end {
                f(start);
            }
            return;
        }
        let mid = start + (end - start) / 2;
        ctx.join(|ctx| split(ctx, start, mid, f),
                 |ctx| split(ctx, mid, end, f));
    }

    split(pool, 0, nworkers, f)
}

#[cfg(not(feature="threading"))]
pub(crate) fn for_each_worker<F>(pool: ThreadPoolCtx<'_>, nworkers: usize, f: &F)
    where F: Fn(usize) + Sync
{
    let _ = pool;
    for worker in 0..nworkers {
        f(worker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn every_worker_runs_once() {
        for nworkers in 0..20 {
            let counts: Vec<AtomicUsize> = (0..nworkers).map(|_| AtomicUsize::new(0)).collect();
            for_each_worker(get_thread_pool(), nworkers, &|w| {
                counts[w].fetch_add(1, Ordering::SeqCst);
            });
            for (w, count) in counts.iter().enumerate() {
                assert_eq!(count.load(Ordering::SeqCst), 1, "worker {} of {}", w, nworkers);
            }
        }
    }

    #[test]
    fn registry_defaults_are_valid() {
        assert!(default_workers() >= 1);
        let w = default_lane_width();
        assert!(w >= 1 && w <= archparam::MAX_LANE_WIDTH);
    }

    #[cfg(feature="threading")]
    #[test]
    fn parse_settings() {
        assert_eq!(parse_setting(None), None);
        assert_eq!(parse_setting(Some("")), None);
        assert_eq!(parse_setting(Some("   ")), None);
        assert_eq!(parse_setting(Some("8")), Some(Ok(8)));
        assert_eq!(parse_setting(Some(" 3 ")), Some(Ok(3)));
        assert_eq!(parse_setting(Some("four")), Some(Err(())));
        assert_eq!(parse_setting(Some("-2")), Some(Err(())));
    }

    #[cfg(feature="threading")]
    #[test]
    fn workers_setting() {
        assert_eq!(workers_from(Some(Ok(0))), 1);
        assert_eq!(workers_from(Some(Ok(1))), 1);
        assert_eq!(workers_from(Some(Ok(99))), 99);
        assert_eq!(workers_from(Some(Err(()))), 1);
        assert_eq!(workers_from(None), num_cpus::get_physical());
        assert_eq!(workers_from(parse_setting(Some(" 3 "))), 3);
    }

    #[cfg(feature="threading")]
    #[test]
    fn lane_width_setting() {
        assert_eq!(lane_width_from(Some(Ok(0))), 1);
        assert_eq!(lane_width_from(Some(Ok(99))), archparam::MAX_LANE_WIDTH);
        assert_eq!(lane_width_from(Some(Ok(archparam::MAX_LANE_WIDTH))), archparam::MAX_LANE_WIDTH);
        assert_eq!(lane_width_from(Some(Ok(2))), 2);
        assert_eq!(lane_width_from(Some(Err(()))), archparam::LANE_WIDTH);
        assert_eq!(lane_width_from(None), archparam::LANE_WIDTH);
        assert_eq!(lane_width_from(parse_setting(Some(" 3 "))), 3);
    }

    #[cfg(feature="threading")]
    #[test]
    fn tree_levels() {
        assert_eq!(tree_level(1), 0);
        assert_eq!(tree_level(2), 1);
        assert_eq!(tree_level(3), 2);
        assert_eq!(tree_level(4), 2);
        assert_eq!(tree_level(8), 3);
        assert_eq!(tree_level(9), 4);
        assert_eq!(tree_level(1 << 20), 12);
    }
}
