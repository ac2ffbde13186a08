// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// A raw pointer into one of the caller's matrices that can be handed to
/// the worker threads.
///
/// Workers only read through the `*const` pointers and write through the
/// `*mut` pointer to columns they own, so sharing is sound as long as the
/// lane partition is disjoint.
#[derive(Copy, Clone)]
pub(crate) struct Ptr<T>(T);

unsafe impl<T> Sync for Ptr<*const T> {}
unsafe impl<T> Send for Ptr<*const T> {}
unsafe impl<T> Sync for Ptr<*mut T> {}
unsafe impl<T> Send for Ptr<*mut T> {}

impl<T: Copy> Ptr<T> {
    /// Wrap a raw pointer
    #[inline(always)]
    pub(crate) fn new(ptr: T) -> Self { Ptr(ptr) }

    /// The wrapped raw pointer
    #[inline(always)]
    pub(crate) fn ptr(self) -> T { self.0 }
}
