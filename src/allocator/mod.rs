//! Allocators consumed by `Owned` storage
//!
//! Design: the engine only needs "allocate a layout" and "free that block".
//! Two implementations ship with the crate:
//! 1. `Global` - the process allocator, one block per value
//! 2. `Bump` - bump pointer over a pool of arenas, freed in bulk on drop

mod arena;
mod bump;

#[cfg(test)]
mod tests;

pub use arena::{Arena, ArenaPool};
pub use bump::{Bump, BumpStats};

use core::alloc::Layout;
use core::ptr::NonNull;

/// Raw storage provider
///
/// Implementations never see the values placed in their blocks. Zero-sized
/// layouts are never requested.
pub trait RawAlloc {
    /// Allocate a block for `layout`, `None` when exhausted
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Release a block previously returned by `allocate`
    ///
    /// # Safety
    /// `ptr` must come from `allocate` on this allocator with the same
    /// `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: RawAlloc + ?Sized> RawAlloc for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).deallocate(ptr, layout)
    }
}

/// The process-wide allocator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl RawAlloc for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() != 0, "zero-sized blocks are never requested");
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        std::alloc::dealloc(ptr.as_ptr(), layout)
    }
}
