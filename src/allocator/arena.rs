//! Arenas backing the bump allocator
//!
//! The pool hands out 16-aligned blocks that start at 64 KiB and double up to
//! 4 MiB. A request larger than the next block gets a block of its own size.

use crate::logging::log_arena_grow;
use std::alloc::{alloc, dealloc, Layout};
use std::ptr::NonNull;

const FIRST_ARENA: usize = 64 * 1024;
const ARENA_CEILING: usize = 4 * 1024 * 1024;
const ARENA_ALIGN: usize = 16;

/// A single heap block, released on drop
pub struct Arena {
    base: NonNull<u8>,
    len: usize,
}

impl Arena {
    /// `None` when `size` does not form a layout or the heap refuses it
    pub fn new(size: usize) -> Option<Self> {
        let len = size.max(1);
        let base = NonNull::new(unsafe { alloc(Self::layout_for(len)?) })?;
        Some(Self { base, len })
    }

    fn layout_for(len: usize) -> Option<Layout> {
        Layout::from_size_align(len, ARENA_ALIGN).ok()
    }

    /// `[start, end)` of the block
    #[inline]
    pub fn bounds(&self) -> (*mut u8, *mut u8) {
        let start = self.base.as_ptr();
        (start, start.wrapping_add(self.len))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        // `new` already validated this layout
        if let Some(layout) = Self::layout_for(self.len) {
            unsafe { dealloc(self.base.as_ptr(), layout) };
        }
    }
}

/// Arenas acquired so far plus the size of the next one
pub struct ArenaPool {
    blocks: Vec<Arena>,
    next: usize,
}

impl ArenaPool {
    pub fn new() -> Self {
        Self { blocks: Vec::new(), next: FIRST_ARENA }
    }

    pub fn grow(&mut self) -> Option<&Arena> {
        self.grow_with_min(0)
    }

    /// Add an arena of at least `min` bytes
    ///
    /// An oversized arena still advances the doubling schedule by one step.
    pub fn grow_with_min(&mut self, min: usize) -> Option<&Arena> {
        let arena = Arena::new(self.next.max(min))?;
        log_arena_grow(arena.size(), self.blocks.len() + 1);

        self.next = self.next.saturating_mul(2).min(ARENA_CEILING);
        self.blocks.push(arena);
        self.blocks.last()
    }

    pub fn total_allocated(&self) -> usize {
        self.blocks.iter().map(Arena::size).sum()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Default for ArenaPool {
    fn default() -> Self {
        Self::new()
    }
}
