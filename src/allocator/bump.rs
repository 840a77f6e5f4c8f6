//! Bump pointer allocation - O(1) fast path, bulk release
//!
//! `deallocate` is a no-op: blocks live until the `Bump` itself drops.
//! Suits many short-lived `Owned` instances created in one scope.

use super::arena::ArenaPool;
use super::RawAlloc;
use core::alloc::Layout;
use core::ptr::NonNull;
use parking_lot::Mutex;

/// Bump pointer state inside the current arena
struct Cursor {
    current: *mut u8,
    end: *mut u8,
}

impl Cursor {
    const fn empty() -> Self {
        Self {
            current: core::ptr::null_mut(),
            end: core::ptr::null_mut(),
        }
    }

    /// Returns None if the arena is exhausted (caller handles slow path)
    #[inline(always)]
    fn try_alloc(&mut self, size: usize, align: usize) -> Option<NonNull<u8>> {
        debug_assert!(align.is_power_of_two(), "alignment must be power of 2");

        if self.current.is_null() {
            return None;
        }

        let ptr = align_up(self.current as usize, align);
        let new_current = ptr.checked_add(size)?;

        if new_current <= self.end as usize {
            self.current = new_current as *mut u8;
            NonNull::new(ptr as *mut u8)
        } else {
            None
        }
    }

    #[inline]
    fn reset(&mut self, start: *mut u8, end: *mut u8) {
        debug_assert!(start <= end, "invalid arena bounds");
        self.current = start;
        self.end = end;
    }

    #[inline]
    fn remaining(&self) -> usize {
        (self.end as usize).saturating_sub(self.current as usize)
    }
}

struct State {
    cursor: Cursor,
    arenas: ArenaPool,
    live_blocks: usize,
}

/// Bump allocator over an arena pool
pub struct Bump {
    state: Mutex<State>,
}

// SAFETY: the raw cursor pointers only ever address arenas owned by the pool
// and are accessed under the mutex.
unsafe impl Send for Bump {}
unsafe impl Sync for Bump {}

impl Bump {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                cursor: Cursor::empty(),
                arenas: ArenaPool::new(),
                live_blocks: 0,
            }),
        }
    }

    pub fn stats(&self) -> BumpStats {
        let state = self.state.lock();
        BumpStats {
            total_allocated: state.arenas.total_allocated(),
            current_arena_remaining: state.cursor.remaining(),
            arenas: state.arenas.len(),
            live_blocks: state.live_blocks,
        }
    }
}

impl Default for Bump {
    fn default() -> Self {
        Self::new()
    }
}

impl RawAlloc for Bump {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        let mut state = self.state.lock();
        let (size, align) = (layout.size(), layout.align());

        let ptr = match state.cursor.try_alloc(size, align) {
            Some(ptr) => ptr,
            None => {
                // Slow path: new arena large enough for this block
                let (start, end) = state.arenas.grow_with_min(size.checked_add(align)?)?.bounds();
                state.cursor.reset(start, end);
                state.cursor.try_alloc(size, align)?
            }
        };

        state.live_blocks += 1;
        Some(ptr)
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        let mut state = self.state.lock();
        state.live_blocks = state.live_blocks.saturating_sub(1);
    }
}

/// Bump allocator statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BumpStats {
    pub total_allocated: usize,
    pub current_arena_remaining: usize,
    pub arenas: usize,
    /// Blocks handed out and not yet returned through `deallocate`
    pub live_blocks: usize,
}

/// Align address upward to next multiple of alignment
#[inline(always)]
const fn align_up(addr: usize, align: usize) -> usize {
    (addr.wrapping_add(align).wrapping_sub(1)) & !align.wrapping_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 8), 0);
        assert_eq!(align_up(1, 8), 8);
        assert_eq!(align_up(8, 8), 8);
        assert_eq!(align_up(9, 8), 16);
    }

    #[test]
    fn empty_cursor_refuses() {
        let mut cursor = Cursor::empty();
        assert!(cursor.try_alloc(8, 8).is_none());
        assert_eq!(cursor.remaining(), 0);
    }
}
