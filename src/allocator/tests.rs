//! Allocator tests
//!
//! Organized by component:
//! - Global: system allocator passthrough
//! - Bump: fast path, arena growth, alignment, bookkeeping
//! - Arena: pool growth policy

use super::*;
use core::alloc::Layout;

fn layout(size: usize, align: usize) -> Layout {
    Layout::from_size_align(size, align).unwrap()
}

// ===== Global =====

#[test]
fn global_round_trip_block() {
    let l = layout(64, 8);
    let ptr = Global.allocate(l).expect("global alloc");
    assert_eq!(ptr.as_ptr() as usize % 8, 0);

    unsafe {
        core::ptr::write_bytes(ptr.as_ptr(), 0xAB, 64);
        assert_eq!(*ptr.as_ptr().add(63), 0xAB);
        Global.deallocate(ptr, l);
    }
}

#[test]
fn allocator_by_reference() {
    let bump = Bump::new();
    let by_ref = &bump;
    let ptr = by_ref.allocate(layout(16, 8)).expect("alloc through &Bump");
    assert_eq!(ptr.as_ptr() as usize % 8, 0);
    assert_eq!(bump.stats().live_blocks, 1);

    unsafe { by_ref.deallocate(ptr, layout(16, 8)) };
    assert_eq!(bump.stats().live_blocks, 0);
}

// ===== Bump =====

#[test]
fn bump_starts_empty() {
    let bump = Bump::new();
    let stats = bump.stats();
    assert_eq!(stats.total_allocated, 0);
    assert_eq!(stats.current_arena_remaining, 0);
    assert_eq!(stats.arenas, 0);
}

#[test]
fn bump_sequential_blocks_increase() {
    let bump = Bump::new();

    let a = bump.allocate(layout(64, 8)).expect("first");
    let b = bump.allocate(layout(64, 8)).expect("second");
    let c = bump.allocate(layout(64, 8)).expect("third");

    let addrs = [a.as_ptr() as usize, b.as_ptr() as usize, c.as_ptr() as usize];
    assert!(addrs[0] < addrs[1]);
    assert!(addrs[1] < addrs[2]);
    assert_eq!(bump.stats().arenas, 1);
}

#[test]
fn bump_respects_alignment() {
    let bump = Bump::new();

    for align in [1, 2, 4, 8, 16, 32, 64, 128, 256] {
        let ptr = bump.allocate(layout(24, align)).expect("aligned alloc");
        assert_eq!(ptr.as_ptr() as usize % align, 0, "not aligned to {}", align);
    }
}

#[test]
fn bump_large_block_gets_own_arena() {
    let bump = Bump::new();

    let size = 128 * 1024; // larger than the first arena
    let ptr = bump.allocate(layout(size, 8)).expect("large alloc");

    assert!(bump.stats().total_allocated >= size);
    unsafe {
        core::ptr::write_bytes(ptr.as_ptr(), 0xAA, size);
    }
}

#[test]
fn bump_tracks_live_blocks() {
    let bump = Bump::new();
    let l = layout(32, 8);

    let a = bump.allocate(l).unwrap();
    let b = bump.allocate(l).unwrap();
    assert_eq!(bump.stats().live_blocks, 2);

    unsafe {
        bump.deallocate(a, l);
        bump.deallocate(b, l);
    }
    assert_eq!(bump.stats().live_blocks, 0);
    // Memory stays with the arenas until the Bump drops
    assert!(bump.stats().total_allocated > 0);
}

#[test]
fn bump_many_small_blocks() {
    let bump = Bump::new();

    for _ in 0..10_000 {
        bump.allocate(layout(16, 8)).expect("small alloc");
    }

    let stats = bump.stats();
    assert!(stats.total_allocated >= 16 * 10_000);
    assert!(stats.arenas >= 2);
}

// ===== Arena =====

#[test]
fn arena_pool_doubles() {
    let mut pool = ArenaPool::new();
    assert!(pool.is_empty());

    let first = pool.grow().expect("first arena").size();
    let second = pool.grow().expect("second arena").size();

    assert_eq!(second, first * 2);
    assert_eq!(pool.total_allocated(), first + second);
    assert_eq!(pool.len(), 2);
}

#[test]
fn arena_pool_honors_minimum() {
    let mut pool = ArenaPool::new();
    let arena = pool.grow_with_min(1024 * 1024).expect("big arena");
    assert!(arena.size() >= 1024 * 1024);

    let (start, end) = arena.bounds();
    assert_eq!(end as usize - start as usize, arena.size());
}

#[test]
fn arena_pool_stops_doubling_at_ceiling() {
    let mut pool = ArenaPool::new();
    let sizes: Vec<usize> = (0..9).map(|_| pool.grow().expect("arena").size()).collect();

    assert_eq!(sizes[0], 64 * 1024);
    assert_eq!(sizes[6], 4 * 1024 * 1024);
    assert_eq!(sizes[7], sizes[6]);
    assert_eq!(sizes[8], sizes[6]);

    let (start, _) = pool.grow().expect("arena").bounds();
    assert_eq!(start as usize % 16, 0);
}
