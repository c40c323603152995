//! C-style free-function aliases for test-harness drivers.
//!
//! Mirrors the source's `#ifdef DRIVER` block, which renames `malloc`/`free`/
//! `realloc`/`calloc` to `mm_malloc`/`mm_free`/`mm_realloc`/`mm_calloc` so a
//! trace-driven harness can exercise this allocator without colliding with
//! libc's own names. Only built behind the `mm-aliases` feature.
//!
//! The process-wide allocator instance is lazily initialized on first use,
//! the same way the source's `heap_listp == 0` check triggers `mm_init()`
//! from inside `malloc`/`free` rather than requiring an explicit call first.
//! This is global mutable state with no internal synchronization, matching
//! the single-mutator assumption the rest of the crate makes.

use std::cell::UnsafeCell;

use crate::allocator::SegFitAllocator;
use crate::arena::BufferArena;

struct GlobalCell(UnsafeCell<Option<SegFitAllocator<BufferArena>>>);

// Safety: access is only ever unsynchronized raw-pointer access from a
// single mutator, per the crate's concurrency model; there is no actual
// cross-thread sharing being made sound here.
unsafe impl Sync for GlobalCell {}

static ALLOCATOR: GlobalCell = GlobalCell(UnsafeCell::new(None));

unsafe fn allocator() -> &'static mut SegFitAllocator<BufferArena> {
  unsafe {
    let slot = &mut *ALLOCATOR.0.get();
    if slot.is_none() {
      *slot = Some(SegFitAllocator::new().expect("arena exhausted during mm_init"));
    }
    slot.as_mut().unwrap()
  }
}

/// # Safety
/// Same obligations as [`SegFitAllocator::alloc`].
pub unsafe fn mm_malloc(size: usize) -> *mut u8 {
  unsafe { allocator().alloc(size) }
}

/// # Safety
/// Same obligations as [`SegFitAllocator::free`].
pub unsafe fn mm_free(ptr: *mut u8) {
  unsafe { allocator().free(ptr) }
}

/// # Safety
/// Same obligations as [`SegFitAllocator::realloc`].
pub unsafe fn mm_realloc(ptr: *mut u8, size: usize) -> *mut u8 {
  unsafe { allocator().realloc(ptr, size) }
}

/// # Safety
/// Same obligations as [`SegFitAllocator::calloc`].
pub unsafe fn mm_calloc(count: usize, size: usize) -> *mut u8 {
  unsafe { allocator().calloc(count, size) }
}
