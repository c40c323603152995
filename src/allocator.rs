//! The client-facing allocator: `init`, `alloc`, `free`, `realloc`, `calloc`.
//!
//! `SegFitAllocator<A>` owns exactly three things: the arena it grows
//! through, the bucket-size table, and two pointers into the arena (the
//! bucket-array base and the prologue). Everything else — block metadata,
//! the free-list links, the search, the split, the coalesce, the heap
//! growth — lives in the sibling modules this one calls in sequence.
//!
//! ```text
//!   ┌─────────────┬──────────┬───────────────────────────┬───────────┐
//!   │ bucket array│ prologue │      block chain           │ epilogue  │
//!   │ (14 × ptr)  │ (8 bytes,│  (grows as the arena does) │ (0-size,  │
//!   │             │ allocated)│                            │ allocated)│
//!   └─────────────┴──────────┴───────────────────────────┴───────────┘
//!   ▲
//!   └── bucket_array, returned by `arena.extend_by` during `init`
//! ```
//!
//! # Thread Safety
//!
//! This allocator is **NOT** thread-safe, the same way the teacher crate's
//! bump allocator isn't: a single mutator is assumed throughout (see
//! `DESIGN.md`'s Open Question on `GlobalAlloc`).

use std::ptr;

use crate::arena::{Arena, BufferArena};
use crate::block;
use crate::coalesce;
use crate::error::ArenaError;
use crate::free_list;
use crate::heap_extend;
use crate::place;
use crate::search;
use crate::size_class::BucketConfig;

/// A segregated free-list, first-fit allocator over a pluggable [`Arena`].
///
/// Defaults to [`BufferArena`] — a deterministic, non-OS-touching arena —
/// the same way the bucket-size table defaults to [`BucketConfig::default`].
/// Swap in [`crate::arena::SbrkArena`] to grow the real process heap.
pub struct SegFitAllocator<A: Arena = BufferArena> {
  arena: A,
  config: BucketConfig,
  bucket_array: *mut u8,
  /// Payload pointer of the prologue sentinel — the fixed start of the
  /// block chain. Exposed read-only to [`crate::check`].
  heap_listp: *mut u8,
}

impl<A: Arena + Default> SegFitAllocator<A> {
  /// Builds a fresh allocator over a default-constructed arena and the
  /// default bucket table.
  pub fn new() -> Result<Self, ArenaError> {
    Self::with_config(A::default(), BucketConfig::default())
  }
}

impl<A: Arena> SegFitAllocator<A> {
  /// Builds a fresh allocator over a caller-supplied arena and bucket table.
  ///
  /// Lays down the bucket array, a one-word padding, the 8-byte allocated
  /// prologue, and the zero-size allocated epilogue, then performs one
  /// initial heap extension — mirroring `mm_init`.
  pub fn with_config(mut arena: A, config: BucketConfig) -> Result<Self, ArenaError> {
    let bucket_array = unsafe { arena.extend_by(free_list::bucket_array_bytes())? };
    unsafe { free_list::init_empty(bucket_array) };

    let raw = unsafe { arena.extend_by(4 * block::WSIZE)? };
    let prologue = unsafe { raw.add(block::DSIZE) };
    unsafe { block::set(prologue, block::DSIZE, true) };
    let epilogue = unsafe { block::next_block(prologue) };
    unsafe { block::set_epilogue(epilogue) };

    let chunk_size = config.chunk_size();
    let mut allocator = Self {
      arena,
      config,
      bucket_array,
      heap_listp: prologue,
    };

    unsafe {
      heap_extend::extend(
        allocator.bucket_array,
        &allocator.config,
        &mut allocator.arena,
        chunk_size,
      )?
    };

    Ok(allocator)
  }

  /// The payload pointer of the prologue sentinel, for [`crate::check`].
  pub fn heap_listp(&self) -> *mut u8 {
    self.heap_listp
  }

  /// The arena this allocator grows through, for [`crate::check`]'s
  /// in-heap bounds test.
  pub fn arena(&self) -> &A {
    &self.arena
  }

  /// The bucket-head array base, for [`crate::check`]'s bucket walk.
  pub fn bucket_array(&self) -> *mut u8 {
    self.bucket_array
  }

  /// The bucket-size table in effect.
  pub fn config(&self) -> &BucketConfig {
    &self.config
  }

  /// Allocates at least `size` bytes, 8-byte aligned. Returns null on a
  /// zero-size request or if heap extension is needed and fails.
  ///
  /// # Safety
  ///
  /// The returned pointer is valid only for as long as `self` is not
  /// dropped and the block is not later freed.
  pub unsafe fn alloc(&mut self, size: usize) -> *mut u8 {
    if size == 0 {
      return block::null();
    }
    let asize = block::adjusted_size(size);

    let found = unsafe { search::find_fit(self.bucket_array, &self.config, asize) };
    let bp = if found.is_null() {
      match unsafe { heap_extend::extend(self.bucket_array, &self.config, &mut self.arena, asize) } {
        Ok(bp) => bp,
        Err(_) => return block::null(),
      }
    } else {
      found
    };

    unsafe { place::place(self.bucket_array, &self.config, bp, asize) };
    bp
  }

  /// Frees a block previously returned by `alloc`/`realloc`/`calloc`.
  /// A null pointer is a no-op. Freeing a foreign pointer or double-freeing
  /// is undefined behavior, not detected here.
  ///
  /// # Safety
  ///
  /// `ptr` must be null or a currently-allocated block from this allocator.
  pub unsafe fn free(&mut self, ptr: *mut u8) {
    if ptr.is_null() {
      return;
    }
    let size = unsafe { block::size(ptr) };
    unsafe { block::set(ptr, size, false) };
    let merged = unsafe { coalesce::coalesce(self.bucket_array, &self.config, ptr) };
    unsafe { free_list::insert_free(self.bucket_array, &self.config, merged) };
  }

  /// Resizes a block, with three fast paths before falling back to
  /// allocate-copy-free:
  ///
  /// - `ptr` null → `alloc(size)`.
  /// - `size == 0` → `free(ptr)`, returns null.
  /// - adjusted size unchanged → returns `ptr` as-is.
  /// - adjusted size shrinks and the remainder would itself be a valid
  ///   block → split in place, free the trailing remainder.
  /// - otherwise → `alloc(size)`, copy `min(size, old_size)` bytes (`old_size`
  ///   being the old block's *total* stored size, matching the source), free
  ///   `ptr`.
  ///
  /// # Safety
  ///
  /// `ptr` must be null or a currently-allocated block from this allocator.
  pub unsafe fn realloc(&mut self, ptr: *mut u8, size: usize) -> *mut u8 {
    if ptr.is_null() {
      return unsafe { self.alloc(size) };
    }
    if size == 0 {
      unsafe { self.free(ptr) };
      return block::null();
    }

    let asize = block::adjusted_size(size);
    let old_size = unsafe { block::size(ptr) };

    if asize == old_size {
      return ptr;
    }

    if asize < old_size {
      if old_size - asize < block::MINIMUM_BLOCK_SIZE {
        return ptr;
      }
      unsafe {
        block::set(ptr, asize, true);
        let remainder = block::next_block(ptr);
        block::set(remainder, old_size - asize, true);
        self.free(remainder);
      }
      return ptr;
    }

    let new_ptr = unsafe { self.alloc(size) };
    if new_ptr.is_null() {
      return block::null();
    }
    unsafe {
      let copy_len = size.min(old_size);
      ptr::copy_nonoverlapping(ptr, new_ptr, copy_len);
      self.free(ptr);
    }
    new_ptr
  }

  /// Allocates `count * size` zero-filled bytes. `count * size` overflowing
  /// is the caller's responsibility, per the client contract; here it is
  /// surfaced as a null result rather than a wrapped/truncated allocation.
  ///
  /// # Safety
  ///
  /// Same obligations as `alloc`.
  pub unsafe fn calloc(&mut self, count: usize, size: usize) -> *mut u8 {
    let bytes = match count.checked_mul(size) {
      Some(b) => b,
      None => return block::null(),
    };
    let bp = unsafe { self.alloc(bytes) };
    if !bp.is_null() {
      unsafe { ptr::write_bytes(bp, 0, bytes) };
    }
    bp
  }
}
