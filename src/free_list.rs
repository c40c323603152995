//! The segregated free-list registry.
//!
//! Bucket heads live in the arena itself (see `SegFitAllocator::init`), as a
//! flat array of `NUM_BUCKETS` pointer-sized slots. This module only knows how
//! to read/write those slots and thread a block into or out of the
//! doubly-linked list its bucket points at; it has no opinion about *which*
//! bucket a block belongs in beyond what [`BucketConfig`] tells it.

use std::mem::size_of;
use std::ptr;

use crate::block;
use crate::size_class::BucketConfig;

/// Bytes needed to store `NUM_BUCKETS` bucket-head pointers.
pub fn bucket_array_bytes() -> usize {
  crate::size_class::NUM_BUCKETS * size_of::<*mut u8>()
}

unsafe fn slot(bucket_array: *mut u8, index: usize) -> *mut u8 {
  unsafe { bucket_array.add(index * size_of::<*mut u8>()) }
}

/// Reads the head pointer of bucket `index` (null if the bucket is empty).
pub unsafe fn head(bucket_array: *mut u8, index: usize) -> *mut u8 {
  unsafe { (slot(bucket_array, index) as *const *mut u8).read_unaligned() }
}

unsafe fn set_head(bucket_array: *mut u8, index: usize, bp: *mut u8) {
  unsafe { (slot(bucket_array, index) as *mut *mut u8).write_unaligned(bp) };
}

/// Zeroes every bucket head. Called once at `init`.
pub unsafe fn init_empty(bucket_array: *mut u8) {
  for i in 0..crate::size_class::NUM_BUCKETS {
    unsafe { set_head(bucket_array, i, ptr::null_mut()) };
  }
}

/// Pushes `bp` onto the head of its size class's bucket (LIFO insertion).
///
/// `bp` must be a free block not already present in any bucket.
pub unsafe fn insert_free(bucket_array: *mut u8, config: &BucketConfig, bp: *mut u8) {
  let idx = config.bucket_index(unsafe { block::size(bp) });
  let old_head = unsafe { head(bucket_array, idx) };

  unsafe {
    block::set_prev_free(bp, ptr::null_mut());
    block::set_next_free(bp, old_head);
    if !old_head.is_null() {
      block::set_prev_free(old_head, bp);
    }
    set_head(bucket_array, idx, bp);
  }
}

/// Removes `bp` from its bucket, restitching the doubly-linked list around it.
///
/// `bp` must currently be present in the bucket `config.bucket_index` maps
/// its size to.
pub unsafe fn remove_free(bucket_array: *mut u8, config: &BucketConfig, bp: *mut u8) {
  let idx = config.bucket_index(unsafe { block::size(bp) });
  let prev = unsafe { block::prev_free(bp) };
  let next = unsafe { block::next_free(bp) };

  unsafe {
    if head(bucket_array, idx) == bp {
      set_head(bucket_array, idx, next);
    }
    if !prev.is_null() {
      block::set_next_free(prev, next);
    }
    if !next.is_null() {
      block::set_prev_free(next, prev);
    }
    block::set_prev_free(bp, ptr::null_mut());
    block::set_next_free(bp, ptr::null_mut());
  }
}
