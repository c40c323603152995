//! Coalescing: merging a freshly-freed block with any free neighbor(s).
//!
//! The prologue and epilogue sentinels are always allocated, so `prev_block`
//! and `next_block` never need a heap-boundary check here — the four cases
//! below are exhaustive and the sentinels make the "nothing to merge" edges
//! trivial.

use crate::block;
use crate::free_list;
use crate::size_class::BucketConfig;

/// Merges `bp` (already marked free) with an immediately-adjacent free
/// neighbor on either side, removing any merged neighbor from its bucket.
///
/// Returns the payload pointer of the resulting block — this may not be `bp`
/// itself, if the previous block absorbed it. The caller is responsible for
/// inserting the returned pointer into the appropriate bucket; this function
/// never touches `bp`'s own bucket membership.
pub unsafe fn coalesce(bucket_array: *mut u8, config: &BucketConfig, bp: *mut u8) -> *mut u8 {
  let prev = unsafe { block::prev_block(bp) };
  let next = unsafe { block::next_block(bp) };
  let prev_alloc = unsafe { block::allocated(prev) };
  let next_alloc = unsafe { block::allocated(next) };
  let mut size = unsafe { block::size(bp) };

  match (prev_alloc, next_alloc) {
    (true, true) => bp,
    (true, false) => unsafe {
      size += block::size(next);
      free_list::remove_free(bucket_array, config, next);
      block::set(bp, size, false);
      bp
    },
    (false, true) => unsafe {
      size += block::size(prev);
      free_list::remove_free(bucket_array, config, prev);
      block::set(prev, size, false);
      prev
    },
    (false, false) => unsafe {
      size += block::size(prev) + block::size(next);
      free_list::remove_free(bucket_array, config, prev);
      free_list::remove_free(bucket_array, config, next);
      block::set(prev, size, false);
      prev
    },
  }
}
