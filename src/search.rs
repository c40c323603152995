//! First-fit search across the segregated free lists.

use crate::block;
use crate::free_list;
use crate::size_class::{BucketConfig, NUM_BUCKETS};

/// Finds the first free block of size `>= size`, scanning buckets from
/// `config.bucket_index(size)` upward and, within each bucket, from its head.
///
/// Returns a null pointer on a miss — the caller (`SegFitAllocator::alloc`)
/// is responsible for extending the heap and retrying.
pub unsafe fn find_fit(bucket_array: *mut u8, config: &BucketConfig, size: usize) -> *mut u8 {
  let start = config.bucket_index(size);

  for idx in start..NUM_BUCKETS {
    let mut bp = unsafe { free_list::head(bucket_array, idx) };
    while !bp.is_null() {
      if unsafe { block::size(bp) } >= size {
        return bp;
      }
      bp = unsafe { block::next_free(bp) };
    }
  }

  block::null()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_block(storage: &mut [u8], offset: usize, size: usize) -> *mut u8 {
    let bp = unsafe { storage.as_mut_ptr().add(offset) };
    unsafe { block::set(bp, size, false) };
    bp
  }

  #[test]
  fn finds_first_qualifying_block_in_target_bucket() {
    let mut buckets = vec![0u8; free_list::bucket_array_bytes()];
    let bucket_array = buckets.as_mut_ptr();
    unsafe { free_list::init_empty(bucket_array) };

    let mut storage = vec![0u8; 256];
    let cfg = BucketConfig::default();

    let small = make_block(&mut storage, 8, 24);
    let big_enough = make_block(&mut storage, 40, 48);

    unsafe {
      free_list::insert_free(bucket_array, &cfg, small);
      free_list::insert_free(bucket_array, &cfg, big_enough);
    }

    let found = unsafe { find_fit(bucket_array, &cfg, 32) };
    assert_eq!(found, big_enough);
  }

  #[test]
  fn falls_through_to_a_higher_bucket_on_miss() {
    let mut buckets = vec![0u8; free_list::bucket_array_bytes()];
    let bucket_array = buckets.as_mut_ptr();
    unsafe { free_list::init_empty(bucket_array) };

    let mut storage = vec![0u8; 256];
    let cfg = BucketConfig::default();

    // 200 bytes lands in a high bucket; searching for something that'd start
    // in bucket 0 must still find it.
    let big = make_block(&mut storage, 8, 200);
    unsafe { free_list::insert_free(bucket_array, &cfg, big) };

    let found = unsafe { find_fit(bucket_array, &cfg, 24) };
    assert_eq!(found, big);
  }

  #[test]
  fn reports_miss_as_null() {
    let mut buckets = vec![0u8; free_list::bucket_array_bytes()];
    let bucket_array = buckets.as_mut_ptr();
    unsafe { free_list::init_empty(bucket_array) };

    let cfg = BucketConfig::default();
    assert!(unsafe { find_fit(bucket_array, &cfg, 24) }.is_null());
  }
}
