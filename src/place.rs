//! The placer/splitter: turns a found free block into an allocated one,
//! splitting off a remainder when that remainder would itself be a valid
//! block.

use crate::block;
use crate::coalesce;
use crate::free_list;
use crate::size_class::BucketConfig;

/// Places an allocation of `requested_size` bytes into the free block `bp`
/// (which must satisfy `block::size(bp) >= requested_size`).
///
/// If the leftover space is at least [`block::MINIMUM_BLOCK_SIZE`], `bp` is
/// split: the front `requested_size` bytes become the allocated block, and
/// the remainder is re-inserted as a free block (routed through `coalesce`
/// first — its right neighbor cannot be free under the no-two-adjacent-free-
/// blocks invariant, so this is a no-op in practice, but the source routes
/// every new free block through `coalesce` uniformly and this preserves
/// that). Otherwise the whole block is allocated as-is.
pub unsafe fn place(bucket_array: *mut u8, config: &BucketConfig, bp: *mut u8, requested_size: usize) {
  let current_size = unsafe { block::size(bp) };

  if current_size - requested_size >= block::MINIMUM_BLOCK_SIZE {
    unsafe {
      free_list::remove_free(bucket_array, config, bp);
      block::set(bp, requested_size, true);

      let remainder = block::next_block(bp);
      block::set(remainder, current_size - requested_size, false);

      let merged = coalesce::coalesce(bucket_array, config, remainder);
      free_list::insert_free(bucket_array, config, merged);
    }
  } else {
    unsafe {
      free_list::remove_free(bucket_array, config, bp);
      block::set(bp, current_size, true);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::size_class::BucketConfig;

  fn setup() -> (Box<[u8]>, Box<[u8]>, BucketConfig) {
    (
      vec![0u8; 256].into_boxed_slice(),
      vec![0u8; free_list::bucket_array_bytes()].into_boxed_slice(),
      BucketConfig::default(),
    )
  }

  #[test]
  fn splits_when_remainder_meets_minimum() {
    let (mut storage, mut buckets, cfg) = setup();
    let bucket_array = buckets.as_mut_ptr();
    unsafe { free_list::init_empty(bucket_array) };

    let bp = unsafe { storage.as_mut_ptr().add(8) };
    unsafe { block::set(bp, 168, false) };
    unsafe { free_list::insert_free(bucket_array, &cfg, bp) };
    let epilogue = unsafe { block::next_block(bp) };
    unsafe { block::set_epilogue(epilogue) };

    unsafe { place(bucket_array, &cfg, bp, 24) };

    assert_eq!(unsafe { block::size(bp) }, 24);
    assert!(unsafe { block::allocated(bp) });

    let remainder = unsafe { block::next_block(bp) };
    assert_eq!(unsafe { block::size(remainder) }, 144);
    assert!(!unsafe { block::allocated(remainder) });
    assert_eq!(unsafe { free_list::head(bucket_array, cfg.bucket_index(144)) }, remainder);
  }

  #[test]
  fn consumes_whole_block_when_remainder_too_small() {
    let (mut storage, mut buckets, cfg) = setup();
    let bucket_array = buckets.as_mut_ptr();
    unsafe { free_list::init_empty(bucket_array) };

    let bp = unsafe { storage.as_mut_ptr().add(8) };
    unsafe { block::set(bp, 168, false) };
    unsafe { free_list::insert_free(bucket_array, &cfg, bp) };

    unsafe { place(bucket_array, &cfg, bp, 140) };

    assert_eq!(unsafe { block::size(bp) }, 168);
    assert!(unsafe { block::allocated(bp) });
  }
}
