//! Growing the arena when no free block satisfies a request.
//!
//! Mirrors the source's `extend_heap`: grow by at least one chunk, install a
//! new free block where the old epilogue stood, plant a fresh epilogue past
//! it, then coalesce with whatever was free immediately before it.

use crate::arena::Arena;
use crate::block;
use crate::coalesce;
use crate::error::ArenaError;
use crate::free_list;
use crate::size_class::BucketConfig;

/// Grows `arena` by `min_bytes.max(config.chunk_size())`, rounded up to a
/// double word, and returns the payload pointer of the (possibly
/// left-coalesced) resulting free block, already inserted into its bucket.
pub unsafe fn extend<A: Arena>(
  bucket_array: *mut u8,
  config: &BucketConfig,
  arena: &mut A,
  min_bytes: usize,
) -> Result<*mut u8, ArenaError> {
  let grow_size = crate::align_to!(min_bytes.max(config.chunk_size()), block::DSIZE);

  let old_epilogue = unsafe { arena.extend_by(grow_size)? };

  unsafe {
    block::set(old_epilogue, grow_size, false);
    let new_epilogue = block::next_block(old_epilogue);
    block::set_epilogue(new_epilogue);
  }

  let merged = unsafe { coalesce::coalesce(bucket_array, config, old_epilogue) };
  unsafe { free_list::insert_free(bucket_array, config, merged) };
  Ok(merged)
}
