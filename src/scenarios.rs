//! End-to-end scenarios exercising the client surface the way a caller would,
//! asserting the block-level effects (sizes, merges, splits) that `alloc`/
//! `free`/`realloc` leave behind. Kept as an internal test module rather than
//! a `tests/` integration crate, since none of the client-facing operations
//! expose a block's size — only this module's `cfg(test)` visibility into
//! `block` can check it.

#![cfg(test)]

use crate::arena::BufferArena;
use crate::block;
use crate::check::check_invariants;
use crate::SegFitAllocator;

#[test]
fn s1_smallest_allocation_is_aligned_and_frees_cleanly() {
  let mut allocator = SegFitAllocator::<BufferArena>::new().unwrap();

  let p = unsafe { allocator.alloc(1) };
  assert!(!p.is_null());
  assert!(block::is_aligned(p));
  assert_eq!(unsafe { block::size(p) }, 24);

  unsafe { allocator.free(p) };
  assert!(check_invariants(&allocator, 4));
}

#[test]
fn s2_freeing_neighbors_in_sequence_coalesces_into_one_run() {
  let mut allocator = SegFitAllocator::<BufferArena>::new().unwrap();

  let a = unsafe { allocator.alloc(16) };
  let b = unsafe { allocator.alloc(16) };
  let c = unsafe { allocator.alloc(16) };

  unsafe { allocator.free(b) };
  assert_eq!(unsafe { block::size(b) }, 24);
  assert!(unsafe { block::allocated(a) });
  assert!(unsafe { block::allocated(c) });

  unsafe { allocator.free(a) };
  // a absorbs b: the merged block starts at a's old address and covers both.
  assert_eq!(unsafe { block::size(a) }, 48);
  assert!(!unsafe { block::allocated(a) });

  unsafe { allocator.free(c) };
  // Walk the whole chain: exactly one free run should remain, and it must
  // span at least a, b, and c (it may also absorb the initial chunk's
  // leftover slack block that sat past c before any of this happened).
  let mut bp = allocator.heap_listp();
  let mut free_runs = 0usize;
  unsafe {
    while block::size(bp) > 0 {
      if !block::allocated(bp) {
        free_runs += 1;
        assert!(block::size(bp) >= 24 * 3);
      }
      bp = block::next_block(bp);
    }
  }
  assert_eq!(free_runs, 1);
}

#[test]
fn s3_oversized_request_extends_the_heap_and_stays_consistent() {
  let mut allocator = SegFitAllocator::<BufferArena>::new().unwrap();
  assert!(allocator.config().chunk_size() == 168);

  let p = unsafe { allocator.alloc(200) };
  assert!(!p.is_null());
  assert!(unsafe { block::size(p) } >= 208);
  assert!(check_invariants(&allocator, 1));

  // The epilogue should sit at the arena's current high end.
  let mut bp = allocator.heap_listp();
  unsafe {
    while block::size(bp) > 0 {
      bp = block::next_block(bp);
    }
  }
  assert!(block::is_epilogue(bp));
}

#[test]
fn s4_split_produces_a_usable_remainder_but_never_below_minimum() {
  let mut allocator = SegFitAllocator::<BufferArena>::new().unwrap();

  let p = unsafe { allocator.alloc(16) };
  assert_eq!(unsafe { block::size(p) }, 24);
  let remainder = unsafe { block::next_block(p) };
  assert!(!unsafe { block::allocated(remainder) });
  assert_eq!(unsafe { block::size(remainder) }, 144);

  let mut allocator2 = SegFitAllocator::<BufferArena>::new().unwrap();
  let q = unsafe { allocator2.alloc(140) };
  // 140 needs 148 bytes with header/footer overhead, rounded up to the
  // double word at 152, against an initial 168-byte free block; the 16-byte
  // remainder that split would leave is below the 24-byte minimum, so no
  // split happens and the whole free block is handed out.
  assert_eq!(unsafe { block::size(q) }, 168);
}

#[test]
fn s5_realloc_shrink_leaves_a_trailing_free_block() {
  let mut allocator = SegFitAllocator::<BufferArena>::new().unwrap();

  let p = unsafe { allocator.alloc(100) };
  let q = unsafe { allocator.realloc(p, 20) };
  assert_eq!(p, q);
  assert_eq!(unsafe { block::size(q) }, 32);

  let trailing = unsafe { block::next_block(q) };
  assert!(!unsafe { block::allocated(trailing) });
  assert_eq!(unsafe { block::size(trailing) }, 72);
}

#[test]
fn s6_realloc_grow_preserves_data_and_frees_the_old_block() {
  let mut allocator = SegFitAllocator::<BufferArena>::new().unwrap();

  let p = unsafe { allocator.alloc(100) };
  unsafe {
    for i in 0..100u8 {
      *p.add(i as usize) = i;
    }
  }

  let q = unsafe { allocator.realloc(p, 200) };
  assert!(!q.is_null());
  assert_ne!(q, p);
  unsafe {
    for i in 0..100u8 {
      assert_eq!(*q.add(i as usize), i);
    }
  }
  assert!(!unsafe { block::allocated(p) });
}
