//! The invariant checker: `check_invariants(level)`.
//!
//! Mirrors the source's `mm_checkheap`/`check_block`/`print_block`/
//! `check_free`/`in_heap`/`aligned`: a single entry point gated by an
//! integer level, where level 1's prologue/epilogue/in-heap/alignment walk
//! always runs for any nonzero level, and levels 2 through 6 each add one
//! more specific audit or dump on top. Findings are reported via `eprintln!`
//! (advisory, no return-value detail beyond pass/fail), the same way the
//! teacher crate's `print_alloc` reports allocation events to stderr-style
//! output.

use crate::arena::Arena;
use crate::block;
use crate::error::CheckFinding;
use crate::free_list;
use crate::size_class::NUM_BUCKETS;
use crate::SegFitAllocator;

/// Runs the audit for `level` (clamped to `1..=6` by the caller's intent;
/// `0` or values past 6 just run the base walk with no extra audit).
///
/// Returns `true` if no inconsistency was found, `false` otherwise — every
/// finding is also printed to stderr via `eprintln!`.
pub fn check_invariants<A: Arena>(allocator: &SegFitAllocator<A>, level: u8) -> bool {
  let mut findings = Vec::new();

  if level >= 1 {
    check_prologue_and_walk(allocator, &mut findings);
  }
  if level == 2 {
    dump_bucket_heads(allocator);
  }
  if level == 3 {
    check_bucket_membership(allocator, &mut findings);
  }
  if level == 4 {
    check_no_adjacent_free_blocks(allocator, &mut findings);
  }
  if level == 5 {
    dump_all_blocks(allocator);
  }
  if level == 6 {
    check_free_list_consistency(allocator, &mut findings);
  }

  for finding in &findings {
    eprintln!("check_invariants(level={level}): {finding}");
  }

  findings.is_empty()
}

unsafe fn in_heap(bp: *mut u8, low: *const u8, high: *const u8) -> bool {
  (bp as usize) >= (low as usize) && (bp as usize) <= (high as usize)
}

fn check_prologue_and_walk<A: Arena>(allocator: &SegFitAllocator<A>, findings: &mut Vec<CheckFinding>) {
  let heap_listp = allocator.heap_listp();
  let low = allocator.arena().heap_low();
  let high = allocator.arena().heap_high();

  unsafe {
    if block::size(heap_listp) != block::DSIZE || !block::allocated(heap_listp) {
      findings.push(CheckFinding::BadPrologue);
    }

    let mut bp = heap_listp;
    while block::size(bp) > 0 {
      if !in_heap(bp, low, high) {
        findings.push(CheckFinding::OutOfHeap);
      }
      if !block::is_aligned(bp) {
        findings.push(CheckFinding::Misaligned);
      }
      if block::size(bp) != block::footer_size(bp) || block::allocated(bp) != block::footer_allocated(bp) {
        findings.push(CheckFinding::HeaderFooterMismatch);
      }
      bp = block::next_block(bp);
    }

    if !block::is_epilogue(bp) || !block::allocated(bp) {
      findings.push(CheckFinding::BadEpilogue);
    }
  }
}

fn dump_bucket_heads<A: Arena>(allocator: &SegFitAllocator<A>) {
  for i in 0..NUM_BUCKETS {
    let head = unsafe { free_list::head(allocator.bucket_array(), i) };
    eprintln!("bucket[{i}] head = {head:?}");
  }
}

fn check_bucket_membership<A: Arena>(allocator: &SegFitAllocator<A>, findings: &mut Vec<CheckFinding>) {
  let bucket_array = allocator.bucket_array();
  let config = allocator.config();

  for i in 0..NUM_BUCKETS {
    let mut bp = unsafe { free_list::head(bucket_array, i) };
    while !bp.is_null() {
      let size = unsafe { block::size(bp) };
      if config.bucket_index(size) != i {
        findings.push(CheckFinding::WrongBucket);
      }
      bp = unsafe { block::next_free(bp) };
    }
  }
}

fn check_no_adjacent_free_blocks<A: Arena>(allocator: &SegFitAllocator<A>, findings: &mut Vec<CheckFinding>) {
  let mut bp = allocator.heap_listp();
  unsafe {
    while block::size(bp) > 0 {
      let next = block::next_block(bp);
      if block::size(next) > 0 && !block::allocated(bp) && !block::allocated(next) {
        findings.push(CheckFinding::UncoalescedNeighbors);
      }
      bp = next;
    }
  }
}

fn dump_all_blocks<A: Arena>(allocator: &SegFitAllocator<A>) {
  let mut bp = allocator.heap_listp();
  unsafe {
    while block::size(bp) > 0 {
      eprintln!(
        "({bp:?}) size={} allocated={}",
        block::size(bp),
        block::allocated(bp)
      );
      bp = block::next_block(bp);
    }
  }
}

fn check_free_list_consistency<A: Arena>(allocator: &SegFitAllocator<A>, findings: &mut Vec<CheckFinding>) {
  let mut count_walk = 0usize;
  let mut bp = allocator.heap_listp();
  unsafe {
    while block::size(bp) > 0 {
      if !block::allocated(bp) {
        count_walk += 1;
      }
      bp = block::next_block(bp);
    }
  }

  let bucket_array = allocator.bucket_array();
  let mut count_buckets = 0usize;
  for i in 0..NUM_BUCKETS {
    let mut bp = unsafe { free_list::head(bucket_array, i) };
    while !bp.is_null() {
      count_buckets += 1;

      let next = unsafe { block::next_free(bp) };
      let prev = unsafe { block::prev_free(bp) };
      if !next.is_null() && unsafe { block::prev_free(next) } != bp {
        findings.push(CheckFinding::BrokenFreeListLinks);
      }
      if !prev.is_null() && unsafe { block::next_free(prev) } != bp {
        findings.push(CheckFinding::BrokenFreeListLinks);
      }

      bp = next;
    }
  }

  if count_walk != count_buckets {
    findings.push(CheckFinding::FreeCountMismatch);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::arena::BufferArena;
  use crate::SegFitAllocator;

  #[test]
  fn freshly_initialized_heap_passes_every_level() {
    let allocator = SegFitAllocator::<BufferArena>::new().unwrap();
    for level in 1..=6u8 {
      assert!(check_invariants(&allocator, level), "level {level} should pass");
    }
  }

  #[test]
  fn corrupted_footer_is_detected() {
    let mut allocator = SegFitAllocator::<BufferArena>::new().unwrap();
    let p = unsafe { allocator.alloc(64) };
    unsafe {
      let footer = block::footer(p);
      (footer as *mut u32).write_unaligned(0xdead_beef);
    }
    assert!(!check_invariants(&allocator, 1));
  }

  #[test]
  fn heap_with_allocations_and_frees_still_passes() {
    let mut allocator = SegFitAllocator::<BufferArena>::new().unwrap();
    let a = unsafe { allocator.alloc(64) };
    let b = unsafe { allocator.alloc(128) };
    unsafe { allocator.free(a) };
    assert!(check_invariants(&allocator, 4));
    assert!(check_invariants(&allocator, 6));
    unsafe { allocator.free(b) };
    assert!(check_invariants(&allocator, 6));
  }
}
