//! Error types shared across the allocator's internal layers.
//!
//! The public `alloc`/`free`/`realloc`/`calloc` surface never returns a
//! `Result` — per the allocator contract, failures surface as a null pointer,
//! matching the C `malloc` family this crate imitates. Internally, though, the
//! [`Arena`](crate::arena::Arena) trait and the invariant checker need a way to
//! describe *why* something failed, so they use this plain enum.

use std::fmt;

/// Failure modes of the arena adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
  /// The underlying provider could not grow by the requested number of bytes
  /// (OS refused `sbrk`, or the fixed-capacity test buffer is full).
  Exhausted,
}

impl fmt::Display for ArenaError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArenaError::Exhausted => write!(f, "arena exhausted: could not extend heap"),
    }
  }
}

impl std::error::Error for ArenaError {}

/// A single invariant violation surfaced by [`check_invariants`](crate::check::check_invariants).
///
/// The checker is advisory (it prints and returns a bool rather than
/// propagating `Result`s through the allocator), but individual findings are
/// still structured so that tests can assert on *which* invariant broke
/// instead of scraping printed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFinding {
  /// Prologue header/footer doesn't look like a sentinel.
  BadPrologue,
  /// Epilogue header doesn't look like a sentinel.
  BadEpilogue,
  /// A block's address lies outside `[heap_low(), heap_high())`.
  OutOfHeap,
  /// A block's payload pointer isn't 8-byte aligned.
  Misaligned,
  /// A block's header and footer disagree.
  HeaderFooterMismatch,
  /// Two adjacent blocks are both free (coalescing invariant violated).
  UncoalescedNeighbors,
  /// A free block lives in a bucket whose size range doesn't contain it.
  WrongBucket,
  /// A free-list's doubly-linked pointers are inconsistent.
  BrokenFreeListLinks,
  /// The chain-walk free-block count disagrees with the bucket-walk count.
  FreeCountMismatch,
}

impl fmt::Display for CheckFinding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let msg = match self {
      CheckFinding::BadPrologue => "prologue header error",
      CheckFinding::BadEpilogue => "epilogue header error",
      CheckFinding::OutOfHeap => "block not in heap",
      CheckFinding::Misaligned => "block not aligned",
      CheckFinding::HeaderFooterMismatch => "header and footer are different",
      CheckFinding::UncoalescedNeighbors => "coalesce is not working: adjacent free blocks",
      CheckFinding::WrongBucket => "block not allocated to right bucket",
      CheckFinding::BrokenFreeListLinks => "free list prev/next not consistent",
      CheckFinding::FreeCountMismatch => "free list amount doesn't match chain walk",
    };
    write!(f, "{msg}")
  }
}
