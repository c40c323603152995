//! Size-class index: maps a block size to one of the segregated free-list
//! buckets.
//!
//! The table below is linear for the sizes that profiling the workloads this
//! design is meant for shows dominate (small, similarly-sized blocks), then
//! switches to exponential spacing once blocks get large enough that exact
//! bucketing stops mattering as much. The table is data, not hardcoded control
//! flow — [`BucketConfig`] lets a caller substitute a different one.

/// Number of segregated free-list buckets.
pub const NUM_BUCKETS: usize = 14;

/// Default per-bucket maximum block size, in bytes. Bucket `i` holds blocks
/// of size `(thresholds[i-1], thresholds[i]]` (or `[MINIMUM_BLOCK_SIZE,
/// thresholds[0]]` for bucket 0). The last entry is unbounded.
pub const DEFAULT_THRESHOLDS: [usize; NUM_BUCKETS] = [
  24, 48, 72, 96, 120, 240, 480, 960, 1920, 3840, 7680, 15360, 30720, usize::MAX,
];

/// Default minimum number of bytes to grow the arena by on a miss.
pub const DEFAULT_CHUNK_SIZE: usize = 168;

/// Parameterizes the size-class table and the heap-extension chunk size.
///
/// Constructed the same way
/// `examples/other_examples/.../antoniosarosi-memalloc-rust`'s
/// `InternalAllocator::with_bucket_sizes` parameterizes its own buckets: a
/// plain array handed to a constructor, validated once at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketConfig {
  thresholds: [usize; NUM_BUCKETS],
  chunk_size: usize,
}

impl BucketConfig {
  /// Builds a custom configuration. `thresholds` must be non-decreasing;
  /// panics otherwise, since a misconfigured table would silently break the
  /// "first fit scans from the target bucket upward" search invariant.
  pub fn new(thresholds: [usize; NUM_BUCKETS], chunk_size: usize) -> Self {
    assert!(
      thresholds.windows(2).all(|w| w[0] <= w[1]),
      "bucket thresholds must be non-decreasing"
    );
    Self { thresholds, chunk_size }
  }

  /// The bucket index `size` belongs to: the first bucket whose threshold is
  /// `>= size`, or the last bucket if none is.
  pub fn bucket_index(&self, size: usize) -> usize {
    self
      .thresholds
      .iter()
      .position(|&max| size <= max)
      .unwrap_or(NUM_BUCKETS - 1)
  }

  /// The configured heap-extension chunk size.
  pub fn chunk_size(&self) -> usize {
    self.chunk_size
  }
}

impl Default for BucketConfig {
  fn default() -> Self {
    Self {
      thresholds: DEFAULT_THRESHOLDS,
      chunk_size: DEFAULT_CHUNK_SIZE,
    }
  }
}
