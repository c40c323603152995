//! # segfit - A Segregated Free-List Allocator
//!
//! This crate provides a general-purpose dynamic memory allocator over a
//! linearly-growable arena: a segregated free-list index, first-fit search,
//! in-band header/footer metadata, splitting, and immediate coalescing.
//!
//! ## Overview
//!
//! Every block — allocated or free — carries a one-word header and a
//! matching one-word footer, each packing `(size, allocated_bit)`. Free
//! blocks additionally thread a doubly-linked list through the first two
//! words of their own payload:
//!
//! ```text
//!   Allocated                  Free
//!     [Header: size, 1]         [Header: size, 0]
//!     [.....Payload.....]       [Ptr to prev free]
//!                                [Ptr to next free]
//!                                [...............]
//!     [Footer: size, 1]         [Footer: size, 0]
//! ```
//!
//! Free blocks of similar size are kept in the same bucket of a fixed-size
//! table of doubly-linked lists (the "segregated" part):
//!
//! ```text
//!   bucket_array
//!   ┌──────────┬──────────┬──────────┬─────┬──────────┐
//!   │ [0,24]   │ (24,48]  │ (48,72]  │ ... │ (30720,∞)│
//!   └────┬─────┴────┬─────┴────┬─────┴─────┴──────────┘
//!        │          │          │
//!        ▼          ▼          ▼
//!      block ──►  block      block ──► block ──► null
//!        │
//!        ▼
//!       null
//! ```
//!
//! `alloc` scans from the target bucket upward for the first block large
//! enough (first-fit), splits off any remainder worth keeping, and grows the
//! arena through the [`Arena`] trait when no bucket has a fit. `free` marks
//! a block free, coalesces it with any free neighbor, and reinserts it.
//!
//! ## Crate Structure
//!
//! ```text
//!   segfit
//!   ├── align         - Alignment macros (align!, align_to!)
//!   ├── error         - ArenaError, CheckFinding
//!   ├── arena         - Arena trait, BufferArena, SbrkArena
//!   ├── block         - in-band header/footer metadata (internal, unsafe)
//!   ├── size_class    - BucketConfig: size → bucket index
//!   ├── free_list     - bucket insert/remove (internal)
//!   ├── search        - first-fit scan (internal)
//!   ├── place         - split-or-consume (internal)
//!   ├── coalesce      - adjacent-block merge (internal)
//!   ├── heap_extend   - arena growth on a miss (internal)
//!   ├── allocator     - SegFitAllocator: the client API
//!   ├── check         - check_invariants
//!   └── mm_aliases    - mm_malloc/mm_free/mm_realloc/mm_calloc (feature-gated)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use segfit::SegFitAllocator;
//!
//! fn main() {
//!     let mut allocator = SegFitAllocator::new().unwrap();
//!
//!     unsafe {
//!         let ptr = allocator.alloc(64) as *mut u64;
//!         *ptr = 42;
//!         println!("Value: {}", *ptr);
//!         allocator.free(ptr as *mut u8);
//!     }
//! }
//! ```
//!
//! ## Safety
//!
//! Raw pointer arithmetic over block metadata is confined to `block.rs`;
//! every other module operates on opaque `*mut u8` block pointers. The
//! public `alloc`/`free`/`realloc`/`calloc` surface is still `unsafe`: the
//! caller is responsible for not double-freeing, not freeing a foreign
//! pointer, and not using a pointer after it has been freed.
//!
//! ## Limitations
//!
//! - **Single mutator only**: no internal synchronization; see `DESIGN.md`'s
//!   Open Question on why this crate does not implement `GlobalAlloc`.
//! - **Never shrinks**: memory acquired by heap extension is never returned
//!   to the arena provider during the allocator's lifetime.

pub mod align;
pub mod allocator;
pub mod arena;
mod block;
pub mod check;
mod coalesce;
pub mod error;
mod free_list;
mod heap_extend;
#[cfg(feature = "mm-aliases")]
pub mod mm_aliases;
mod place;
#[cfg(test)]
mod scenarios;
mod search;
pub mod size_class;

pub use allocator::SegFitAllocator;
pub use arena::{Arena, BufferArena};
#[cfg(unix)]
pub use arena::SbrkArena;
pub use check::check_invariants;
pub use error::{ArenaError, CheckFinding};
pub use size_class::BucketConfig;

#[cfg(feature = "mm-aliases")]
pub use mm_aliases::{mm_calloc, mm_free, mm_malloc, mm_realloc};
