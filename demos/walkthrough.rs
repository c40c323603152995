use std::io::Read;

use segfit::{check_invariants, SegFitAllocator};

/// Waits until the user presses ENTER.
/// Useful when you want to pause between steps and eyeball the printed
/// block chain before the next allocation shuffles it.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn report(allocator: &SegFitAllocator, label: &str) {
  let ok = check_invariants(allocator, 1);
  println!("[{label}] check_invariants(level=1) = {ok}");
}

fn main() {
  // Segregated free-list allocator over a fixed, pre-reserved buffer.
  // Typically it holds:
  // - the arena it grows through (here, BufferArena)
  // - the bucket-size table
  // - the bucket-array base and the prologue pointer
  // and searches its buckets for a first fit before ever extending the arena.
  let mut allocator = SegFitAllocator::new().expect("arena big enough for this walkthrough");

  report(&allocator, "start");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 1) Allocate a small block (32 bytes).
  // --------------------------------------------------------------------
  let a = unsafe { allocator.alloc(32) };
  println!("\n[1] Allocate 32 bytes -> {a:?}");
  unsafe { std::ptr::write_bytes(a, 0xAA, 32) };
  report(&allocator, "1");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 2) Allocate a second, larger block (128 bytes).
  // --------------------------------------------------------------------
  let b = unsafe { allocator.alloc(128) };
  println!("\n[2] Allocate 128 bytes -> {b:?}");
  unsafe { std::ptr::write_bytes(b, 0xBB, 128) };
  report(&allocator, "2");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 3) Free the first block. Since nothing sits between it and whatever
  //    came before it in the arena, this is a plain free-list insertion,
  //    not a coalesce.
  // --------------------------------------------------------------------
  unsafe { allocator.free(a) };
  println!("\n[3] Freed block [1] at {a:?}");
  report(&allocator, "3");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 4) Allocate something small enough to be satisfied by splitting the
  //    block freed in step 3, rather than reusing it whole.
  // --------------------------------------------------------------------
  let c = unsafe { allocator.alloc(8) };
  println!("\n[4] Allocate 8 bytes -> {c:?}");
  println!(
    "[4] reused freed block's address? {}",
    if c == a { "yes, split it" } else { "no, found elsewhere" }
  );
  report(&allocator, "4");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 5) Free blocks [2] and [4] back to back. Block [4]'s remainder
  //    (left over from the step-3 split) sits immediately before [2]'s
  //    neighbor in the chain, so freeing both should coalesce them into
  //    one run rather than leaving two separate free blocks behind.
  // --------------------------------------------------------------------
  unsafe { allocator.free(c) };
  unsafe { allocator.free(b) };
  println!("\n[5] Freed blocks [2] and [4]");
  report(&allocator, "5");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 6) Shrink-in-place via realloc: allocate 200 bytes, then realloc down
  //    to 16. The tail should split off and come back as a free block
  //    without the pointer moving.
  // --------------------------------------------------------------------
  let d = unsafe { allocator.alloc(200) };
  unsafe { std::ptr::write_bytes(d, 0xCC, 200) };
  let d_shrunk = unsafe { allocator.realloc(d, 16) };
  println!("\n[6] realloc(200 -> 16): pointer unchanged? {}", d == d_shrunk);
  report(&allocator, "6");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 7) Grow via realloc past what the current block can hold: this falls
  //    back to allocate-copy-free, and the first 16 bytes should survive
  //    the move untouched.
  // --------------------------------------------------------------------
  let d_grown = unsafe { allocator.realloc(d_shrunk, 512) };
  let preserved = unsafe { std::slice::from_raw_parts(d_grown, 16) };
  println!(
    "\n[7] realloc(16 -> 512): moved to {d_grown:?}, first 16 bytes still 0xCC? {}",
    preserved.iter().all(|&byte| byte == 0xCC)
  );
  report(&allocator, "7");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 8) Force a heap extension: ask for more than the default chunk size,
  //    well past anything currently free.
  // --------------------------------------------------------------------
  let e = unsafe { allocator.alloc(8192) };
  println!("\n[8] Allocate 8192 bytes (forces heap_extend) -> {e:?}");
  report(&allocator, "8");
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 9) Zero-filled allocation via calloc.
  // --------------------------------------------------------------------
  let f = unsafe { allocator.calloc(16, 4) };
  let zeroed = unsafe { std::slice::from_raw_parts(f, 64) };
  println!(
    "\n[9] calloc(16, 4) -> {f:?}, all zero? {}",
    zeroed.iter().all(|&byte| byte == 0)
  );
  report(&allocator, "9");

  unsafe {
    allocator.free(d_grown);
    allocator.free(e);
    allocator.free(f);
  }

  println!("\n[10] End of walkthrough. Final consistency check at every level:");
  for level in 1..=6u8 {
    println!("  level {level}: {}", check_invariants(&allocator, level));
  }
}
