//! Growth policy shared by the line buffer and the token array.
//!
//! Both buffers grow by doubling. Growth goes through fallible reservation so
//! that running out of memory ends the process with a diagnostic instead of
//! an abort from the allocator.

use std::collections::TryReserveError;

/// Message printed when a buffer cannot grow.
pub const ALLOCATION_ERROR: &str = "lsh: allocation error";

/// Ensures `buf` can take one more element, doubling its capacity when full.
///
/// An empty vector with no capacity gets `initial` slots.
pub fn try_grow<T>(buf: &mut Vec<T>, initial: usize) -> Result<(), TryReserveError> {
    if buf.len() < buf.capacity() {
        return Ok(());
    }
    let additional = buf.capacity().max(initial).max(1);
    buf.try_reserve_exact(additional)
}

/// Like [`try_grow`], but terminates the process if the memory is not there.
pub fn grow<T>(buf: &mut Vec<T>, initial: usize) {
    if try_grow(buf, initial).is_err() {
        allocation_failure()
    }
}

/// Allocates an empty vector with room for `capacity` elements, or dies.
pub fn with_capacity<T>(capacity: usize) -> Vec<T> {
    let mut buf = Vec::new();
    if buf.try_reserve_exact(capacity).is_err() {
        allocation_failure()
    }
    buf
}

fn allocation_failure() -> ! {
    log::error!("buffer growth failed");
    eprintln!("{ALLOCATION_ERROR}");
    std::process::exit(1)
}
