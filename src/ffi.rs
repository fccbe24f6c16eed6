//! The C ABI: four entry points over an opaque `Counter*`.
//!
//! See `include/lockfree_counter.h` for the declarations a host binds to.

// All functions here are extern functions. Handle validity is the caller's contract.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::ptr::{self, NonNull};

use crate::{Counter, CounterHandle};

/// Allocate a counter starting at `initial`. Returns null if allocation fails.
#[no_mangle]
pub extern "C" fn create_counter(initial: i32) -> *mut Counter {
  match CounterHandle::create(initial) {
    Ok(handle) => handle.into_raw().as_ptr(),
    Err(_) => ptr::null_mut(),
  }
}

/// Release a counter. Null is ignored; anything else must be a live handle
/// that no other thread is still using.
#[no_mangle]
pub extern "C" fn free_counter(counter: *mut Counter) {
  if let Some(cell) = NonNull::new(counter) {
    // SAFETY: a non-null `counter` came from `create_counter` and is released once.
    unsafe { CounterHandle::from_raw(cell) }.destroy();
  }
}

/// Atomically add one and return the new value
#[no_mangle]
pub extern "C" fn increment_counter(counter: *mut Counter) -> i32 {
  debug_assert!(!counter.is_null(), "increment_counter called with a null handle");
  // SAFETY: `counter` is a live handle from `create_counter`.
  unsafe { &*counter }.increment()
}

/// Atomically load the current value
#[no_mangle]
pub extern "C" fn get_counter(counter: *mut Counter) -> i32 {
  debug_assert!(!counter.is_null(), "get_counter called with a null handle");
  // SAFETY: `counter` is a live handle from `create_counter`.
  unsafe { &*counter }.get()
}
