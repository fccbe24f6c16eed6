//! A lock-free, 32-bit atomic counter behind an opaque handle
//!
//! ### Comes with
//! - [Counter]: one [AtomicI32](core::sync::atomic::AtomicI32) cell with
//!   linearizable `increment` (returns the new value) and `get`,
//!   sequentially consistent by default,
//! - [CounterHandle]: an owned, heap-allocated counter whose creation reports
//!   [AllocationFailure] instead of aborting, and whose `destroy` consumes it,
//! - [ffi]: the C ABI (`create_counter`, `free_counter`, `increment_counter`,
//!   `get_counter`) declared in `include/lockfree_counter.h`.
//!
//! ### Optional features
//! - `serde`: Enable de/serialization of counter snapshots

mod counter;
pub use counter::*;
mod error;
pub use error::*;
mod handle;
pub use handle::*;
pub mod ffi;

#[cfg(test)]
mod tests;
