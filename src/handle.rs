//! Owned handles to heap-allocated counters
//!
//! A [CounterHandle] is the typed form of the pointer the C ABI hands out.
//! Creating one is the only fallible step; destroying one consumes it, so a
//! released handle cannot be used again from Rust.

use std::{
  alloc::{self, Layout},
  fmt,
  marker::PhantomData,
  ptr::NonNull,
};

use log::{trace, warn};

use crate::{AllocationFailure, Counter, OrderingName};

/// Where counter cells are allocated from
pub trait CellAllocator {
  /// Allocate memory for `layout`, or return null.
  ///
  /// # Safety
  /// `layout` must have a non-zero size.
  unsafe fn allocate(layout: Layout) -> *mut u8;
  /// Release memory returned by [allocate](Self::allocate).
  ///
  /// # Safety
  /// `ptr` must come from [allocate](Self::allocate) with the same `layout`,
  /// and must not be released twice.
  unsafe fn release(ptr: *mut u8, layout: Layout);
}

/// The global allocator (the default)
#[derive(Copy, Clone, Debug, Default)]
pub struct Global;

impl CellAllocator for Global {
  unsafe fn allocate(layout: Layout) -> *mut u8 { alloc::alloc(layout) }
  unsafe fn release(ptr: *mut u8, layout: Layout) { alloc::dealloc(ptr, layout) }
}

/// An owned counter living in its own allocation.
///
/// ```
/// use lockfree_counter::CounterHandle;
/// let c: CounterHandle = CounterHandle::create(10).expect("allocation");
/// assert_eq!(c.increment(), 11);
/// assert_eq!(c.increment(), 12);
/// assert_eq!(c.get(), 12);
/// c.destroy();
/// ```
///
/// Using a handle after destroying it does not compile:
/// ```compile_fail
/// use lockfree_counter::CounterHandle;
/// let c: CounterHandle = CounterHandle::create(0).unwrap();
/// c.destroy();
/// c.get();
/// ```
pub struct CounterHandle<A: CellAllocator = Global> {
  cell: NonNull<Counter>,
  _allocator: PhantomData<fn() -> A>,
}

// SAFETY: the handle uniquely owns its cell, and `Counter` is `Send + Sync`.
unsafe impl<A: CellAllocator> Send for CounterHandle<A> {}
unsafe impl<A: CellAllocator> Sync for CounterHandle<A> {}

impl<A: CellAllocator> CounterHandle<A> {
  const LAYOUT: Layout = Layout::new::<Counter>();

  /// Allocate a counter starting at `initial`
  pub fn create(initial: i32) -> Result<Self, AllocationFailure> {
    Self::create_from(Counter::new(initial))
  }

  /// Move `counter` into a new allocation
  pub fn create_from(counter: Counter) -> Result<Self, AllocationFailure> {
    // SAFETY: `Counter` is not zero-sized.
    let raw = unsafe { A::allocate(Self::LAYOUT) }.cast::<Counter>();
    let Some(cell) = NonNull::new(raw) else {
      warn!("counter allocation of {} bytes failed", Self::LAYOUT.size());
      return Err(AllocationFailure::new(Self::LAYOUT));
    };
    // SAFETY: `cell` is freshly allocated for a `Counter` and not yet shared.
    unsafe { cell.as_ptr().write(counter) };
    let handle = Self { cell, _allocator: PhantomData };
    trace!(
      "created counter {:p} at {} ({})",
      cell,
      handle.get(),
      OrderingName::from(handle.as_ref().ordering())
    );
    Ok(handle)
  }

  /// Atomically add one and return the new value
  pub fn increment(&self) -> i32 { self.as_ref().increment() }

  /// Atomically load the current value
  pub fn get(&self) -> i32 { self.as_ref().get() }

  /// Release the counter
  pub fn destroy(self) { drop(self) }
}

impl CounterHandle<Global> {
  /// Give up ownership, returning the pointer handed across the C ABI.
  pub fn into_raw(self) -> NonNull<Counter> {
    let cell = self.cell;
    std::mem::forget(self);
    cell
  }

  /// Take back ownership of a pointer from [into_raw](Self::into_raw).
  ///
  /// # Safety
  /// `cell` must come from [into_raw](Self::into_raw) and must not have been
  /// reclaimed already. No other reference to the cell may outlive the
  /// returned handle.
  pub unsafe fn from_raw(cell: NonNull<Counter>) -> Self {
    Self { cell, _allocator: PhantomData }
  }
}

impl<A: CellAllocator> AsRef<Counter> for CounterHandle<A> {
  fn as_ref(&self) -> &Counter {
    // SAFETY: the cell is initialized in `create_from` and live until drop.
    unsafe { self.cell.as_ref() }
  }
}

impl<A: CellAllocator> fmt::Debug for CounterHandle<A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CounterHandle")
      .field("cell", &self.cell)
      .field("counter", self.as_ref())
      .finish()
  }
}

impl<A: CellAllocator> Drop for CounterHandle<A> {
  fn drop(&mut self) {
    trace!("destroying counter {:p} at {}", self.cell, self.get());
    // SAFETY: the cell was allocated by `A` with `LAYOUT` and this handle is
    // its only owner.
    unsafe {
      self.cell.as_ptr().drop_in_place();
      A::release(self.cell.as_ptr().cast(), Self::LAYOUT);
    }
  }
}
