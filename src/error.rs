use std::{alloc::Layout, fmt};

/// The allocator could not provide memory for a new counter cell.
///
/// This is the only failure a counter operation can report; every other
/// misuse of a handle is prevented by ownership or is the foreign caller's
/// contract to uphold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AllocationFailure {
  layout: Layout,
}

impl AllocationFailure {
  pub(crate) fn new(layout: Layout) -> Self {
    Self { layout }
  }

  /// The layout of the allocation that was refused
  pub fn layout(&self) -> Layout {
    self.layout
  }
}

impl fmt::Display for AllocationFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "failed to allocate a counter cell ({} bytes, align {})",
      self.layout.size(),
      self.layout.align()
    )
  }
}

impl std::error::Error for AllocationFailure {}
