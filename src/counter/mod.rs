//! Counters

use core::{
  fmt,
  hash::{Hash, Hasher},
  sync::atomic::{AtomicI32, Ordering},
};

mod ordering;
pub use ordering::*;
#[cfg(feature = "serde")]
mod serde_impls;

/// An atomic counter over a single [AtomicI32] cell.
///
/// ### Behavior
/// 1. The default ordering is [Sequentially Consistent](Ordering::SeqCst).
/// 2. A weaker ordering can be chosen per counter with
///    [new_with_ordering](Self::new_with_ordering), or per call with the
///    methods ending in `with_ordering`.
/// 3. [increment](Self::increment) is a single `fetch_add`: concurrent
///    increments never lose an update and never hand out the same value twice.
/// 4. Like the underlying [AtomicI32], this wraps on overflow.
///
/// ```
/// use lockfree_counter::Counter;
/// let c = Counter::new(10);
/// assert_eq!(c.increment(), 11);
/// assert_eq!(c.increment(), 12);
/// assert_eq!(c.get(), 12);
/// ```
#[derive(Debug)]
pub struct Counter {
  /// The underlying cell
  inner: AtomicI32,
  /// The ordering used for all operations
  ordering: Ordering,
}

impl Counter {
  /// Largest [representable value](i32::MAX)
  pub const MAX: i32 = i32::MAX;
  /// Smallest [representable value](i32::MIN)
  pub const MIN: i32 = i32::MIN;
  /// Default [Atomic ordering](Ordering)
  pub const DEFAULT_ORDERING: Ordering = Ordering::SeqCst;

  /// Instantiate with an initial value
  pub const fn new(initial: i32) -> Self {
    Self { inner: AtomicI32::new(initial), ordering: Self::DEFAULT_ORDERING }
  }

  /// Instantiate with an initial value and ordering
  pub const fn new_with_ordering(initial: i32, ordering: Ordering) -> Self {
    let mut s = Self::new(initial);
    s.ordering = ordering;
    s
  }

  /// The ordering this counter uses when none is given
  pub fn ordering(&self) -> Ordering { self.ordering }

  /// Atomically add one and return the new value.
  ///
  /// ```
  /// use lockfree_counter::Counter;
  /// let c = Counter::new(Counter::MAX);
  /// assert_eq!(c.increment(), Counter::MIN, "increment wraps like the underlying atomic");
  /// ```
  pub fn increment(&self) -> i32 { self.increment_with_ordering(self.ordering) }

  /// Atomically add one with a specific [ordering](Ordering) and return the new value
  pub fn increment_with_ordering(&self, ordering: Ordering) -> i32 {
    self.inner.fetch_add(1, ordering).wrapping_add(1)
  }

  /// Get current value with the counter's [ordering](Ordering)
  ///
  /// ```
  /// use lockfree_counter::Counter;
  /// let c = Counter::new(0);
  /// assert_eq!(c.get(), 0, "get returns initial value");
  /// c.increment();
  /// c.increment();
  /// c.increment();
  /// assert_eq!(c.get(), 3, "get returns post-increment value");
  /// ```
  pub fn get(&self) -> i32 { self.get_with_ordering(self.ordering) }

  /// Get current value with a specific [ordering](Ordering).
  ///
  /// Orderings that are not valid for a load are weakened to the strongest
  /// one that is (see [load_ordering]).
  pub fn get_with_ordering(&self, ordering: Ordering) -> i32 {
    self.inner.load(load_ordering(ordering))
  }

  /// Exclusive access to the value; no atomic operation needed.
  pub fn get_mut(&mut self) -> &mut i32 { self.inner.get_mut() }

  /// Consume the counter and return its value
  pub fn into_inner(self) -> i32 { self.inner.into_inner() }
}

impl fmt::Display for Counter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.get())
  }
}

impl Clone for Counter {
  fn clone(&self) -> Self {
    Self::new_with_ordering(self.get(), self.ordering)
  }
}

impl Default for Counter {
  fn default() -> Self { Self::new(0) }
}

/// Counters are equal when both value and ordering are equal
impl PartialEq for Counter {
  fn eq(&self, rhs: &Self) -> bool {
    self.ordering.eq(&rhs.ordering)
    && self.get().eq(&rhs.get())
  }
}
impl Eq for Counter {}

impl Hash for Counter {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.ordering.hash(state);
    self.get().hash(state);
  }
}

impl From<i32> for Counter {
  fn from(x: i32) -> Self { Self::new(x) }
}

impl From<&Counter> for i32 {
  fn from(counter: &Counter) -> Self { counter.get() }
}

#[cfg(test)]
mod counter_tests {
  use super::*;
  use std::{collections::hash_map::DefaultHasher, sync::Arc, thread, vec::Vec};

  #[test]
  fn get_returns_initial_value() {
    for initial in [0, 1, -1, 10, Counter::MAX, Counter::MIN] {
      assert_eq!(Counter::new(initial).get(), initial);
    }
  }

  #[test]
  fn kth_increment_returns_initial_plus_k() {
    let v = -7;
    let c = Counter::new(v);
    for k in 1..=50 {
      assert_eq!(c.increment(), v + k);
    }
    assert_eq!(c.get(), v + 50);
  }

  #[test]
  fn repeated_get_is_stable() {
    let c = Counter::new(5);
    c.increment();
    assert_eq!(c.get(), c.get());
  }

  #[test]
  fn every_ordering_is_usable() {
    for ordering in [
      Ordering::Relaxed,
      Ordering::Release,
      Ordering::Acquire,
      Ordering::AcqRel,
      Ordering::SeqCst,
    ] {
      let c = Counter::new_with_ordering(0, ordering);
      assert_eq!(c.increment(), 1);
      assert_eq!(c.get(), 1, "load with {:?} must not panic", ordering);
      assert_eq!(c.ordering(), ordering);
    }
  }

  #[test]
  fn concurrent_increments_hand_out_each_value_once() {
    const THREADS: i32 = 8;
    const PER_THREAD: i32 = 1_000;
    let c = Arc::new(Counter::new(0));
    let handles: Vec<_> = (0..THREADS)
      .map(|_| {
        let c = Arc::clone(&c);
        thread::spawn(move || (0..PER_THREAD).map(|_| c.increment()).collect::<Vec<_>>())
      })
      .collect();
    let mut seen: Vec<i32> = handles
      .into_iter()
      .flat_map(|h| h.join().expect("increment thread panicked"))
      .collect();
    seen.sort_unstable();
    assert_eq!(c.get(), THREADS * PER_THREAD);
    assert_eq!(seen, (1..=THREADS * PER_THREAD).collect::<Vec<_>>(), "no duplicates and no gaps");
  }

  #[test]
  fn clone_is_a_snapshot() {
    let c = Counter::new_with_ordering(3, Ordering::Acquire);
    let d = c.clone();
    assert_eq!(c, d);
    c.increment();
    assert_ne!(c, d, "clone must not share the cell");
    assert_eq!(d.get(), 3);
  }

  #[test]
  fn hash_and_eq_property() {
    let c = Counter::new(21);
    let d = Counter::new(21);
    assert_eq!(c, d, "Test counters must equal");
    let hasher_c = &mut DefaultHasher::new();
    c.hash(hasher_c);
    let hasher_d = &mut DefaultHasher::new();
    d.hash(hasher_d);
    assert_eq!(hasher_c.finish(), hasher_d.finish(), "k1 == k2 -> hash(k1) == hash(k2) must hold");
  }

  #[test]
  fn conversions() {
    let mut c = Counter::from(41);
    *c.get_mut() += 1;
    assert_eq!(i32::from(&c), 42);
    assert_eq!(format!("{}", c), "42");
    assert_eq!(c.into_inner(), 42);
    assert_eq!(Counter::default().get(), 0);
  }
}
