//! Naming and normalizing atomic orderings
use core::sync::atomic::Ordering;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A nameable mirror of [Ordering], for log records and de/serialization
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[non_exhaustive]
pub enum OrderingName {
  AcqRel,
  Acquire,
  Relaxed,
  Release,
  SeqCst,
}

impl From<Ordering> for OrderingName {
  fn from(value: Ordering) -> Self {
    match value {
      Ordering::AcqRel => Self::AcqRel,
      Ordering::Acquire => Self::Acquire,
      Ordering::Relaxed => Self::Relaxed,
      Ordering::Release => Self::Release,
      Ordering::SeqCst => Self::SeqCst,
      _ => Self::SeqCst,
    }
  }
}

impl From<OrderingName> for Ordering {
  fn from(value: OrderingName) -> Self {
    match value {
      OrderingName::AcqRel => Self::AcqRel,
      OrderingName::Acquire => Self::Acquire,
      OrderingName::Relaxed => Self::Relaxed,
      OrderingName::Release => Self::Release,
      OrderingName::SeqCst => Self::SeqCst,
    }
  }
}

/// The strongest ordering a load may use in place of `ordering`.
///
/// Loads panic on [Release](Ordering::Release) and
/// [AcqRel](Ordering::AcqRel); those drop their release half.
pub const fn load_ordering(ordering: Ordering) -> Ordering {
  match ordering {
    Ordering::AcqRel => Ordering::Acquire,
    Ordering::Release => Ordering::Relaxed,
    other => other,
  }
}

#[cfg(test)]
mod ordering_tests {
  use super::*;

  #[test]
  fn names_round_trip() {
    for ordering in [
      Ordering::Relaxed,
      Ordering::Release,
      Ordering::Acquire,
      Ordering::AcqRel,
      Ordering::SeqCst,
    ] {
      assert_eq!(Ordering::from(OrderingName::from(ordering)), ordering);
    }
    assert_eq!(OrderingName::SeqCst.as_ref(), "SeqCst");
    assert_eq!(OrderingName::from(Ordering::AcqRel).to_string(), "AcqRel");
  }

  #[test]
  fn load_orderings_never_release() {
    assert_eq!(load_ordering(Ordering::AcqRel), Ordering::Acquire);
    assert_eq!(load_ordering(Ordering::Release), Ordering::Relaxed);
    assert_eq!(load_ordering(Ordering::SeqCst), Ordering::SeqCst);
    assert_eq!(load_ordering(Ordering::Acquire), Ordering::Acquire);
    assert_eq!(load_ordering(Ordering::Relaxed), Ordering::Relaxed);
  }
}
