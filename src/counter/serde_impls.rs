//! De/serialization of counter snapshots
use super::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The serialized form: the value at the time of the load plus the ordering
#[derive(Serialize, Deserialize)]
#[serde(rename = "Counter")]
struct Snapshot {
  ordering: OrderingName,
  value: i32,
}

impl Serialize for Counter {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    Snapshot { ordering: self.ordering.into(), value: self.get() }.serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for Counter {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let Snapshot { ordering, value } = Snapshot::deserialize(deserializer)?;
    Ok(Counter::new_with_ordering(value, ordering.into()))
  }
}

#[cfg(test)]
mod test_serde {
  use super::*;

  #[test]
  fn serialize_and_deserialize() {
    let c = Counter::new_with_ordering(21, Ordering::Acquire);
    c.increment();
    let ron_c = ron::to_string(&c).expect("Must serialize Counter");
    let d: Counter = ron::from_str(&ron_c).expect("Must deserialize Counter");
    assert_eq!(c, d, "Counter deserialization equals original serialized counter");
  }
}
