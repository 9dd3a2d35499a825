use crate::metrics::MetricValue;
use core::fmt::{self, Formatter};
use core::marker::PhantomData;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered mapping from metric name to value.
///
/// Progress displays show metrics in the order the source produced them, so lookups are linear
/// over a small vector rather than hashed. Names are unique: inserting an existing name replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsMap {
    entries: Vec<(String, MetricValue)>,
}

impl MetricsMap {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a metric, returning the previous value if the name was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) -> Option<MetricValue> {
        let name = name.into();
        let value = value.into();

        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(core::mem::replace(existing, value));
        }

        self.entries.push((name, value));
        None
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Transform every value, keeping names and their order.
    #[must_use]
    pub fn map_values(self, mut f: impl FnMut(MetricValue) -> MetricValue) -> Self {
        Self {
            entries: self.entries.into_iter().map(|(n, v)| (n, f(v))).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<MetricValue>> FromIterator<(K, V)> for MetricsMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            let _ = map.insert(name, value);
        }
        map
    }
}

impl IntoIterator for MetricsMap {
    type Item = (String, MetricValue);
    type IntoIter = std::vec::IntoIter<(String, MetricValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for MetricsMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for MetricsMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MetricsMapVisitor(PhantomData))
    }
}

struct MetricsMapVisitor(PhantomData<MetricsMap>);

impl<'de> Visitor<'de> for MetricsMapVisitor {
    type Value = MetricsMap;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a map of metric names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = MetricsMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, value)) = access.next_entry::<String, MetricValue>()? {
            let _ = map.insert(name, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut map = MetricsMap::new();
        assert!(map.insert("loss", 0.5).is_none());
        assert!(map.insert("acc", 0.9).is_none());
        assert!(map.insert("epoch", 3_i64).is_none());

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["loss", "acc", "epoch"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map: MetricsMap = [("loss", 0.5), ("acc", 0.9)].into_iter().collect();

        let previous = map.insert("loss", 0.25);

        assert_eq!(previous, Some(MetricValue::Float(0.5)));
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["loss", "acc"]);
        assert_eq!(map.get("loss"), Some(&MetricValue::Float(0.25)));
        assert!(map.contains_key("acc"));
        assert!(!map.contains_key("epoch"));
    }

    #[test]
    fn test_map_values_preserves_keys() {
        let map: MetricsMap = [("a", 1_i64), ("b", 2_i64)].into_iter().collect();

        let doubled = map.map_values(|v| match v {
            MetricValue::Int(n) => MetricValue::Int(n * 2),
            other => other,
        });

        assert_eq!(doubled.get("a"), Some(&MetricValue::Int(2)));
        assert_eq!(doubled.get("b"), Some(&MetricValue::Int(4)));
        assert_eq!(doubled.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_json_preserves_source_order() {
        let map: MetricsMap = serde_json::from_str(r#"{"zeta": 1, "alpha": {"top5": 0.5, "top1": 0.25}}"#).unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        let nested = map.get("alpha").and_then(MetricValue::as_map).unwrap();
        assert_eq!(nested.keys().collect::<Vec<_>>(), vec!["top5", "top1"]);

        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"zeta":1,"alpha":{"top5":0.5,"top1":0.25}}"#);
    }

    #[test]
    fn test_json_rejects_non_object() {
        assert!(serde_json::from_str::<MetricsMap>("[1, 2]").is_err());
        assert!(serde_json::from_str::<MetricsMap>("0.5").is_err());
    }
}
