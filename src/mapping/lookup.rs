use std::collections::{hash_map, HashMap};

/// Lab id → company id, read-only once built.
///
/// Keys are already trimmed. Values may be empty strings but are never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabLookup {
    entries: HashMap<String, String>,
}

impl LabLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts `key → value` unless `key` is already present, in which case
    /// the existing value is kept and `false` is returned.
    pub fn insert_first(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.entries.entry(key.into()) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// First occurrence of a key wins, same as [`LabLookup::insert_first`].
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabLookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut lookup = LabLookup::new();
        for (k, v) in iter {
            lookup.insert_first(k, v);
        }
        lookup
    }
}

impl From<HashMap<String, String>> for LabLookup {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_first_keeps_original_value() {
        let mut lookup = LabLookup::new();
        assert!(lookup.insert_first("L1", "E1"));
        assert!(!lookup.insert_first("L1", "E9"));
        assert_eq!(lookup.get("L1"), Some("E1"));
        assert_eq!(lookup.len(), 1);
    }

    #[test]
    fn test_from_iter_first_wins() {
        let lookup: LabLookup = vec![("L1", "E1"), ("L2", ""), ("L1", "E9")]
            .into_iter()
            .collect();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("L1"), Some("E1"));
        assert_eq!(lookup.get("L2"), Some(""));
        assert_eq!(lookup.get("L3"), None);
    }
}
