use std::collections::BTreeMap;

use serde::Serialize;

/// Basename renames recorded by the walker, read by the relinker.
///
/// Only renames that succeeded and changed the name end up here. Once the
/// walk returns, the mapping is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenameMapping {
    entries: BTreeMap<String, String>,
}

impl RenameMapping {
    pub(crate) fn record(&mut self, old_name: impl Into<String>, new_name: impl Into<String>) {
        self.entries.insert(old_name.into(), new_name.into());
    }

    pub fn get(&self, old_name: &str) -> Option<&str> {
        self.entries.get(old_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs whose name actually changed, in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(old, new)| old != new)
            .map(|(old, new)| (old.as_str(), new.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RenameMapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut mapping = RenameMapping::default();
        for (old, new) in iter {
            mapping.record(old, new);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iter_skips_identity_pairs() {
        let mapping: RenameMapping = [("a b.md", "a.md"), ("same.md", "same.md")]
            .into_iter()
            .collect();
        let pairs: Vec<_> = mapping.iter().collect();
        assert_eq!(pairs, vec![("a b.md", "a.md")]);
    }

    #[test]
    fn test_serializes_as_object() {
        let mapping: RenameMapping = [("Old 0123.md", "Old.md")].into_iter().collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"Old 0123.md":"Old.md"}"#);
    }
}
