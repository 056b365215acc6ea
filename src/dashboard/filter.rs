//! Search and per-field filters.

use crate::record::{Field, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Active search term and field selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Case-insensitive substring matched against `username`
    #[serde(default)]
    pub search: String,

    /// Exact-match selections
    #[serde(default)]
    pub fields: BTreeMap<Field, FieldValue>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_field(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.set_field(field, Some(value.into()));
        self
    }

    /// Select a value for `field`, or clear the selection with `None`
    pub fn set_field(&mut self, field: Field, value: Option<FieldValue>) {
        match value {
            Some(v) => {
                self.fields.insert(field, v);
            }
            None => {
                self.fields.remove(&field);
            }
        }
    }

    /// Drop every field selection. The search term is kept.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.fields.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_search(record)
            && self
                .fields
                .iter()
                .all(|(field, wanted)| record.get(field) == wanted)
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.search.is_empty() {
            return true;
        }
        match record.get(Field::Username).as_str() {
            Some(name) => name.to_lowercase().contains(&self.search.to_lowercase()),
            None => false,
        }
    }
}

/// Records passing `filters`, in input order
pub fn apply_filters(records: &[Record], filters: &Filters) -> Vec<Record> {
    records
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect()
}

/// Distinct non-null values of `field` in first-seen order
pub fn filter_options(records: &[Record], field: Field) -> Vec<FieldValue> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.get(field))
        .filter(|v| !v.is_null())
        .filter(|v| seen.insert(*v))
        .cloned()
        .collect()
}

/// Map user-typed text onto an observed value of `field`.
///
/// Picks the first value whose display text equals `text`, so `28` selects
/// the number when the data holds numbers and the string when it holds
/// strings. Falls back to a string value when nothing matches.
pub fn resolve_filter_value(records: &[Record], field: Field, text: &str) -> FieldValue {
    records
        .iter()
        .map(|r| r.get(field))
        .find(|v| !v.is_null() && v.to_string() == text)
        .cloned()
        .unwrap_or_else(|| FieldValue::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new().with("username", "Asha Rao").with("zone", "A").with("sdk_int", 28i64),
            Record::new().with("username", "Ben").with("zone", "B").with("sdk_int", 30i64),
            Record::new().with("zone", "A"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let filters = Filters::new().with_search("ASHA");
        assert_eq!(apply_filters(&sample(), &filters).len(), 1);
    }

    #[test]
    fn test_missing_username_never_matches_search() {
        let filters = Filters::new().with_search("a");
        let filtered = apply_filters(&sample(), &filters);
        assert!(filtered.iter().all(|r| !r.get("username").is_null()));
    }

    #[test]
    fn test_field_filter_exact() {
        let records = sample();
        let by_number = Filters::new().with_field(Field::SdkInt, 28i64);
        assert_eq!(apply_filters(&records, &by_number).len(), 1);

        let by_string = Filters::new().with_field(Field::SdkInt, "28");
        assert!(apply_filters(&records, &by_string).is_empty());
    }

    #[test]
    fn test_clear_keeps_search() {
        let mut filters = Filters::new()
            .with_search("ben")
            .with_field(Field::Zone, "A");
        filters.clear();
        assert!(filters.fields.is_empty());
        assert_eq!(filters.search, "ben");
    }

    #[test]
    fn test_filter_options_skip_null() {
        let options = filter_options(&sample(), Field::SdkInt);
        assert_eq!(options, vec![FieldValue::from(28i64), FieldValue::from(30i64)]);
    }

    #[test]
    fn test_resolve_filter_value() {
        let records = sample();
        assert_eq!(
            resolve_filter_value(&records, Field::SdkInt, "30"),
            FieldValue::from(30i64)
        );
        assert_eq!(
            resolve_filter_value(&records, Field::Zone, "Z"),
            FieldValue::from("Z")
        );
    }
}
