//! ProvinceIndex: immutable, ordered list of provinces with name lookup

use super::dataset::BUILTIN_PROVINCES;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A single province entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProvinceRecord {
    pub id: String,
    pub name: String,
    pub region: String,
}

impl ProvinceRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region: region.into(),
        }
    }
}

/// Errors raised while building an index
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProvinceError {
    #[error("Duplicate province id: {0}")]
    DuplicateId(String),

    #[error("Province {0} has an empty name")]
    EmptyName(String),
}

/// Ordered, read-only province list.
///
/// Records are fixed at construction; every lookup preserves the original
/// order.
#[derive(Debug, Clone)]
pub struct ProvinceIndex {
    records: Vec<ProvinceRecord>,
    /// Lowercased names, parallel to `records`
    folded: Vec<String>,
}

impl ProvinceIndex {
    /// Build an index from records, rejecting duplicate ids and blank names
    pub fn from_records(records: Vec<ProvinceRecord>) -> Result<Self, ProvinceError> {
        let mut seen = HashSet::new();
        for record in &records {
            if record.name.trim().is_empty() {
                return Err(ProvinceError::EmptyName(record.id.clone()));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(ProvinceError::DuplicateId(record.id.clone()));
            }
        }

        let folded = records.iter().map(|r| r.name.to_lowercase()).collect();
        Ok(Self { records, folded })
    }

    /// The built-in table of Vietnamese provinces
    pub fn builtin() -> Self {
        let records = BUILTIN_PROVINCES
            .iter()
            .map(|(id, name, region)| ProvinceRecord::new(*id, *name, *region))
            .collect::<Vec<_>>();
        let folded = records.iter().map(|r| r.name.to_lowercase()).collect();
        Self { records, folded }
    }

    /// All records in original order
    pub fn records(&self) -> &[ProvinceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Option<&ProvinceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Exact, case-insensitive name match (surrounding whitespace ignored)
    pub fn find_by_name(&self, name: &str) -> Option<&ProvinceRecord> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.folded
            .iter()
            .position(|n| *n == needle)
            .map(|i| &self.records[i])
    }

    /// Records whose name contains `query` case-insensitively.
    ///
    /// An empty query matches nothing.
    pub fn filter(&self, query: &str) -> Vec<&ProvinceRecord> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.records
            .iter()
            .zip(&self.folded)
            .filter(|(_, folded)| folded.contains(&needle))
            .map(|(record, _)| record)
            .collect()
    }

    /// Dropdown contents for the current query.
    ///
    /// Hidden while the query is exactly the selected province's name.
    pub fn suggestions(
        &self,
        query: &str,
        selected: Option<&ProvinceRecord>,
    ) -> Vec<&ProvinceRecord> {
        if selected.is_some_and(|p| p.name == query) {
            return Vec::new();
        }
        self.filter(query)
    }

    /// Records belonging to a region (case-insensitive)
    pub fn in_region(&self, region: &str) -> Vec<&ProvinceRecord> {
        let region = region.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.region.to_lowercase() == region)
            .collect()
    }
}

impl Default for ProvinceIndex {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cities() -> ProvinceIndex {
        ProvinceIndex::from_records(vec![
            ProvinceRecord::new("hn", "Hà Nội", "North"),
            ProvinceRecord::new("hcm", "Hồ Chí Minh", "South"),
        ])
        .unwrap()
    }

    #[test]
    fn filter_matches_substring_case_insensitively() {
        let index = two_cities();

        let hits = index.filter("Hà");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Hà Nội");
        assert_eq!(hits[0].region, "North");

        let hits = index.filter("nỘi");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "hn");
    }

    #[test]
    fn filter_empty_query_returns_nothing() {
        assert!(two_cities().filter("").is_empty());
    }

    #[test]
    fn filter_preserves_original_order() {
        let index = ProvinceIndex::from_records(vec![
            ProvinceRecord::new("c", "Quảng Trị", "Central"),
            ProvinceRecord::new("a", "Quảng Nam", "Central"),
            ProvinceRecord::new("b", "Quảng Ninh", "North"),
        ])
        .unwrap();

        let ids: Vec<_> = index.filter("quảng").iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn filter_is_literal_not_fuzzy() {
        let index = two_cities();
        assert!(index.filter("Ha Noi").is_empty());
        assert!(index.filter("xyz").is_empty());
    }

    #[test]
    fn suggestions_hidden_when_query_equals_selection() {
        let index = two_cities();
        let selected = index.get("hn").cloned();

        assert!(index.suggestions("Hà Nội", selected.as_ref()).is_empty());
        assert_eq!(index.suggestions("Hà", selected.as_ref()).len(), 1);
        assert_eq!(index.suggestions("Hà Nội", None).len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ProvinceIndex::from_records(vec![
            ProvinceRecord::new("x", "Hà Nội", "North"),
            ProvinceRecord::new("x", "Huế", "Central"),
        ])
        .unwrap_err();
        assert_eq!(err, ProvinceError::DuplicateId("x".into()));
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = ProvinceIndex::from_records(vec![ProvinceRecord::new("x", "  ", "North")])
            .unwrap_err();
        assert_eq!(err, ProvinceError::EmptyName("x".into()));
    }

    #[test]
    fn find_by_name_is_exact() {
        let index = ProvinceIndex::builtin();
        assert_eq!(index.find_by_name(" đà nẵng ").unwrap().id, "da-nang");
        assert!(index.find_by_name("Đà").is_none());
        assert!(index.find_by_name("").is_none());
    }

    #[test]
    fn builtin_lookup_and_regions() {
        let index = ProvinceIndex::builtin();
        assert_eq!(index.len(), 63);
        assert_eq!(index.get("can-tho").unwrap().name, "Cần Thơ");

        let north = index.in_region("miền bắc");
        assert_eq!(north.len(), 25);
        assert!(north.iter().all(|r| r.region == "Miền Bắc"));
    }

    #[test]
    fn builtin_filter_spans_regions() {
        let index = ProvinceIndex::builtin();
        let names: Vec<_> = index.filter("giang").iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Hà Giang",
                "Bắc Giang",
                "Tiền Giang",
                "An Giang",
                "Kiên Giang",
                "Hậu Giang"
            ]
        );
    }
}
