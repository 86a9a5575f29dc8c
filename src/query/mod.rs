// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Filtering over a catalog snapshot.
//!
//! `apply` is pure and idempotent so it can be recomputed on every (debounced)
//! keystroke. The output is an order-preserving subsequence of the input;
//! ranking is the orderer's job, not the filter's.

use memchr::memmem;

use crate::model::{OptionItem, TagId};

pub mod order;

/// Minimum rapidfuzz ratio (0..=100) for a fuzzy hit that is not already a
/// plain substring hit.
const FUZZY_MIN_RATIO: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchKind {
    #[default]
    Substring,
    Fuzzy,
}

/// Current text/type filter. Mutations reset the pagination window; that
/// coupling lives in the engine, the state itself is plain data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    query: String,
    type_filter: Option<TagId>,
    match_kind: MatchKind,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn type_filter(&self) -> Option<&TagId> {
        self.type_filter.as_ref()
    }

    pub fn set_type_filter(&mut self, type_filter: Option<TagId>) {
        self.type_filter = type_filter;
    }

    /// Selecting the active type again clears it (type bar behavior).
    pub fn toggle_type_filter(&mut self, tag_id: TagId) {
        if self.type_filter.as_ref() == Some(&tag_id) {
            self.type_filter = None;
        } else {
            self.type_filter = Some(tag_id);
        }
    }

    pub fn match_kind(&self) -> MatchKind {
        self.match_kind
    }

    pub fn set_match_kind(&mut self, match_kind: MatchKind) {
        self.match_kind = match_kind;
    }

    /// Clears the transient inputs (query and type filter); the match kind
    /// is a persistent preference and survives.
    pub fn reset_transient(&mut self) {
        self.query.clear();
        self.type_filter = None;
    }

    pub fn is_transparent(&self) -> bool {
        self.query.trim().is_empty() && self.type_filter.is_none()
    }
}

/// One filtered candidate: its position in the catalog plus whether the
/// query matched a search key exactly (hosts may promote exact hits).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterMatch {
    pub index: usize,
    pub exact: bool,
}

/// Applies the filter, preserving input order.
///
/// A candidate passes when the type filter is unset or its tag set contains
/// the tag, AND the query is empty or matches any search key or any tag's
/// display label (case-insensitively).
pub fn apply(items: &[OptionItem], filter: &FilterState) -> Vec<FilterMatch> {
    let needle = filter.query().trim().to_lowercase();
    let finder = (!needle.is_empty()).then(|| memmem::Finder::new(needle.as_bytes()));

    let mut out = Vec::new();
    for (index, item) in items.iter().enumerate() {
        if let Some(tag_id) = filter.type_filter() {
            if !item.has_tag(tag_id) {
                continue;
            }
        }

        let Some(finder) = finder.as_ref() else {
            out.push(FilterMatch { index, exact: false });
            continue;
        };

        let exact = item
            .search_keys()
            .iter()
            .any(|key| key.as_str() == needle);
        let passes = exact
            || match filter.match_kind() {
                MatchKind::Substring => substring_pass(item, finder),
                MatchKind::Fuzzy => substring_pass(item, finder) || fuzzy_pass(item, &needle),
            };
        if passes {
            out.push(FilterMatch { index, exact });
        }
    }
    out
}

fn substring_pass(item: &OptionItem, finder: &memmem::Finder<'_>) -> bool {
    item.search_keys()
        .iter()
        .any(|key| finder.find(key.as_bytes()).is_some())
        || item
            .tags()
            .iter()
            .any(|tag| finder.find(tag.search_label().as_bytes()).is_some())
}

fn fuzzy_pass(item: &OptionItem, needle: &str) -> bool {
    item.search_keys().iter().any(|key| {
        // rapidfuzz-rs returns a normalized 0.0..=1.0 ratio; scale to 0..=100.
        rapidfuzz::fuzz::ratio(needle.chars(), key.chars()) * 100.0 >= FUZZY_MIN_RATIO
    })
}

#[cfg(test)]
mod tests {
    use super::{apply, FilterMatch, FilterState, MatchKind};
    use crate::catalog::{CatalogBuilder, OptionCatalog, RawOption};
    use crate::model::TagId;

    fn fixture_catalog() -> OptionCatalog {
        CatalogBuilder::new()
            .with_authority_option("-spaces I can access-")
            .build(&[
                RawOption::new(2, "Blueking").with_type("bkcc", "Business"),
                RawOption::new(3, "Demo Project")
                    .with_type("bkci", "DevOps")
                    .with_sub_type("bcs", "Container"),
                RawOption::new(4, "Payments").with_type("bkcc", "Business"),
            ])
    }

    fn matched_labels(catalog: &OptionCatalog, matches: &[FilterMatch]) -> Vec<String> {
        matches
            .iter()
            .map(|m| catalog.items()[m.index].label().to_owned())
            .collect()
    }

    #[test]
    fn empty_filter_passes_everything_in_order() {
        let catalog = fixture_catalog();
        let matches = apply(catalog.items(), &FilterState::new());
        assert_eq!(
            matched_labels(&catalog, &matches),
            vec!["-spaces I can access-", "Blueking", "Demo Project", "Payments"]
        );
    }

    #[test]
    fn query_matches_search_keys_case_insensitively() {
        let catalog = fixture_catalog();
        let mut filter = FilterState::new();
        filter.set_query("BLUE");
        let matches = apply(catalog.items(), &filter);
        assert_eq!(matched_labels(&catalog, &matches), vec!["Blueking"]);
        assert!(!matches[0].exact);
    }

    #[test]
    fn query_matches_tag_display_labels() {
        let catalog = fixture_catalog();
        let mut filter = FilterState::new();
        filter.set_query("container");
        let matches = apply(catalog.items(), &filter);
        assert_eq!(matched_labels(&catalog, &matches), vec!["Demo Project"]);
    }

    #[test]
    fn type_filter_and_query_combine() {
        let catalog = fixture_catalog();
        let mut filter = FilterState::new();
        filter.set_type_filter(Some(TagId::new("bkcc").expect("tag")));
        let matches = apply(catalog.items(), &filter);
        assert_eq!(
            matched_labels(&catalog, &matches),
            vec!["Blueking", "Payments"]
        );

        filter.set_query("pay");
        let matches = apply(catalog.items(), &filter);
        assert_eq!(matched_labels(&catalog, &matches), vec!["Payments"]);
    }

    #[test]
    fn exact_key_match_is_flagged() {
        let catalog = fixture_catalog();
        let mut filter = FilterState::new();
        filter.set_query("payments");
        let matches = apply(catalog.items(), &filter);
        assert_eq!(matches.len(), 1);
        assert!(matches[0].exact);

        filter.set_query("3");
        let matches = apply(catalog.items(), &filter);
        assert!(matches.iter().any(|m| m.exact));
    }

    #[test]
    fn fuzzy_kind_tolerates_small_typos() {
        let catalog = fixture_catalog();
        let mut filter = FilterState::new();
        filter.set_match_kind(MatchKind::Fuzzy);
        filter.set_query("bluking");
        let matches = apply(catalog.items(), &filter);
        assert_eq!(matched_labels(&catalog, &matches), vec!["Blueking"]);

        // Substring mode misses the typo.
        filter.set_match_kind(MatchKind::Substring);
        assert!(apply(catalog.items(), &filter).is_empty());
    }

    #[test]
    fn apply_is_idempotent() {
        let catalog = fixture_catalog();
        let mut filter = FilterState::new();
        filter.set_query("b");
        let first = apply(catalog.items(), &filter);
        let second = apply(catalog.items(), &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn toggle_type_filter_clears_on_repeat() {
        let mut filter = FilterState::new();
        let tag = TagId::new("bkcc").expect("tag");
        filter.toggle_type_filter(tag.clone());
        assert_eq!(filter.type_filter(), Some(&tag));
        filter.toggle_type_filter(tag);
        assert_eq!(filter.type_filter(), None);
    }

    #[test]
    fn reset_transient_keeps_match_kind() {
        let mut filter = FilterState::new();
        filter.set_query("abc");
        filter.set_type_filter(Some(TagId::new("bkcc").expect("tag")));
        filter.set_match_kind(MatchKind::Fuzzy);
        filter.reset_transient();
        assert!(filter.is_transparent());
        assert_eq!(filter.match_kind(), MatchKind::Fuzzy);
    }
}
