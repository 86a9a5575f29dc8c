// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Option catalog: normalizes raw host records into `OptionItem`s.
//!
//! The build is a pure transform. Malformed records (no usable id) and
//! duplicate ids are dropped, never an error; the host can observe the count
//! via [`OptionCatalog::dropped_records`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::model::{DisabledReason, OptionId, OptionItem, Tag, TagId};

mod cache;

pub use cache::{CacheError, CatalogCache};

/// Conventional id of the injected "everything I have permission for" option.
pub const AUTHORITY_OPTION_ID: i64 = -1;
/// Conventional id of the injected "everything with data/alerts" option.
pub const ALERT_OPTION_ID: i64 = -2;

/// Display names may carry a `[...]` prefix (legacy numbering); it is
/// stripped during normalization.
fn bracket_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[[^\]]*\]\s*").expect("valid bracket-prefix pattern"))
}

/// A raw, host-supplied option record.
///
/// Field names are tolerant of the common wire spellings; everything except
/// `id` is optional. `has_data` defaults to `true` so plain records are
/// selectable.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawOption {
    pub id: Option<serde_json::Value>,
    #[serde(alias = "displayName", alias = "name")]
    pub display_name: Option<String>,
    #[serde(alias = "typeId")]
    pub type_id: Option<String>,
    #[serde(alias = "typeLabel", alias = "type_name")]
    pub type_label: Option<String>,
    #[serde(alias = "subTypeId")]
    pub sub_type_id: Option<String>,
    #[serde(alias = "subTypeLabel")]
    pub sub_type_label: Option<String>,
    #[serde(alias = "secondaryId", alias = "code")]
    pub secondary_id: Option<String>,
    #[serde(alias = "noAuth")]
    pub no_auth: bool,
    #[serde(alias = "hasData")]
    pub has_data: bool,
    #[serde(alias = "disabledReason")]
    pub disabled_reason: Option<String>,
}

impl Default for RawOption {
    fn default() -> Self {
        Self {
            id: None,
            display_name: None,
            type_id: None,
            type_label: None,
            sub_type_id: None,
            sub_type_label: None,
            secondary_id: None,
            no_auth: false,
            has_data: true,
            disabled_reason: None,
        }
    }
}

impl RawOption {
    pub fn new(id: impl Into<serde_json::Value>, display_name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            display_name: Some(display_name.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, type_id: impl Into<String>, type_label: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self.type_label = Some(type_label.into());
        self
    }

    pub fn with_sub_type(
        mut self,
        sub_type_id: impl Into<String>,
        sub_type_label: impl Into<String>,
    ) -> Self {
        self.sub_type_id = Some(sub_type_id.into());
        self.sub_type_label = Some(sub_type_label.into());
        self
    }

    pub fn with_secondary(mut self, secondary_id: impl Into<String>) -> Self {
        self.secondary_id = Some(secondary_id.into());
        self
    }

    pub fn with_no_auth(mut self, no_auth: bool) -> Self {
        self.no_auth = no_auth;
        self
    }

    pub fn with_has_data(mut self, has_data: bool) -> Self {
        self.has_data = has_data;
        self
    }
}

/// Configures catalog builds: which special aggregate options to inject
/// ahead of the concrete records.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    specials: Vec<(OptionId, SmolStr)>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects the "everything I have permission for" aggregate option.
    pub fn with_authority_option(mut self, label: impl AsRef<str>) -> Self {
        self.specials
            .push((OptionId::num(AUTHORITY_OPTION_ID), SmolStr::new(label.as_ref())));
        self
    }

    /// Injects the "everything with data" aggregate option.
    pub fn with_alert_option(mut self, label: impl AsRef<str>) -> Self {
        self.specials
            .push((OptionId::num(ALERT_OPTION_ID), SmolStr::new(label.as_ref())));
        self
    }

    /// Injects an arbitrary special option. Specials render in insertion
    /// order, ahead of all concrete records.
    pub fn with_special(mut self, id: OptionId, label: impl AsRef<str>) -> Self {
        self.specials.push((id, SmolStr::new(label.as_ref())));
        self
    }

    /// Builds a catalog snapshot. Pure; the builder can be reused.
    pub fn build(&self, raw_options: &[RawOption]) -> OptionCatalog {
        let mut items: Vec<OptionItem> = Vec::with_capacity(self.specials.len() + raw_options.len());
        let mut index: BTreeMap<OptionId, usize> = BTreeMap::new();
        let mut tag_directory: Vec<Tag> = Vec::new();
        let mut dropped: usize = 0;

        for (id, label) in &self.specials {
            if index.contains_key(id) {
                dropped = dropped.saturating_add(1);
                continue;
            }
            let mut search_keys: SmallVec<[SmolStr; 4]> = SmallVec::new();
            push_key(&mut search_keys, SmolStr::new(label.to_lowercase()));
            push_key(&mut search_keys, id.search_key());
            index.insert(id.clone(), items.len());
            items.push(OptionItem::new(
                id.clone(),
                label.clone(),
                None,
                search_keys,
                SmallVec::new(),
                true,
                None,
            ));
        }

        for raw in raw_options {
            let Some(id) = raw.id.as_ref().and_then(OptionId::from_json) else {
                dropped = dropped.saturating_add(1);
                continue;
            };
            if index.contains_key(&id) {
                dropped = dropped.saturating_add(1);
                continue;
            }

            let label = normalize_label(raw.display_name.as_deref(), &id);
            let secondary = raw
                .secondary_id
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(SmolStr::new);

            let mut tags: SmallVec<[Tag; 2]> = SmallVec::new();
            push_tag(&mut tags, raw.type_id.as_deref(), raw.type_label.as_deref());
            push_tag(&mut tags, raw.sub_type_id.as_deref(), raw.sub_type_label.as_deref());
            for tag in &tags {
                if !tag_directory.iter().any(|known| known.id() == tag.id()) {
                    tag_directory.push(tag.clone());
                }
            }

            let mut search_keys: SmallVec<[SmolStr; 4]> = SmallVec::new();
            push_key(&mut search_keys, SmolStr::new(label.to_lowercase()));
            push_key(&mut search_keys, id.search_key());
            if let Some(secondary) = secondary.as_deref() {
                push_key(&mut search_keys, SmolStr::new(secondary.to_lowercase()));
            }

            let disabled_reason = disabled_reason(raw);
            index.insert(id.clone(), items.len());
            items.push(OptionItem::new(
                id,
                label,
                secondary,
                search_keys,
                tags,
                false,
                disabled_reason,
            ));
        }

        OptionCatalog {
            items,
            index,
            tag_directory,
            dropped,
        }
    }
}

fn normalize_label(display_name: Option<&str>, id: &OptionId) -> SmolStr {
    let raw = match display_name {
        Some(name) if !name.trim().is_empty() => name.trim(),
        _ => return SmolStr::new(id.to_string()),
    };
    let stripped = bracket_prefix().replace(raw, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        // A name that was nothing but its bracket prefix still identifies.
        SmolStr::new(raw)
    } else {
        SmolStr::new(stripped)
    }
}

fn push_tag(tags: &mut SmallVec<[Tag; 2]>, tag_id: Option<&str>, tag_label: Option<&str>) {
    let Some(tag_id) = tag_id.filter(|s| !s.is_empty()) else {
        return;
    };
    let Ok(id) = TagId::new(tag_id) else {
        return;
    };
    if tags.iter().any(|tag| tag.id() == &id) {
        return;
    }
    let label = tag_label.filter(|s| !s.is_empty()).unwrap_or(tag_id);
    tags.push(Tag::new(id, label));
}

fn push_key(keys: &mut SmallVec<[SmolStr; 4]>, key: SmolStr) {
    if key.is_empty() || keys.iter().any(|known| known == &key) {
        return;
    }
    keys.push(key);
}

fn disabled_reason(raw: &RawOption) -> Option<DisabledReason> {
    match raw.disabled_reason.as_deref() {
        Some("no-permission") => return Some(DisabledReason::NoPermission),
        Some("no-data") => return Some(DisabledReason::NoData),
        _ => {}
    }
    if raw.no_auth && !raw.has_data {
        Some(DisabledReason::NoPermission)
    } else {
        None
    }
}

/// An immutable catalog snapshot: normalized options in display order plus
/// an id index and the directory of tags seen (for the type-filter bar).
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    items: Vec<OptionItem>,
    index: BTreeMap<OptionId, usize>,
    tag_directory: Vec<Tag>,
    dropped: usize,
}

impl OptionCatalog {
    pub fn items(&self) -> &[OptionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &OptionId) -> Option<&OptionItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: &OptionId) -> bool {
        self.index.contains_key(id)
    }

    pub fn position(&self, id: &OptionId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Tags in first-seen order, for rendering a type-filter bar.
    pub fn tag_directory(&self) -> &[Tag] {
        &self.tag_directory
    }

    /// Records dropped during the build (missing/invalid or duplicate id).
    pub fn dropped_records(&self) -> usize {
        self.dropped
    }
}
