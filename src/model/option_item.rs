// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::model::{OptionId, TagId};

/// Why a catalog entry cannot be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    /// The user lacks permission; hosts usually render a "request access"
    /// affordance here.
    NoPermission,
    /// The record carries no data; there is nothing to request.
    NoData,
}

/// A categorical tag attached to an option: the id used for type-filtering
/// plus the display label the text filter also matches against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: TagId,
    label: SmolStr,
    search: SmolStr,
}

impl Tag {
    pub(crate) fn new(id: TagId, label: impl AsRef<str>) -> Self {
        let label = label.as_ref();
        Self {
            id,
            label: SmolStr::new(label),
            search: SmolStr::new(label.to_lowercase()),
        }
    }

    pub fn id(&self) -> &TagId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Lower-cased label used by the text filter.
    pub(crate) fn search_label(&self) -> &str {
        &self.search
    }
}

/// One normalized catalog entry.
///
/// Built by `catalog::CatalogBuilder` from a raw host record and immutable
/// until the next catalog rebuild. Search keys are pre-lowered so the filter
/// never allocates per keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    id: OptionId,
    label: SmolStr,
    secondary: Option<SmolStr>,
    search_keys: SmallVec<[SmolStr; 4]>,
    tags: SmallVec<[Tag; 2]>,
    is_special: bool,
    disabled_reason: Option<DisabledReason>,
}

impl OptionItem {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: OptionId,
        label: SmolStr,
        secondary: Option<SmolStr>,
        search_keys: SmallVec<[SmolStr; 4]>,
        tags: SmallVec<[Tag; 2]>,
        is_special: bool,
        disabled_reason: Option<DisabledReason>,
    ) -> Self {
        Self {
            id,
            label,
            secondary,
            search_keys,
            tags,
            is_special,
            disabled_reason,
        }
    }

    pub fn id(&self) -> &OptionId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Secondary identifier shown next to the label (e.g. a space code).
    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    pub fn search_keys(&self) -> &[SmolStr] {
        &self.search_keys
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tags.iter().any(|tag| tag.id() == tag_id)
    }

    /// Aggregate/virtual choices are mutually exclusive with concrete ones.
    pub fn is_special(&self) -> bool {
        self.is_special
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled_reason.is_some()
    }

    pub fn disabled_reason(&self) -> Option<DisabledReason> {
        self.disabled_reason
    }
}
