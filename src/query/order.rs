// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Priority ordering of the filtered view.
//!
//! Options are ranked into coarse buckets so the important ones stay near the
//! top of a long, paginated list. The sort must be stable: priority alone
//! does not disambiguate options sharing a bucket, and the within-bucket
//! order (the filter's, hence the catalog's) is what keeps re-renders
//! deterministic. `slice::sort_by_key` guarantees stability.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::model::{OptionId, OptionItem};
use crate::query::FilterMatch;

pub const PRIORITY_SPECIAL: u8 = 4;
pub const PRIORITY_PRIMARY: u8 = 3;
pub const PRIORITY_SELECTED: u8 = 2;
pub const PRIORITY_OTHER: u8 = 1;

/// Bucket for one option given the selection snapshot the sort runs against
/// (`working` while editing, `committed` when (re)opening).
pub fn priority(
    item: &OptionItem,
    selected: &BTreeSet<OptionId>,
    primary: Option<&OptionId>,
) -> u8 {
    if item.is_special() {
        return PRIORITY_SPECIAL;
    }
    if primary == Some(item.id()) {
        return PRIORITY_PRIMARY;
    }
    if selected.contains(item.id()) {
        return PRIORITY_SELECTED;
    }
    PRIORITY_OTHER
}

/// Stably re-sorts a filtered view in place, highest bucket first.
pub fn sort_matches(
    matches: &mut [FilterMatch],
    items: &[OptionItem],
    selected: &BTreeSet<OptionId>,
    primary: Option<&OptionId>,
) {
    matches.sort_by_key(|m| Reverse(priority(&items[m.index], selected, primary)));
}

/// Full-catalog priority order, used as the basis for the emitted value of a
/// commit ("primary first" convention for comma-joined labels).
pub fn ordered_ids(
    items: &[OptionItem],
    selected: &BTreeSet<OptionId>,
    primary: Option<&OptionId>,
) -> Vec<OptionId> {
    let mut ids: Vec<(u8, usize)> = items
        .iter()
        .enumerate()
        .map(|(pos, item)| (priority(item, selected, primary), pos))
        .collect();
    ids.sort_by_key(|&(bucket, _)| Reverse(bucket));
    ids.into_iter()
        .map(|(_, pos)| items[pos].id().clone())
        .collect()
}
