// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Incremental pagination window over the ordered, filtered view.
//!
//! The window is a growing prefix: `loaded_count` advances by `page_size` on
//! each `load_more` and shrinks only on a full reset (new filter or session
//! reopen). It is host-driven — the host notifies on scroll-near-bottom; the
//! window owns no listener.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationWindow {
    page_size: usize,
    loaded: usize,
    total: usize,
}

impl PaginationWindow {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            loaded: 0,
            total: 0,
        }
    }

    /// Starts over on a freshly filtered view of `total` candidates; the
    /// first page is considered loaded immediately.
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.loaded = self.page_size.min(total);
    }

    /// Appends up to one more page. Returns the newly visible index range;
    /// empty (and a no-op) once everything is loaded.
    pub fn load_more(&mut self) -> Range<usize> {
        let start = self.loaded;
        let end = start.saturating_add(self.page_size).min(self.total);
        self.loaded = end;
        start..end
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    pub fn total_filtered(&self) -> usize {
        self.total
    }

    pub fn is_exhausted(&self) -> bool {
        self.loaded == self.total
    }
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
