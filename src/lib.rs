// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selene — an incremental selectable-list engine (catalog, filter, priority
//! ordering, pagination, transactional selection, popover lifecycle).
//!
//! The library is framework-agnostic: the engine owns list state and emits
//! events into an outbox the host drains; rendering and input stay with the
//! host. `tui` ships a reference host on ratatui.

pub mod catalog;
pub mod engine;
pub mod lifecycle;
pub mod model;
pub mod page;
pub mod query;
pub mod session;
pub mod tui;

#[cfg(test)]
mod tests {
    #[test]
    fn sanity() {
        assert_eq!(2 + 2, 4);
    }
}
