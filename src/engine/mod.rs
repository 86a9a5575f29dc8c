// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The engine facade: wires catalog, filter, orderer, window, session and
//! lifecycle together behind one host-facing API.
//!
//! The engine never calls back into the host. Everything it wants the host
//! to know lands in an internal outbox the host drains after each call
//! ([`SelectEngine::drain_events`]); rendering reads the current view via
//! [`SelectEngine::visible`].

use std::ops::Range;
use std::time::Instant;

use crate::catalog::OptionCatalog;
use crate::lifecycle::{PopoverLifecycle, PopoverState, SearchDebounce};
use crate::model::{DisabledReason, OptionId, OptionItem, TagId};
use crate::page::{PaginationWindow, DEFAULT_PAGE_SIZE};
use crate::query::{self, order, FilterState, MatchKind};
use crate::session::{CommitError, SelectMode, SelectionSession};

/// What closing the popover does with an uncommitted draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosePolicy {
    /// Outside interaction commits the draft (the common picker behavior).
    #[default]
    Commit,
    /// Outside interaction discards the draft.
    Cancel,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub mode: SelectMode,
    /// Refuse to commit an empty selection (the commit fails and the popover
    /// stays open so the user can recover).
    pub require_non_empty: bool,
    pub page_size: usize,
    pub close_policy: ClosePolicy,
    /// After a successful commit whose value is exactly one concrete id,
    /// promote that id to primary.
    pub auto_primary_on_commit: bool,
    /// A disabled engine never opens.
    pub disabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: SelectMode::Multiple,
            require_non_empty: true,
            page_size: DEFAULT_PAGE_SIZE,
            close_policy: ClosePolicy::Commit,
            auto_primary_on_commit: false,
            disabled: false,
        }
    }
}

/// Host-facing notifications, drained after each engine call.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The committed selection changed; carries the new value in priority
    /// order (primary first).
    Changed(Vec<OptionId>),
    PrimaryChanged(OptionId),
    /// The user asked for access to a permission-disabled option.
    RequestAccess(OptionId),
    /// A close-commit was refused; the popover stays open.
    InvalidCommit(CommitError),
    /// A catalog swap removed these ids from the working draft.
    StaleSelectionDropped(Vec<OptionId>),
}

#[derive(Debug, Default)]
pub struct SelectEngine {
    config: EngineConfig,
    catalog: OptionCatalog,
    filter: FilterState,
    view: Vec<query::FilterMatch>,
    window: PaginationWindow,
    session: SelectionSession,
    lifecycle: PopoverLifecycle,
    debounce: SearchDebounce,
    events: Vec<EngineEvent>,
}

impl SelectEngine {
    pub fn new(config: EngineConfig) -> Self {
        let window = PaginationWindow::new(config.page_size);
        let session = SelectionSession::new(config.mode);
        Self {
            config,
            window,
            session,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &OptionCatalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn session(&self) -> &SelectionSession {
        &self.session
    }

    pub fn popover_state(&self) -> PopoverState {
        self.lifecycle.state()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    /// Swaps in a new catalog snapshot. While a session is open the view is
    /// refiltered in place and draft ids that no longer resolve are dropped
    /// (committed ids are left alone).
    pub fn set_catalog(&mut self, catalog: OptionCatalog) {
        self.catalog = catalog;
        let catalog = &self.catalog;
        let dropped = self.session.drop_missing(|id| catalog.contains(id));
        if !dropped.is_empty() {
            self.events.push(EngineEvent::StaleSelectionDropped(dropped));
        }
        self.refresh_view();
    }

    /// Applies a query immediately (no debounce). Resets the window.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.set_query(query);
        self.refresh_view();
    }

    /// Schedules a query behind the debounce; `tick` releases it once the
    /// quiet period elapses. Falls back to immediate application when no
    /// session is open (nothing to fence against).
    pub fn set_query_debounced(&mut self, query: impl Into<String>, now: Instant) {
        match self.lifecycle.token().cloned() {
            Some(token) => self.debounce.schedule(query, now, token),
            None => self.set_query(query),
        }
    }

    /// Drives the debounce clock. Returns whether a pending query landed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debounce.poll(now) {
            Some(query) => {
                self.set_query(query);
                true
            }
            None => false,
        }
    }

    pub fn set_type_filter(&mut self, type_filter: Option<TagId>) {
        self.filter.set_type_filter(type_filter);
        self.refresh_view();
    }

    pub fn toggle_type_filter(&mut self, tag_id: TagId) {
        self.filter.toggle_type_filter(tag_id);
        self.refresh_view();
    }

    pub fn set_match_kind(&mut self, match_kind: MatchKind) {
        self.filter.set_match_kind(match_kind);
        self.refresh_view();
    }

    /// Opens an edit session seeded with the host's current value. Returns
    /// `false` (and does nothing) when disabled or already open.
    pub fn open(
        &mut self,
        initial: impl IntoIterator<Item = OptionId>,
        primary: Option<OptionId>,
    ) -> bool {
        if self.lifecycle.begin_open(self.config.disabled).is_none() {
            return false;
        }
        let initial: Vec<(OptionId, bool)> = initial
            .into_iter()
            .map(|id| {
                let is_special = self.catalog.get(&id).is_some_and(OptionItem::is_special);
                (id, is_special)
            })
            .collect();
        self.session.open(initial, self.config.mode, primary);
        self.lifecycle.listeners_attached();
        self.refresh_view();
        true
    }

    /// Closes the popover per the configured policy. Under the commit
    /// policy a refused commit emits [`EngineEvent::InvalidCommit`] and the
    /// popover stays open; returns whether it actually closed.
    pub fn close(&mut self) -> bool {
        if self.lifecycle.state() != PopoverState::Open {
            return false;
        }
        match self.config.close_policy {
            ClosePolicy::Commit => {
                // The session keeps its draft on refusal; nothing tears down.
                if self.commit().is_err() {
                    return false;
                }
                // The draft equals the committed value now; retire it.
                self.session.cancel();
            }
            ClosePolicy::Cancel => {
                self.session.cancel();
            }
        }
        self.lifecycle.begin_close();
        self.finish_close();
        true
    }

    /// Commits the draft explicitly. Emits `Changed` (and possibly
    /// `PrimaryChanged`) on an actual change; a refused empty commit emits
    /// `InvalidCommit` and leaves everything as it was.
    pub fn commit(&mut self) -> Result<(), CommitError> {
        let basis = self.order_basis();
        let outcome = match self.session.commit(self.config.require_non_empty, &basis) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.events.push(EngineEvent::InvalidCommit(err.clone()));
                return Err(err);
            }
        };
        if outcome.changed {
            self.events.push(EngineEvent::Changed(outcome.value.clone()));
            if self.config.auto_primary_on_commit {
                // Auto-switch only when the user landed on a single concrete
                // choice; aggregates and multi-selections leave primary alone.
                let concrete: Vec<OptionId> = outcome
                    .value
                    .iter()
                    .filter(|id| {
                        self.catalog
                            .get(id)
                            .map_or(true, |item| !item.is_special())
                    })
                    .cloned()
                    .collect();
                if let [only] = concrete.as_slice() {
                    self.set_primary(only.clone());
                }
            }
        }
        Ok(())
    }

    /// Discards the draft and closes.
    pub fn cancel(&mut self) -> bool {
        let had_draft = self.session.cancel();
        if self.lifecycle.begin_close() {
            self.finish_close();
        }
        had_draft
    }

    /// Toggles one option in the draft. Disabled options are inert. A change
    /// re-sorts the current view but deliberately keeps the loaded window
    /// (toggling must not yank already-visible rows away).
    pub fn toggle(&mut self, id: &OptionId, checked: bool) -> bool {
        let (is_special, is_disabled) = match self.catalog.get(id) {
            Some(item) => (item.is_special(), item.is_disabled()),
            None => return false,
        };
        if !self.session.toggle(id, checked, is_special, is_disabled) {
            return false;
        }
        self.resort_view();
        true
    }

    /// Empties the draft. No event fires; the change surfaces at commit.
    pub fn clear(&mut self) -> bool {
        if !self.session.clear() {
            return false;
        }
        self.resort_view();
        true
    }

    pub fn set_mode(&mut self, mode: SelectMode) -> bool {
        self.config.mode = mode;
        let basis = self.order_basis();
        let truncated = self.session.set_mode(mode, &basis);
        if truncated && !self.session.is_open() {
            // The externally visible value shrank without a commit. At most
            // one id survives a multiple→single collapse.
            let value = self.session.committed().iter().cloned().collect();
            self.events.push(EngineEvent::Changed(value));
        }
        truncated
    }

    pub fn set_primary(&mut self, id: OptionId) -> bool {
        if !self.session.set_primary(id.clone()) {
            return false;
        }
        self.events.push(EngineEvent::PrimaryChanged(id));
        self.resort_view();
        true
    }

    /// Forwards an access request for a permission-disabled option to the
    /// host, then closes (the host is about to navigate away).
    pub fn request_access(&mut self, id: &OptionId) -> bool {
        let eligible = self
            .catalog
            .get(id)
            .is_some_and(|item| item.disabled_reason() == Some(DisabledReason::NoPermission));
        if !eligible {
            return false;
        }
        self.events.push(EngineEvent::RequestAccess(id.clone()));
        self.close();
        true
    }

    /// Loads one more page; returns the newly visible index range into
    /// [`SelectEngine::visible`].
    pub fn load_more(&mut self) -> Range<usize> {
        self.window.load_more()
    }

    /// The currently rendered slice of the filtered, ordered view.
    pub fn visible(&self) -> impl Iterator<Item = &OptionItem> {
        self.view[..self.window.loaded_count()]
            .iter()
            .map(|m| &self.catalog.items()[m.index])
    }

    pub fn total_filtered(&self) -> usize {
        self.view.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.window.is_exhausted()
    }

    /// Drains the outbox. Events are in emission order.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Full refilter + re-sort + window reset. Runs on catalog swaps, filter
    /// mutations and session opens.
    fn refresh_view(&mut self) {
        let mut matches = query::apply(self.catalog.items(), &self.filter);
        order::sort_matches(
            &mut matches,
            self.catalog.items(),
            self.session.ordering_basis(),
            self.session.primary(),
        );
        self.window.reset(matches.len());
        self.view = matches;
    }

    /// Re-sort only; the window keeps its loaded prefix length.
    fn resort_view(&mut self) {
        let Self {
            view,
            catalog,
            session,
            ..
        } = self;
        order::sort_matches(
            view,
            catalog.items(),
            session.ordering_basis(),
            session.primary(),
        );
    }

    fn order_basis(&self) -> Vec<OptionId> {
        order::ordered_ids(
            self.catalog.items(),
            self.session.ordering_basis(),
            self.session.primary(),
        )
    }

    fn finish_close(&mut self) {
        self.debounce.cancel();
        self.filter.reset_transient();
        self.lifecycle.listeners_detached();
        self.refresh_view();
    }
}

#[cfg(test)]
mod tests;
