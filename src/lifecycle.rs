// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Popover lifecycle and stale-interaction fencing.
//!
//! The overlay moves through four phases; transition calls out of phase are
//! no-ops, so a double-close or a close racing an open cannot corrupt state.
//! Each open hands out a fresh [`InteractionToken`]; closing invalidates it,
//! and any async result (debounced search, deferred loads) carrying an
//! invalidated token must be discarded. Tokens are never re-armed — a new
//! open mints a new one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopoverState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

/// Validity handle for one open session. Cheap to clone; all clones observe
/// the same invalidation.
#[derive(Debug, Clone)]
pub struct InteractionToken(Arc<AtomicBool>);

impl InteractionToken {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_valid(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn invalidate(&self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Default)]
pub struct PopoverLifecycle {
    state: PopoverState,
    token: Option<InteractionToken>,
}

impl PopoverLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PopoverState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PopoverState::Opening | PopoverState::Open)
    }

    /// Token of the current session, while one is open.
    pub fn token(&self) -> Option<&InteractionToken> {
        self.token.as_ref()
    }

    /// Closed → Opening, minting the session token. Returns `None` (and
    /// stays put) when disabled or not currently closed.
    pub fn begin_open(&mut self, disabled: bool) -> Option<InteractionToken> {
        if disabled || self.state != PopoverState::Closed {
            return None;
        }
        self.state = PopoverState::Opening;
        let token = InteractionToken::new();
        self.token = Some(token.clone());
        Some(token)
    }

    /// Opening → Open, once the host has its outside-interaction listeners
    /// in place.
    pub fn listeners_attached(&mut self) -> bool {
        if self.state != PopoverState::Opening {
            return false;
        }
        self.state = PopoverState::Open;
        true
    }

    /// Open → Closing. The token stays valid until teardown completes so
    /// the commit performed on close may still run.
    pub fn begin_close(&mut self) -> bool {
        if self.state != PopoverState::Open {
            return false;
        }
        self.state = PopoverState::Closing;
        true
    }

    /// Closing → Closed, invalidating the session token.
    pub fn listeners_detached(&mut self) -> bool {
        if self.state != PopoverState::Closing {
            return false;
        }
        self.state = PopoverState::Closed;
        if let Some(token) = self.token.take() {
            token.invalidate();
        }
        true
    }
}

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Trailing-edge debounce for search input, driven by the host clock.
///
/// Each keystroke replaces the pending query and restarts the timer; `poll`
/// releases the query once the quiet period has elapsed, unless the session
/// token it was scheduled under has been invalidated in the meantime.
#[derive(Debug)]
pub struct SearchDebounce {
    pending: Option<Pending>,
    delay: Duration,
}

impl Default for SearchDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[derive(Debug)]
struct Pending {
    query: String,
    due_at: Instant,
    token: InteractionToken,
}

impl SearchDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: None,
            delay,
        }
    }

    pub fn schedule(&mut self, query: impl Into<String>, now: Instant, token: InteractionToken) {
        self.pending = Some(Pending {
            query: query.into(),
            due_at: now + self.delay,
            token,
        });
    }

    /// Releases the pending query if its quiet period elapsed. A query whose
    /// token died is dropped silently.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.due_at);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        pending.token.is_valid().then_some(pending.query)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
