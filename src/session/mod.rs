// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transactional selection state.
//!
//! The session holds the committed (externally visible) selection and, while
//! an edit is open, a working draft. Toggles mutate only the draft; the
//! committed value changes on `commit` and survives `cancel` untouched.
//!
//! Exclusivity invariant: at any time the working set holds either exactly
//! one special id and no normal ids, or zero special ids (and at most one id
//! of any kind in single mode). The toggle rules below maintain this by
//! inspecting only the toggled option and the current draft — never the full
//! catalog.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::OptionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    Single,
    #[default]
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    EmptySelection,
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelection => f.write_str("selection must not be empty"),
        }
    }
}

impl std::error::Error for CommitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Whether the committed set actually differs from the pre-commit one
    /// (order-insensitive comparison).
    pub changed: bool,
    /// The committed ids in the caller-supplied priority order.
    pub value: Vec<OptionId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Working {
    set: BTreeSet<OptionId>,
    /// The special members of `set`. Under the invariant this holds at most
    /// one id, but it is kept as a set so a non-conforming initial value
    /// still converges after the first toggle.
    specials: BTreeSet<OptionId>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    committed: BTreeSet<OptionId>,
    working: Option<Working>,
    mode: SelectMode,
    primary: Option<OptionId>,
}

impl SelectionSession {
    pub fn new(mode: SelectMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn committed(&self) -> &BTreeSet<OptionId> {
        &self.committed
    }

    pub fn working(&self) -> Option<&BTreeSet<OptionId>> {
        self.working.as_ref().map(|w| &w.set)
    }

    pub fn is_open(&self) -> bool {
        self.working.is_some()
    }

    pub fn primary(&self) -> Option<&OptionId> {
        self.primary.as_ref()
    }

    /// The selection snapshot ordering should run against: the draft while
    /// editing, the committed value otherwise (so reopening does not jitter
    /// merely because the user was mid-edit last time).
    pub fn ordering_basis(&self) -> &BTreeSet<OptionId> {
        match &self.working {
            Some(working) => &working.set,
            None => &self.committed,
        }
    }

    /// Begins an edit: snapshots `initial` as both the committed value and
    /// the working draft. Each id carries its is-special flag.
    pub fn open(
        &mut self,
        initial: impl IntoIterator<Item = (OptionId, bool)>,
        mode: SelectMode,
        primary: Option<OptionId>,
    ) {
        let mut set = BTreeSet::new();
        let mut specials = BTreeSet::new();
        for (id, is_special) in initial {
            if is_special {
                specials.insert(id.clone());
            }
            set.insert(id);
        }
        self.committed = set.clone();
        self.working = Some(Working { set, specials });
        self.mode = mode;
        if primary.is_some() {
            self.primary = primary;
        }
    }

    /// Applies one toggle to the draft. Returns whether anything changed.
    ///
    /// Disabled options are inert: the call is a silent no-op, not an error.
    pub fn toggle(
        &mut self,
        id: &OptionId,
        checked: bool,
        is_special: bool,
        is_disabled: bool,
    ) -> bool {
        if is_disabled {
            return false;
        }
        let Some(working) = self.working.as_mut() else {
            return false;
        };

        match self.mode {
            SelectMode::Single => {
                if checked {
                    let already = working.set.len() == 1 && working.set.contains(id);
                    working.set.clear();
                    working.specials.clear();
                    working.set.insert(id.clone());
                    if is_special {
                        working.specials.insert(id.clone());
                    }
                    !already
                } else {
                    // Unchecking in single mode empties the draft outright.
                    let mutated = !working.set.is_empty();
                    working.set.clear();
                    working.specials.clear();
                    mutated
                }
            }
            SelectMode::Multiple => {
                if checked && is_special {
                    // A special choice stands alone.
                    let already = working.set.len() == 1 && working.set.contains(id);
                    working.set.clear();
                    working.specials.clear();
                    working.set.insert(id.clone());
                    working.specials.insert(id.clone());
                    !already
                } else if checked {
                    // A concrete choice evicts any special one.
                    let mut mutated = false;
                    for special in std::mem::take(&mut working.specials) {
                        mutated |= working.set.remove(&special);
                    }
                    mutated | working.set.insert(id.clone())
                } else {
                    working.specials.remove(id);
                    working.set.remove(id)
                }
            }
        }
    }

    /// Empties the draft. Deliberately emits nothing by itself — the change
    /// becomes externally visible only through the next successful commit
    /// (product decision; see DESIGN.md).
    pub fn clear(&mut self) -> bool {
        let Some(working) = self.working.as_mut() else {
            return false;
        };
        let mutated = !working.set.is_empty();
        working.set.clear();
        working.specials.clear();
        mutated
    }

    /// Replaces the committed value with the draft.
    ///
    /// `order_basis` is a priority-ordered id list (typically the whole
    /// catalog, primary first) used to order the emitted value; draft members
    /// missing from the basis are appended in id order.
    pub fn commit(
        &mut self,
        require_non_empty: bool,
        order_basis: &[OptionId],
    ) -> Result<CommitOutcome, CommitError> {
        let Some(working) = self.working.as_ref() else {
            return Ok(CommitOutcome {
                changed: false,
                value: order_value(&self.committed, order_basis),
            });
        };
        if require_non_empty && working.set.is_empty() {
            return Err(CommitError::EmptySelection);
        }

        let changed = working.set != self.committed;
        self.committed = working.set.clone();
        Ok(CommitOutcome {
            changed,
            value: order_value(&self.committed, order_basis),
        })
    }

    /// Discards the draft; the committed value is untouched.
    pub fn cancel(&mut self) -> bool {
        self.working.take().is_some()
    }

    /// Switches select mode. Collapsing multiple→single keeps only the first
    /// id of the current selection in `order_basis` order. Returns whether
    /// the selection was truncated.
    pub fn set_mode(&mut self, mode: SelectMode, order_basis: &[OptionId]) -> bool {
        self.mode = mode;
        if mode == SelectMode::Multiple {
            return false;
        }

        match self.working.as_mut() {
            Some(working) => {
                if working.set.len() <= 1 {
                    return false;
                }
                let keep = first_in_basis(&working.set, order_basis);
                working.set.retain(|id| Some(id) == keep.as_ref());
                working.specials.retain(|id| working.set.contains(id));
                true
            }
            None => {
                if self.committed.len() <= 1 {
                    return false;
                }
                let keep = first_in_basis(&self.committed, order_basis);
                self.committed.retain(|id| Some(id) == keep.as_ref());
                true
            }
        }
    }

    /// Marks the "current context" member. Orthogonal to set membership;
    /// the caller decides whether a distinct primary-changed signal fires.
    pub fn set_primary(&mut self, id: OptionId) -> bool {
        if self.primary.as_ref() == Some(&id) {
            return false;
        }
        self.primary = Some(id);
        true
    }

    /// Repairs the draft after a catalog rebuild: ids that no longer resolve
    /// are dropped from the draft (never from the committed value). Returns
    /// the dropped ids.
    pub fn drop_missing(&mut self, exists: impl Fn(&OptionId) -> bool) -> Vec<OptionId> {
        let Some(working) = self.working.as_mut() else {
            return Vec::new();
        };
        let dropped: Vec<OptionId> = working
            .set
            .iter()
            .filter(|id| !exists(id))
            .cloned()
            .collect();
        for id in &dropped {
            working.set.remove(id);
            working.specials.remove(id);
        }
        dropped
    }
}

fn order_value(selected: &BTreeSet<OptionId>, order_basis: &[OptionId]) -> Vec<OptionId> {
    let mut value: Vec<OptionId> = order_basis
        .iter()
        .filter(|id| selected.contains(*id))
        .cloned()
        .collect();
    for id in selected {
        if !value.contains(id) {
            value.push(id.clone());
        }
    }
    value
}

fn first_in_basis(selected: &BTreeSet<OptionId>, order_basis: &[OptionId]) -> Option<OptionId> {
    order_basis
        .iter()
        .find(|id| selected.contains(*id))
        .cloned()
        .or_else(|| selected.iter().next().cloned())
}
