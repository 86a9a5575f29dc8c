// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Explicit raw-list cache.
//!
//! Hosts that fetch option lists for several pickers tend to reach for a
//! module-level singleton; that silently shares mutable state across
//! otherwise independent sessions. This cache is constructor-injected
//! instead, with an explicit lifecycle: `init` to store a list under a key,
//! `invalidate` to evict, `dispose` to shut the cache down for good. The
//! generation counter lets a host cheaply detect that anything changed.

use std::collections::BTreeMap;
use std::fmt;

use smol_str::SmolStr;

use crate::catalog::RawOption;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    Disposed,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disposed => f.write_str("cache has been disposed"),
        }
    }
}

impl std::error::Error for CacheError {}

#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: BTreeMap<SmolStr, Vec<RawOption>>,
    generation: u64,
    disposed: bool,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) the raw list under `key`.
    pub fn init(&mut self, key: impl AsRef<str>, raw: Vec<RawOption>) -> Result<(), CacheError> {
        if self.disposed {
            return Err(CacheError::Disposed);
        }
        self.entries.insert(SmolStr::new(key.as_ref()), raw);
        self.generation = self.generation.saturating_add(1);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&[RawOption]> {
        if self.disposed {
            return None;
        }
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Evicts one key. Returns whether an entry existed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        if self.disposed {
            return false;
        }
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.generation = self.generation.saturating_add(1);
        }
        removed
    }

    pub fn invalidate_all(&mut self) {
        if self.disposed || self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.generation = self.generation.saturating_add(1);
    }

    /// Terminal: drops all entries and rejects further `init` calls.
    pub fn dispose(&mut self) {
        self.entries.clear();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Bumped on every mutation; equal generations imply equal contents.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
