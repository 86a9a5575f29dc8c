// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smol_str::SmolStr;

/// A stable option identifier.
///
/// Host catalogs mix numeric ids (concrete records) with symbolic keys
/// (aggregate choices like `"all"`), so the id is a closed two-variant enum
/// rather than a stringly-typed value. Identity, ordering, and hashing all
/// derive from the variant content; an id is unique within one catalog
/// snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionId {
    Num(i64),
    Key(SmolStr),
}

impl OptionId {
    pub fn num(value: i64) -> Self {
        Self::Num(value)
    }

    pub fn key(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self::Key(SmolStr::new(value)))
    }

    /// Extracts an id from a tolerant JSON value (`7`, `"7"`, `"all"`).
    ///
    /// Returns `None` for anything that cannot identify a record: missing
    /// values, empty strings, floats, booleans, arrays, objects.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(Self::Num),
            serde_json::Value::String(s) => {
                if s.is_empty() {
                    return None;
                }
                match s.parse::<i64>() {
                    Ok(n) => Some(Self::Num(n)),
                    Err(_) => Some(Self::Key(SmolStr::new(s))),
                }
            }
            _ => None,
        }
    }

    /// Lower-cased textual form used as a search key.
    pub fn search_key(&self) -> SmolStr {
        match self {
            Self::Num(n) => {
                let mut buf = itoa::Buffer::new();
                SmolStr::new(buf.format(*n))
            }
            Self::Key(k) => SmolStr::new(k.to_lowercase()),
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => {
                let mut buf = itoa::Buffer::new();
                f.write_str(buf.format(*n))
            }
            Self::Key(k) => f.write_str(k),
        }
    }
}

impl From<i64> for OptionId {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

/// A categorical tag id (e.g. a space type). Many-to-many with options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(SmolStr);

impl TagId {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(SmolStr::new(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TagId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
        }
    }
}

impl std::error::Error for IdError {}
