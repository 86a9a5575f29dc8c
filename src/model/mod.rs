// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: typed ids and the normalized option representation.

mod ids;
mod option_item;

pub use ids::{IdError, OptionId, TagId};
pub use option_item::{DisabledReason, OptionItem, Tag};
