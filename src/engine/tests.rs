// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use super::{ClosePolicy, EngineConfig, EngineEvent, SelectEngine};
use crate::catalog::{CatalogBuilder, OptionCatalog, RawOption};
use crate::lifecycle::PopoverState;
use crate::model::OptionId;
use crate::session::{CommitError, SelectMode};

fn fixture_catalog() -> OptionCatalog {
    CatalogBuilder::new()
        .with_authority_option("-spaces I can access-")
        .build(&[
            RawOption::new(2, "Blueking").with_type("bkcc", "Business"),
            RawOption::new(3, "Demo Project").with_type("bkci", "DevOps"),
            RawOption::new(4, "Payments").with_type("bkcc", "Business"),
            RawOption::new(5, "Locked")
                .with_no_auth(true)
                .with_has_data(false),
        ])
}

fn engine_with(config: EngineConfig) -> SelectEngine {
    let mut engine = SelectEngine::new(config);
    engine.set_catalog(fixture_catalog());
    engine.drain_events();
    engine
}

fn engine() -> SelectEngine {
    engine_with(EngineConfig::default())
}

fn id(value: i64) -> OptionId {
    OptionId::num(value)
}

fn visible_ids(engine: &SelectEngine) -> Vec<OptionId> {
    engine.visible().map(|item| item.id().clone()).collect()
}

#[test]
fn open_seeds_the_draft_and_sorts_selected_first() {
    let mut engine = engine();
    assert!(engine.open([id(4)], None));
    assert_eq!(engine.popover_state(), PopoverState::Open);
    // Special first, then the selected id, then the rest in catalog order.
    assert_eq!(visible_ids(&engine), vec![id(-1), id(4), id(2), id(3), id(5)]);
}

#[test]
fn open_is_refused_while_open_or_disabled() {
    let mut engine = engine();
    assert!(engine.open([], None));
    assert!(!engine.open([], None));

    let mut disabled = engine_with(EngineConfig {
        disabled: true,
        ..EngineConfig::default()
    });
    assert!(!disabled.open([], None));
    assert_eq!(disabled.popover_state(), PopoverState::Closed);
}

#[test]
fn toggle_resorts_but_keeps_the_loaded_window() {
    let mut engine = engine_with(EngineConfig {
        page_size: 3,
        ..EngineConfig::default()
    });
    engine.open([], None);
    assert_eq!(visible_ids(&engine).len(), 3);

    engine.toggle(&id(5), true); // disabled, inert
    assert!(!engine.session().working().expect("open").contains(&id(5)));

    engine.toggle(&id(4), true);
    // Re-sorted: 4 jumps into the visible prefix, which stays 3 long.
    assert_eq!(visible_ids(&engine), vec![id(-1), id(4), id(2)]);
}

#[test]
fn close_commits_and_emits_changed_in_priority_order() {
    let mut engine = engine();
    engine.open([id(2)], None);
    engine.toggle(&id(4), true);
    assert!(engine.close());

    assert_eq!(engine.popover_state(), PopoverState::Closed);
    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::Changed(vec![id(2), id(4)])]
    );
    assert!(!engine.is_open());
}

#[test]
fn close_without_changes_emits_nothing() {
    let mut engine = engine();
    engine.open([id(2)], None);
    assert!(engine.close());
    assert!(engine.drain_events().is_empty());
}

#[test]
fn empty_commit_keeps_the_popover_open() {
    let mut engine = engine();
    engine.open([id(2)], None);
    engine.toggle(&id(2), false);
    assert!(!engine.close());

    assert_eq!(engine.popover_state(), PopoverState::Open);
    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::InvalidCommit(CommitError::EmptySelection)]
    );

    // Recoverable: pick something and close again.
    engine.toggle(&id(3), true);
    assert!(engine.close());
    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::Changed(vec![id(3)])]
    );
}

#[test]
fn cancel_policy_discards_the_draft_on_close() {
    let mut engine = engine_with(EngineConfig {
        close_policy: ClosePolicy::Cancel,
        ..EngineConfig::default()
    });
    engine.open([id(2)], None);
    engine.toggle(&id(4), true);
    assert!(engine.close());
    assert!(engine.drain_events().is_empty());
    assert_eq!(
        engine.session().committed().iter().cloned().collect::<Vec<_>>(),
        vec![id(2)]
    );
}

#[test]
fn special_toggle_is_exclusive_end_to_end() {
    let mut engine = engine();
    engine.open([id(2), id(3)], None);
    engine.toggle(&id(-1), true);
    assert_eq!(
        engine.session().working().expect("open").len(),
        1,
        "special stands alone"
    );
    engine.toggle(&id(4), true);
    assert!(!engine.session().working().expect("open").contains(&id(-1)));
    assert!(engine.close());
    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::Changed(vec![id(4)])]
    );
}

#[test]
fn query_narrows_and_close_resets_transient_filter() {
    let mut engine = engine();
    engine.open([], None);
    engine.set_query("blue");
    assert_eq!(visible_ids(&engine), vec![id(2)]);
    assert_eq!(engine.total_filtered(), 1);

    engine.toggle(&id(2), true);
    engine.close();
    engine.drain_events();

    // Next open sees the unfiltered catalog again.
    engine.open([id(2)], None);
    assert_eq!(engine.total_filtered(), 5);
    assert_eq!(engine.filter().query(), "");
}

#[test]
fn debounced_query_lands_only_after_the_quiet_period() {
    let mut engine = engine();
    engine.open([], None);
    let start = Instant::now();

    engine.set_query_debounced("blu", start);
    engine.set_query_debounced("blue", start + Duration::from_millis(200));
    assert!(!engine.tick(start + Duration::from_millis(400)));
    assert_eq!(engine.total_filtered(), 5);

    assert!(engine.tick(start + Duration::from_millis(600)));
    assert_eq!(visible_ids(&engine), vec![id(2)]);
}

#[test]
fn debounced_query_from_a_closed_session_is_dropped() {
    let mut engine = engine();
    engine.open([id(2)], None);
    let start = Instant::now();
    engine.set_query_debounced("blue", start);
    engine.close();
    engine.drain_events();

    assert!(!engine.tick(start + Duration::from_secs(1)));
    engine.open([id(2)], None);
    assert_eq!(engine.total_filtered(), 5);
}

#[test]
fn pagination_walks_the_filtered_view() {
    let mut engine = engine_with(EngineConfig {
        page_size: 2,
        ..EngineConfig::default()
    });
    engine.open([], None);
    assert_eq!(visible_ids(&engine).len(), 2);
    assert_eq!(engine.load_more(), 2..4);
    assert_eq!(engine.load_more(), 4..5);
    assert!(engine.is_exhausted());
    assert_eq!(engine.load_more(), 5..5);
    assert_eq!(visible_ids(&engine).len(), 5);
}

#[test]
fn type_filter_resets_the_window() {
    let mut engine = engine_with(EngineConfig {
        page_size: 2,
        ..EngineConfig::default()
    });
    engine.open([], None);
    engine.load_more();

    let tag = engine.catalog().tag_directory()[0].id().clone(); // bkcc
    engine.toggle_type_filter(tag.clone());
    assert_eq!(visible_ids(&engine), vec![id(2), id(4)]);

    engine.toggle_type_filter(tag);
    assert_eq!(engine.total_filtered(), 5);
    assert_eq!(visible_ids(&engine).len(), 2);
}

#[test]
fn catalog_swap_mid_session_drops_stale_draft_ids() {
    let mut engine = engine();
    engine.open([id(2), id(3)], None);

    let smaller = CatalogBuilder::new()
        .with_authority_option("-spaces I can access-")
        .build(&[RawOption::new(2, "Blueking")]);
    engine.set_catalog(smaller);

    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::StaleSelectionDropped(vec![id(3)])]
    );
    assert_eq!(
        engine.session().working().expect("open").iter().cloned().collect::<Vec<_>>(),
        vec![id(2)]
    );
    assert_eq!(engine.total_filtered(), 2);
}

#[test]
fn set_primary_emits_once_and_promotes_in_view() {
    let mut engine = engine();
    engine.open([id(3), id(4)], None);
    assert!(engine.set_primary(id(4)));
    assert!(!engine.set_primary(id(4)));
    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::PrimaryChanged(id(4))]
    );
    assert_eq!(visible_ids(&engine), vec![id(-1), id(4), id(3), id(2), id(5)]);
}

#[test]
fn auto_primary_follows_the_committed_value() {
    let mut engine = engine_with(EngineConfig {
        auto_primary_on_commit: true,
        ..EngineConfig::default()
    });
    engine.open([], None);
    engine.toggle(&id(3), true);
    engine.close();

    assert_eq!(
        engine.drain_events(),
        vec![
            EngineEvent::Changed(vec![id(3)]),
            EngineEvent::PrimaryChanged(id(3)),
        ]
    );
}

#[test]
fn request_access_fires_only_for_permission_disabled_options() {
    let mut engine = engine();
    engine.open([id(2)], None);
    assert!(!engine.request_access(&id(2)));

    assert!(engine.request_access(&id(5)));
    assert_eq!(engine.popover_state(), PopoverState::Closed);
    assert_eq!(
        engine.drain_events(),
        vec![EngineEvent::RequestAccess(id(5))]
    );
}

#[test]
fn mode_collapse_truncates_and_reports_the_new_value() {
    let mut engine = engine();
    engine.open([id(2), id(3)], None);
    engine.close();
    engine.drain_events();

    assert!(engine.set_mode(SelectMode::Single));
    let events = engine.drain_events();
    assert_eq!(events.len(), 1);
    let EngineEvent::Changed(value) = &events[0] else {
        panic!("expected Changed, got {events:?}");
    };
    assert_eq!(value.len(), 1);

    // Single mode sticks for the next session.
    engine.open([], None);
    engine.toggle(&id(2), true);
    engine.toggle(&id(3), true);
    assert_eq!(engine.session().working().expect("open").len(), 1);
}

#[test]
fn clear_then_cancel_leaves_committed_untouched() {
    let mut engine = engine();
    engine.open([id(2)], None);
    assert!(engine.clear());
    assert!(engine.cancel());
    assert!(engine.drain_events().is_empty());
    assert!(engine.session().committed().contains(&id(2)));
    assert_eq!(engine.popover_state(), PopoverState::Closed);
}
