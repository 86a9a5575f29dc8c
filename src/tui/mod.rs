// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reference terminal host for the select engine.
//!
//! Renders the engine's visible view as a checkbox list inside a popover
//! panel and maps keys onto engine calls. The host owns the cursor, the
//! search input buffer and the event loop; all list semantics stay in the
//! engine.

use std::error::Error;
use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::catalog::{CatalogBuilder, OptionCatalog, RawOption};
use crate::engine::{EngineConfig, EngineEvent, SelectEngine};
use crate::model::{DisabledReason, OptionId, TagId};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const LOAD_MORE_MARGIN: usize = 3;

/// Runs the interactive demo picker against a built-in catalog.
pub fn run(config: EngineConfig) -> Result<(), Box<dyn Error>> {
    let mut engine = SelectEngine::new(config);
    engine.set_catalog(demo_catalog());
    engine.drain_events();
    run_with_engine(engine)
}

pub fn run_with_engine(mut engine: SelectEngine) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new();

    while !app.should_quit {
        if engine.tick(Instant::now()) {
            app.clamp_cursor(&engine);
        }
        app.absorb_events(engine.drain_events());
        terminal.draw(|frame| draw(frame, &mut app, &engine))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, &mut engine);
                }
            }
        }
    }

    Ok(())
}

/// A synthetic catalog large enough to exercise filtering and pagination.
pub fn demo_catalog() -> OptionCatalog {
    let teams = [
        ("bkcc", "Business"),
        ("bkci", "DevOps"),
        ("bcs", "Container"),
        ("paas", "Platform"),
    ];
    let names = [
        "Blueking", "Payments", "Search", "Gateway", "Billing", "Inventory", "Metrics",
        "Logging", "Identity", "Checkout", "Catalog", "Dispatch", "Ledger", "Archive",
        "Routing",
    ];

    let mut raw = Vec::new();
    for (pos, name) in names.iter().enumerate() {
        for (team_pos, (team_id, team_label)) in teams.iter().enumerate() {
            let id = (pos * teams.len() + team_pos + 2) as i64;
            let mut option = RawOption::new(id, format!("[{team_label}] {name}"))
                .with_type(*team_id, *team_label)
                .with_secondary(format!("{team_id}-{id}"));
            // A sprinkle of disabled entries to exercise request-access.
            if id % 17 == 0 {
                option = option.with_no_auth(true).with_has_data(false);
            }
            raw.push(option);
        }
    }

    CatalogBuilder::new()
        .with_authority_option("-all spaces I can access-")
        .with_alert_option("-all spaces with alerts-")
        .build(&raw)
}

#[derive(Debug, Default)]
struct App {
    should_quit: bool,
    cursor: usize,
    search: String,
    committed_line: String,
    status: String,
}

impl App {
    fn new() -> Self {
        Self {
            status: "Enter: open picker | q: quit".to_owned(),
            ..Self::default()
        }
    }

    fn handle_key(&mut self, key: KeyEvent, engine: &mut SelectEngine) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if engine.is_open() {
            self.handle_picker_key(key, engine);
        } else {
            self.handle_idle_key(key, engine);
        }
        self.absorb_events(engine.drain_events());
    }

    fn handle_idle_key(&mut self, key: KeyEvent, engine: &mut SelectEngine) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Enter => {
                let initial: Vec<OptionId> = engine.session().committed().iter().cloned().collect();
                if engine.open(initial, None) {
                    self.cursor = 0;
                    self.search.clear();
                    self.status = "Space: toggle | Tab: type filter | Esc: cancel | Enter: apply"
                        .to_owned();
                }
            }
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent, engine: &mut SelectEngine) {
        match key.code {
            KeyCode::Esc => {
                engine.cancel();
                self.search.clear();
                self.status = "Cancelled. Enter: open picker | q: quit".to_owned();
            }
            KeyCode::Enter => {
                if engine.close() {
                    self.search.clear();
                    self.status = "Enter: open picker | q: quit".to_owned();
                }
            }
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                let total = engine.visible().count();
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
                // Nearing the bottom of the loaded window pulls the next page.
                if self.cursor + LOAD_MORE_MARGIN >= total && !engine.is_exhausted() {
                    engine.load_more();
                }
            }
            KeyCode::Char(' ') => {
                let target = engine
                    .visible()
                    .nth(self.cursor)
                    .map(|item| (item.id().clone(), item.disabled_reason()));
                if let Some((id, reason)) = target {
                    let checked = !engine
                        .session()
                        .working()
                        .map_or(false, |working| working.contains(&id));
                    if reason == Some(DisabledReason::NoPermission) {
                        engine.request_access(&id);
                        self.status = format!("Access requested for {id}");
                    } else {
                        engine.toggle(&id, checked);
                    }
                }
            }
            KeyCode::Tab => {
                let next = self.next_type_filter(engine);
                match next {
                    Some(tag_id) => engine.set_type_filter(Some(tag_id)),
                    None => engine.set_type_filter(None),
                }
                self.clamp_cursor(engine);
            }
            KeyCode::Char('*') => {
                let id = engine
                    .visible()
                    .nth(self.cursor)
                    .map(|item| item.id().clone());
                if let Some(id) = id {
                    engine.set_primary(id);
                }
            }
            KeyCode::Backspace => {
                self.search.pop();
                engine.set_query_debounced(self.search.clone(), Instant::now());
            }
            KeyCode::Char(c) => {
                self.search.push(c);
                engine.set_query_debounced(self.search.clone(), Instant::now());
            }
            _ => {}
        }
        self.clamp_cursor(engine);
    }

    /// Cycles catalog tags: none -> first -> second -> ... -> none.
    fn next_type_filter(&self, engine: &SelectEngine) -> Option<TagId> {
        let tags = engine.catalog().tag_directory();
        if tags.is_empty() {
            return None;
        }
        match engine.filter().type_filter() {
            None => Some(tags[0].id().clone()),
            Some(current) => {
                let pos = tags.iter().position(|tag| tag.id() == current)?;
                tags.get(pos + 1).map(|tag| tag.id().clone())
            }
        }
    }

    fn clamp_cursor(&mut self, engine: &SelectEngine) {
        let total = engine.visible().count();
        if total == 0 {
            self.cursor = 0;
        } else if self.cursor >= total {
            self.cursor = total - 1;
        }
    }

    fn absorb_events(&mut self, events: Vec<EngineEvent>) {
        for event in events {
            match event {
                EngineEvent::Changed(value) => {
                    let labels: Vec<String> = value.iter().map(|id| id.to_string()).collect();
                    self.committed_line = labels.join(", ");
                }
                EngineEvent::PrimaryChanged(id) => {
                    self.status = format!("Primary is now {id}");
                }
                EngineEvent::RequestAccess(id) => {
                    self.status = format!("Would navigate to the access form for {id}");
                }
                EngineEvent::InvalidCommit(err) => {
                    self.status = format!("Cannot apply: {err}");
                }
                EngineEvent::StaleSelectionDropped(ids) => {
                    self.status = format!("{} stale selection(s) dropped", ids.len());
                }
            }
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App, engine: &SelectEngine) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = if engine.is_open() {
        format!(
            "search: {}_  [{} / {} shown]",
            app.search,
            engine.visible().count(),
            engine.total_filtered()
        )
    } else {
        format!("selected: {}", app.committed_line)
    };
    let type_suffix = match engine.filter().type_filter() {
        Some(tag) => format!("  type={tag}"),
        None => String::new(),
    };
    frame.render_widget(
        Paragraph::new(format!("{header}{type_suffix}"))
            .block(Block::default().borders(Borders::ALL).title("selene")),
        chunks[0],
    );

    let working = engine.session().working();
    let items: Vec<ListItem<'_>> = engine
        .visible()
        .map(|item| {
            let checked = working.map_or(false, |set| set.contains(item.id()));
            let marker = if checked { "[x]" } else { "[ ]" };
            let mut line = format!("{marker} {}", item.label());
            if let Some(secondary) = item.secondary() {
                line.push_str(&format!("  ({secondary})"));
            }
            let style = match item.disabled_reason() {
                Some(_) => Style::default().fg(Color::DarkGray),
                None if item.is_special() => Style::default().fg(Color::Cyan),
                None => Style::default(),
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let mut state = ListState::default();
    if engine.is_open() && !items.is_empty() {
        state.select(Some(app.cursor));
    }
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    frame.render_widget(Paragraph::new(app.status.as_str()), chunks[2]);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.hide_cursor().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Builds a ready-to-open engine for the demo binary.
pub fn demo_engine(config: EngineConfig) -> SelectEngine {
    let mut engine = SelectEngine::new(config);
    engine.set_catalog(demo_catalog());
    engine.drain_events();
    engine
}

#[cfg(test)]
mod tests {
    use super::demo_catalog;

    #[test]
    fn demo_catalog_is_large_enough_to_paginate() {
        let catalog = demo_catalog();
        assert!(catalog.len() > 40);
        assert_eq!(catalog.dropped_records(), 0);
        // Specials lead the catalog.
        assert!(catalog.items()[0].is_special());
        assert!(catalog.items()[1].is_special());
    }

    #[test]
    fn demo_catalog_strips_bracket_prefixes() {
        let catalog = demo_catalog();
        assert!(catalog
            .items()
            .iter()
            .all(|item| !item.label().starts_with('[')));
    }
}
