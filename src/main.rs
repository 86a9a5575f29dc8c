// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Selene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Selene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selene demo entrypoint.
//!
//! Runs the reference terminal picker against a built-in catalog. All flags
//! map onto [`selene::engine::EngineConfig`] knobs.

use std::error::Error;

use selene::engine::{ClosePolicy, EngineConfig};
use selene::query::MatchKind;
use selene::session::SelectMode;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--single] [--allow-empty] [--page-size <n>] [--fuzzy] [--cancel-on-close] [--auto-primary]\n\n--single          one choice at a time (default: multiple)\n--allow-empty     let an empty selection be applied\n--page-size <n>   rows loaded per page (default 20)\n--fuzzy           typo-tolerant search matching\n--cancel-on-close discard the draft when the picker closes\n--auto-primary    promote the first applied choice to primary"
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    single: bool,
    allow_empty: bool,
    page_size: Option<usize>,
    fuzzy: bool,
    cancel_on_close: bool,
    auto_primary: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--single" => {
                if options.single {
                    return Err(());
                }
                options.single = true;
            }
            "--allow-empty" => {
                if options.allow_empty {
                    return Err(());
                }
                options.allow_empty = true;
            }
            "--page-size" => {
                if options.page_size.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let page_size: usize = raw.parse().map_err(|_| ())?;
                if page_size == 0 {
                    return Err(());
                }
                options.page_size = Some(page_size);
            }
            "--fuzzy" => {
                if options.fuzzy {
                    return Err(());
                }
                options.fuzzy = true;
            }
            "--cancel-on-close" => {
                if options.cancel_on_close {
                    return Err(());
                }
                options.cancel_on_close = true;
            }
            "--auto-primary" => {
                if options.auto_primary {
                    return Err(());
                }
                options.auto_primary = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

impl CliOptions {
    fn engine_config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            mode: if self.single {
                SelectMode::Single
            } else {
                SelectMode::Multiple
            },
            require_non_empty: !self.allow_empty,
            page_size: self.page_size.unwrap_or(defaults.page_size),
            close_policy: if self.cancel_on_close {
                ClosePolicy::Cancel
            } else {
                ClosePolicy::Commit
            },
            auto_primary_on_commit: self.auto_primary,
            disabled: false,
        }
    }
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "selene".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut engine = selene::tui::demo_engine(options.engine_config());
        if options.fuzzy {
            engine.set_match_kind(MatchKind::Fuzzy);
        }
        selene::tui::run_with_engine(engine)
    })();

    if let Err(err) = result {
        eprintln!("selene: {err}");
        std::process::exit(1);
    }
}
