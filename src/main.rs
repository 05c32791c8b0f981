// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use finboard::config::{self, Settings};
use finboard::{cli, commands, store, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    utils::init_tracing(matches.get_flag("verbose"));

    let data_path = match matches.get_one::<String>("data") {
        Some(p) => PathBuf::from(p.trim()),
        None => store::data_path()?,
    };
    let config_path = match matches.get_one::<String>("config") {
        Some(p) => PathBuf::from(p.trim()),
        None => config::config_path()?,
    };

    let mut settings = Settings::load(&config_path)?;
    let mut session = store::open_or_init(&data_path)?;
    let before = session.clone();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Session ready at {}", data_path.display());
        }
        Some(("dashboard", sub)) => commands::dashboard::handle(&session, &settings, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut session, &settings, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, &settings, sub)?,
        Some(("income", sub)) => commands::income::handle(&mut session, &settings, sub)?,
        Some(("analysis", sub)) => commands::analysis::handle(&session, &settings, sub)?,
        Some(("settings", sub)) => {
            if commands::settings::handle(&mut settings, sub)? {
                settings.save(&config_path)?;
            }
        }
        Some(("import", sub)) => commands::importer::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    if session != before {
        store::save(&data_path, &session)?;
        tracing::debug!(path = %data_path.display(), "session saved");
    }
    Ok(())
}
