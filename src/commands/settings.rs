// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Settings;
use crate::utils::{flag, maybe_print_json, optional, pretty_table};
use anyhow::{anyhow, Result};

/// Returns true when `settings` changed and should be saved.
pub fn handle(settings: &mut Settings, m: &clap::ArgMatches) -> Result<bool> {
    match m.subcommand() {
        Some(("show", sub)) => {
            show(settings, sub)?;
            Ok(false)
        }
        Some(("set", sub)) => set(settings, sub),
        _ => Ok(false),
    }
}

fn on_off(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(anyhow!("Expected on|off, got '{}'", other)),
    }
}

pub fn set(settings: &mut Settings, sub: &clap::ArgMatches) -> Result<bool> {
    let before = settings.clone();
    if let Some(v) = optional(sub, "currency") {
        settings.set_currency(v)?;
    }
    if let Some(v) = optional(sub, "language") {
        settings.set_language(v)?;
    }
    if let Some(v) = optional(sub, "theme") {
        settings.set_theme(v)?;
    }
    if let Some(v) = sub.get_one::<bool>("compact") {
        settings.compact_mode = *v;
    }
    if let Some(items) = sub.get_many::<String>("notify") {
        for item in items {
            let (key, value) = item
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected KEY=on|off, got '{}'", item))?;
            settings.set_notification(key, on_off(value)?)?;
        }
    }
    let changed = *settings != before;
    if changed {
        println!("Settings updated");
    } else {
        println!("No settings changed");
    }
    Ok(changed)
}

fn show(settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), settings)? {
        return Ok(());
    }
    let yes_no = |b: bool| if b { "on" } else { "off" }.to_string();
    let n = &settings.notifications;
    let rows = vec![
        vec!["currency".into(), settings.currency.clone()],
        vec!["language".into(), settings.language.clone()],
        vec!["theme".into(), settings.theme.clone()],
        vec!["compact".into(), yes_no(settings.compact_mode)],
        vec!["notify.email".into(), yes_no(n.email)],
        vec!["notify.push".into(), yes_no(n.push)],
        vec!["notify.monthly-report".into(), yes_no(n.monthly_report)],
        vec!["notify.new-features".into(), yes_no(n.new_features)],
        vec!["notify.tips".into(), yes_no(n.tips)],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
