// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{budget_progress, budget_summary};
use crate::config::Settings;
use crate::ledger::BudgetCategoryPatch;
use crate::models::{BudgetProgress, BudgetSummary};
use crate::store::Session;
use crate::utils::{
    flag, fmt_money, fmt_percent, maybe_print_json, optional, parse_decimal, pretty_table,
    required,
};
use anyhow::{bail, Result};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(session: &mut Session, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => report(session, settings, sub)?,
        Some(("periods", sub)) => periods(session, sub)?,
        Some(("add", sub)) => add(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => {
            let period = required(sub, "period")?;
            let id = required(sub, "id")?;
            let removed = session.budgets.remove_category(period, id)?;
            println!("Removed budget category '{}' from {}", removed.name, period);
        }
        Some(("spend", sub)) => {
            let period = required(sub, "period")?;
            let id = required(sub, "id")?;
            let amount = parse_decimal(required(sub, "amount")?)?;
            let c = session.budgets.record_expense(period, id, amount)?;
            let p = budget_progress(c);
            println!(
                "{}: spent {} of {} ({})",
                c.name,
                fmt_money(&c.spent, &settings.currency),
                fmt_money(&c.allocated, &settings.currency),
                fmt_percent(&p.percentage)
            );
            if p.is_over_budget {
                println!("Warning: '{}' is over budget by {}", c.name, fmt_percent(&p.excess()));
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryLine {
    pub id: String,
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub progress: BudgetProgress,
}

#[derive(Debug, Serialize)]
pub struct BudgetReport {
    pub period: String,
    pub name: String,
    pub categories: Vec<CategoryLine>,
    pub summary: BudgetSummary,
}

pub fn build_report(session: &Session, period: &str) -> Result<BudgetReport> {
    let p = session.budgets.period(period)?;
    let categories = p
        .categories
        .iter()
        .map(|c| CategoryLine {
            id: c.id.clone(),
            name: c.name.clone(),
            allocated: c.allocated,
            spent: c.spent,
            remaining: c.allocated - c.spent,
            progress: budget_progress(c),
        })
        .collect();
    Ok(BudgetReport {
        period: p.id.clone(),
        name: p.name.clone(),
        categories,
        summary: budget_summary(&p.categories),
    })
}

fn report(session: &Session, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let report = build_report(session, required(sub, "period")?)?;
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &report)? {
        return Ok(());
    }
    let ccy = settings.currency.as_str();
    let data: Vec<Vec<String>> = report
        .categories
        .iter()
        .map(|l| {
            let excess = if l.progress.is_over_budget {
                format!("{} over", fmt_percent(&l.progress.excess()))
            } else {
                String::new()
            };
            vec![
                l.name.clone(),
                fmt_money(&l.spent, ccy),
                fmt_money(&l.allocated, ccy),
                fmt_percent(&l.progress.clamped()),
                fmt_percent(&l.progress.percentage),
                excess,
            ]
        })
        .collect();
    println!("Budget {} ({})", report.name, report.period);
    println!(
        "{}",
        pretty_table(
            &["Category", "Spent", "Allocated", "Bar", "Used", "Excess"],
            data
        )
    );
    let s = &report.summary;
    println!(
        "{}",
        pretty_table(
            &["Allocated", "Spent", "Remaining", "Progress"],
            vec![vec![
                fmt_money(&s.allocated, ccy),
                fmt_money(&s.spent, ccy),
                fmt_money(&s.remaining, ccy),
                fmt_percent(&s.progress.percentage),
            ]],
        )
    );
    Ok(())
}

fn periods(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<Vec<String>> = session
        .budgets
        .periods()
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name.clone(),
                p.start.to_string(),
                p.end.to_string(),
                p.categories.len().to_string(),
            ]
        })
        .collect();
    if !maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &data)? {
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Start", "End", "Categories"], data)
        );
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let period = required(sub, "period")?;
    let name = required(sub, "name")?;
    let allocated = parse_decimal(required(sub, "allocated")?)?;
    let spent = optional(sub, "spent")
        .map(parse_decimal)
        .transpose()?
        .unwrap_or(Decimal::ZERO);
    let c = session
        .budgets
        .add_category(period, optional(sub, "id"), name, allocated, spent)?;
    println!("Added budget category '{}' ({}) to {}", c.name, c.id, period);
    Ok(())
}

fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let period = required(sub, "period")?;
    let id = required(sub, "id")?;
    let patch = BudgetCategoryPatch {
        name: optional(sub, "name").map(str::to_string),
        allocated: optional(sub, "allocated").map(parse_decimal).transpose()?,
        spent: optional(sub, "spent").map(parse_decimal).transpose()?,
    };
    if patch.name.is_none() && patch.allocated.is_none() && patch.spent.is_none() {
        bail!("Nothing to change for budget category {}", id);
    }
    let c = session.budgets.update_category(period, id, patch)?;
    println!("Updated budget category '{}' ({})", c.name, c.id);
    Ok(())
}
