// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{average, credit_category, recurring_split, sort_by_date};
use crate::config::Settings;
use crate::ledger::RecordDraft;
use crate::models::{CategoryShare, Frequency, RecordKind, RecurringSplit, SortOrder};
use crate::store::Session;
use crate::utils::{
    flag, fmt_money, fmt_percent, maybe_print_json, money_or_placeholder, optional, parse_date,
    parse_decimal, pretty_table, required,
};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

const INCOME_METHOD: &str = "Bank Transfer";

pub fn handle(session: &mut Session, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, settings, sub)?,
        Some(("list", sub)) => list(session, settings, sub)?,
        Some(("add", sub)) => add(session, settings, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct IncomeSummary {
    pub split: RecurringSplit,
    /// `None` when there are no entries to average.
    pub average: Option<Decimal>,
    pub categories: Vec<CategoryShare>,
}

pub fn build_summary(session: &Session) -> IncomeSummary {
    let records = session.incomes.records();
    IncomeSummary {
        split: recurring_split(records),
        average: average(records).ok(),
        categories: session.income_categories.clone(),
    }
}

fn summary(session: &Session, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let s = build_summary(session);
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &s)? {
        return Ok(());
    }
    let ccy = settings.currency.as_str();
    println!(
        "{}",
        pretty_table(
            &["Total", "Recurring", "Non-recurring", "Average"],
            vec![vec![
                fmt_money(&s.split.total, ccy),
                fmt_money(&s.split.recurring, ccy),
                fmt_money(&s.split.non_recurring, ccy),
                money_or_placeholder(s.average.as_ref(), ccy),
            ]],
        )
    );
    let data: Vec<Vec<String>> = s
        .categories
        .iter()
        .map(|c| vec![c.name.clone(), fmt_money(&c.total, ccy), fmt_percent(&c.percentage)])
        .collect();
    println!("{}", pretty_table(&["Category", "Total", "Share"], data));
    Ok(())
}

fn list(session: &Session, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let order = optional(sub, "order")
        .map(str::parse::<SortOrder>)
        .transpose()?
        .unwrap_or_default();
    let rows = sort_by_date(session.incomes.records(), order);
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &rows)? {
        return Ok(());
    }
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.occurred_at.to_string(),
                r.description.clone(),
                r.category.clone(),
                r.recurrence.map(|f| f.to_string()).unwrap_or_default(),
                fmt_money(&r.amount, &settings.currency),
                r.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Source", "Category", "Recurs", "Amount", "Notes"],
            data
        )
    );
    Ok(())
}

fn add(session: &mut Session, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let source = required(sub, "source")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let category = required(sub, "category")?;

    let mut draft = RecordDraft::new(source, amount, RecordKind::Income)
        .category(category)
        .method(INCOME_METHOD);
    if let Some(d) = optional(sub, "date") {
        draft = draft.on(parse_date(d)?);
    }
    if let Some(f) = optional(sub, "recurring") {
        draft = draft.recurring(f.parse::<Frequency>()?);
    }
    if let Some(n) = optional(sub, "notes") {
        draft = draft.notes(n);
    }
    let r = session.incomes.add(draft)?;
    println!(
        "Recorded income {} from '{}' as {}",
        fmt_money(&r.amount, &settings.currency),
        r.description,
        r.id
    );
    let (name, amount) = (r.category.clone(), r.amount);
    session.income_categories = credit_category(&session.income_categories, &name, amount);
    Ok(())
}
