// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{filter, sort_by_date, totals};
use crate::config::Settings;
use crate::ledger::{RecordDraft, RecordPatch};
use crate::models::{FilterCriteria, KindFilter, Record, RecordKind, RecordStatus, SortOrder};
use crate::store::Session;
use crate::utils::{
    flag, fmt_money, maybe_print_json, optional, parse_date, parse_decimal, pretty_table, required,
};
use anyhow::{bail, Result};
use serde::Serialize;

pub fn handle(session: &mut Session, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(session, settings, sub)?,
        Some(("add", sub)) => add(session, settings, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let removed = session.transactions.remove(id)?;
            println!("Removed transaction {} '{}'", removed.id, removed.description);
        }
        _ => {}
    }
    Ok(())
}

/// Reads the shared filter and order flags.
pub fn criteria(sub: &clap::ArgMatches) -> Result<(FilterCriteria, SortOrder)> {
    let criteria = FilterCriteria {
        search_text: optional(sub, "search").map(str::to_string),
        category: optional(sub, "category").map(str::to_string),
        kind: optional(sub, "type")
            .map(str::parse::<KindFilter>)
            .transpose()?
            .unwrap_or_default(),
        payment_method: optional(sub, "method").map(str::to_string),
    };
    let order = optional(sub, "order")
        .map(str::parse::<SortOrder>)
        .transpose()?
        .unwrap_or_default();
    Ok((criteria, order))
}

/// Filtered, date-sorted and truncated rows for `tx list`.
pub fn query_rows(session: &Session, sub: &clap::ArgMatches) -> Result<Vec<Record>> {
    let (criteria, order) = criteria(sub)?;
    let mut rows = sort_by_date(&filter(session.transactions.records(), &criteria), order);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

#[derive(Serialize)]
struct Listing<'a> {
    transactions: &'a [Record],
    totals: crate::models::Totals,
}

fn list(session: &Session, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let (criteria, _) = criteria(sub)?;
    let rows = query_rows(session, sub)?;
    // Totals cover the whole filtered set, not just the rows shown.
    let t = totals(&filter(session.transactions.records(), &criteria));
    if flag(sub, "jsonl") {
        maybe_print_json(false, true, &rows)?;
        return Ok(());
    }
    if maybe_print_json(
        flag(sub, "json"),
        false,
        &Listing {
            transactions: &rows,
            totals: t,
        },
    )? {
        return Ok(());
    }
    let ccy = settings.currency.as_str();
    if rows.is_empty() {
        println!("No transactions match the current filters.");
    } else {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                let sign = match r.kind {
                    RecordKind::Income => "+",
                    RecordKind::Expense => "-",
                };
                vec![
                    r.id.clone(),
                    r.occurred_at.to_string(),
                    r.description.clone(),
                    r.category.clone(),
                    r.method.clone(),
                    r.status.to_string(),
                    format!("{}{}", sign, fmt_money(&r.amount, ccy)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Method", "Status", "Amount"],
                data,
            )
        );
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&t.income, ccy),
                fmt_money(&t.expense, ccy),
                fmt_money(&t.balance, ccy),
            ]],
        )
    );
    Ok(())
}

fn add(session: &mut Session, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let description = required(sub, "description")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let kind: RecordKind = optional(sub, "type").unwrap_or("expense").parse()?;

    let mut draft = RecordDraft::new(description, amount, kind);
    if let Some(c) = optional(sub, "category") {
        draft = draft.category(c);
    }
    if let Some(d) = optional(sub, "date") {
        draft = draft.on(parse_date(d)?);
    }
    if let Some(method) = optional(sub, "method") {
        draft = draft.method(method);
    }
    if let Some(s) = optional(sub, "status") {
        draft = draft.status(s.parse::<RecordStatus>()?);
    }
    let r = session.transactions.add(draft)?;
    println!(
        "Recorded {} {} '{}' on {} as {}",
        r.kind,
        fmt_money(&r.amount, &settings.currency),
        r.description,
        r.occurred_at,
        r.id
    );
    Ok(())
}

fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = RecordPatch {
        description: optional(sub, "description").map(str::to_string),
        amount: optional(sub, "amount").map(parse_decimal).transpose()?,
        kind: optional(sub, "type").map(str::parse).transpose()?,
        category: optional(sub, "category").map(str::to_string),
        occurred_at: optional(sub, "date").map(parse_date).transpose()?,
        method: optional(sub, "method").map(str::to_string),
        status: optional(sub, "status").map(str::parse).transpose()?,
        ..RecordPatch::default()
    };
    if patch.is_empty() {
        bail!("Nothing to change for transaction {}", id);
    }
    let r = session.transactions.update(id, patch)?;
    println!("Updated transaction {} '{}'", r.id, r.description);
    Ok(())
}
