// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{budget_summary, category_distribution, sort_by_date, totals};
use crate::config::Settings;
use crate::models::{BudgetSummary, CategoryDistribution, Record, SortOrder, Totals};
use crate::store::Session;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

const RECENT: usize = 5;
const CURRENT_PERIOD: &str = "current";

#[derive(Debug, Serialize)]
pub struct Overview {
    pub totals: Totals,
    pub budget: Option<BudgetSummary>,
    pub recent: Vec<Record>,
    pub income_distribution: Vec<CategoryDistribution>,
}

pub fn build_overview(session: &Session) -> Overview {
    let mut recent = sort_by_date(session.transactions.records(), SortOrder::Descending);
    recent.truncate(RECENT);
    Overview {
        totals: totals(session.transactions.records()),
        budget: session
            .budgets
            .period(CURRENT_PERIOD)
            .ok()
            .or_else(|| session.budgets.periods().first())
            .map(|p| budget_summary(&p.categories)),
        recent,
        income_distribution: category_distribution(session.incomes.records()),
    }
}

pub fn handle(session: &Session, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let o = build_overview(session);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &o)? {
        return Ok(());
    }
    let ccy = settings.currency.as_str();
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&o.totals.income, ccy),
                fmt_money(&o.totals.expense, ccy),
                fmt_money(&o.totals.balance, ccy),
            ]],
        )
    );
    if let Some(b) = &o.budget {
        println!(
            "{}",
            pretty_table(
                &["Budget", "Spent", "Remaining", "Progress"],
                vec![vec![
                    fmt_money(&b.allocated, ccy),
                    fmt_money(&b.spent, ccy),
                    fmt_money(&b.remaining, ccy),
                    fmt_percent(&b.progress.clamped()),
                ]],
            )
        );
    }
    let recent: Vec<Vec<String>> = o
        .recent
        .iter()
        .map(|r| {
            vec![
                r.occurred_at.to_string(),
                r.description.clone(),
                r.kind.to_string(),
                fmt_money(&r.amount, ccy),
            ]
        })
        .collect();
    println!("Recent transactions");
    println!("{}", pretty_table(&["Date", "Description", "Type", "Amount"], recent));
    let dist: Vec<Vec<String>> = o
        .income_distribution
        .iter()
        .map(|d| vec![d.category.clone(), fmt_money(&d.total, ccy), fmt_percent(&d.percentage)])
        .collect();
    println!("Income sources");
    println!("{}", pretty_table(&["Category", "Total", "Share"], dist));
    Ok(())
}
