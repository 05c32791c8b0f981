// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::{
    category_distribution, largest, monthly_trend, rounded_percentage, top_category, totals,
};
use crate::config::Settings;
use crate::errors::{LedgerError, LedgerResult};
use crate::models::{CategoryDistribution, MonthlyFlow, Record, RecordKind, Totals};
use crate::store::Session;
use crate::utils::{
    PLACEHOLDER, fmt_money, fmt_percent, maybe_print_json, money_or_placeholder,
    percent_or_placeholder, pretty_table,
};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub trend: Vec<MonthlyFlow>,
    pub totals: Totals,
    /// Savings as a share of income; `None` without income.
    pub savings_rate: Option<Decimal>,
    /// Expenses as a share of income; `None` without income.
    pub expense_ratio: Option<Decimal>,
    pub expense_categories: Vec<CategoryDistribution>,
    pub top_expense_category: Option<(String, Decimal)>,
    pub top_category_share: Option<Decimal>,
    pub largest_expense: Option<Record>,
    pub largest_expense_share: Option<Decimal>,
    pub average_monthly_income: Option<Decimal>,
    pub average_monthly_expense: Option<Decimal>,
}

fn monthly_mean(
    trend: &[MonthlyFlow],
    pick: fn(&MonthlyFlow) -> Decimal,
) -> LedgerResult<Decimal> {
    if trend.is_empty() {
        return Err(LedgerError::EmptyInput);
    }
    let sum: Decimal = trend.iter().map(pick).sum();
    Ok(sum / Decimal::from(trend.len()))
}

fn share_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    (!whole.is_zero()).then(|| rounded_percentage(part, whole))
}

pub fn build_analysis(session: &Session) -> Analysis {
    let records = session.transactions.records();
    let trend = monthly_trend(records);
    let totals = totals(records);
    let expenses: Vec<Record> = records
        .iter()
        .filter(|r| r.kind == RecordKind::Expense)
        .cloned()
        .collect();
    let top_expense_category = top_category(&expenses, RecordKind::Expense);
    let largest_expense = largest(&expenses).cloned();
    Analysis {
        average_monthly_income: monthly_mean(&trend, |m| m.income).ok(),
        average_monthly_expense: monthly_mean(&trend, |m| m.expense).ok(),
        savings_rate: share_of(totals.balance, totals.income),
        expense_ratio: share_of(totals.expense, totals.income),
        top_category_share: top_expense_category
            .as_ref()
            .and_then(|(_, t)| share_of(*t, totals.expense)),
        largest_expense_share: largest_expense
            .as_ref()
            .and_then(|r| share_of(r.amount, totals.expense)),
        expense_categories: category_distribution(&expenses),
        top_expense_category,
        largest_expense,
        totals,
        trend,
    }
}

fn highlight(label: &str, amount: &Decimal, share: Option<&Decimal>, ccy: &str) -> String {
    format!(
        "{} ({}, {} of expenses)",
        label,
        fmt_money(amount, ccy),
        percent_or_placeholder(share)
    )
}

pub fn handle(session: &Session, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let a = build_analysis(session);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &a)? {
        return Ok(());
    }
    let ccy = settings.currency.as_str();
    let trend: Vec<Vec<String>> = a
        .trend
        .iter()
        .map(|f| {
            vec![
                f.month.clone(),
                fmt_money(&f.income, ccy),
                fmt_money(&f.expense, ccy),
                fmt_money(&f.savings, ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense", "Savings"], trend));

    let cats: Vec<Vec<String>> = a
        .expense_categories
        .iter()
        .map(|d| vec![d.category.clone(), fmt_money(&d.total, ccy), fmt_percent(&d.percentage)])
        .collect();
    println!("{}", pretty_table(&["Expense category", "Total", "Share"], cats));

    let top = a
        .top_expense_category
        .as_ref()
        .map(|(c, t)| highlight(c, t, a.top_category_share.as_ref(), ccy))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let big = a
        .largest_expense
        .as_ref()
        .map(|r| highlight(&r.description, &r.amount, a.largest_expense_share.as_ref(), ccy))
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    println!(
        "{}",
        pretty_table(
            &["Highlight", "Value"],
            vec![
                vec!["Savings rate".into(), percent_or_placeholder(a.savings_rate.as_ref())],
                vec!["Expenses vs income".into(), percent_or_placeholder(a.expense_ratio.as_ref())],
                vec!["Top expense category".into(), top],
                vec!["Largest expense".into(), big],
                vec![
                    "Average monthly income".into(),
                    money_or_placeholder(a.average_monthly_income.as_ref(), ccy),
                ],
                vec![
                    "Average monthly expense".into(),
                    money_or_placeholder(a.average_monthly_expense.as_ref(), ccy),
                ],
                vec!["Transactions".into(), session.transactions.records().len().to_string()],
            ],
        )
    );
    Ok(())
}
