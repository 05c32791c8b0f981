// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over ledger snapshots.
//!
//! Every function here borrows its input and returns freshly computed values;
//! nothing is cached between calls. Empty input yields zeroed results, with
//! [`average`] as the one exception.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{
    BudgetCategory, BudgetProgress, BudgetSummary, CategoryDistribution, CategoryShare,
    FilterCriteria, MonthlyFlow, Record, RecordKind, RecurringSplit, SortOrder, Totals,
};

const ALL: &str = "all";

fn unconstrained(v: &Option<String>) -> Option<&str> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(ALL))
}

/// `part / whole * 100`, saturating at `Decimal::MAX`. `whole` must be non-zero.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX)
}

/// `round(part / whole * 100)`, half away from zero; zero when `whole` is zero.
pub fn rounded_percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    percent_of(part, whole).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    if let Some(needle) = criteria
        .search_text
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        if !record
            .description
            .to_lowercase()
            .contains(&needle.trim().to_lowercase())
        {
            return false;
        }
    }
    if let Some(cat) = unconstrained(&criteria.category) {
        if record.category != cat {
            return false;
        }
    }
    if !criteria.kind.accepts(record.kind) {
        return false;
    }
    if let Some(method) = unconstrained(&criteria.payment_method) {
        if record.method != method {
            return false;
        }
    }
    true
}

/// Records satisfying every predicate in `criteria`, in their original order.
pub fn filter(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    records
        .iter()
        .filter(|r| matches(r, criteria))
        .cloned()
        .collect()
}

/// Stable sort on `occurred_at`; records sharing a date keep their relative order.
pub fn sort_by_date(records: &[Record], order: SortOrder) -> Vec<Record> {
    let mut out = records.to_vec();
    match order {
        SortOrder::Ascending => out.sort_by(|a, b| a.occurred_at.cmp(&b.occurred_at)),
        SortOrder::Descending => out.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at)),
    }
    out
}

pub fn totals(records: &[Record]) -> Totals {
    let mut t = Totals::default();
    for r in records {
        match r.kind {
            RecordKind::Income => t.income += r.amount,
            RecordKind::Expense => t.expense += r.amount,
        }
    }
    t.balance = t.income - t.expense;
    t
}

fn group_by_category<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<(String, Decimal)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for r in records {
        match index.get(r.category.as_str()) {
            Some(&i) => groups[i].1 += r.amount,
            None => {
                index.insert(r.category.as_str(), groups.len());
                groups.push((r.category.clone(), r.amount));
            }
        }
    }
    groups
}

/// Per-category totals and rounded shares, in order of first appearance.
pub fn category_distribution(records: &[Record]) -> Vec<CategoryDistribution> {
    let groups = group_by_category(records.iter());
    let grand: Decimal = groups.iter().map(|(_, t)| *t).sum();
    groups
        .into_iter()
        .map(|(category, total)| CategoryDistribution {
            percentage: rounded_percentage(total, grand),
            category,
            total,
        })
        .collect()
}

/// Recomputes every share from the current totals.
///
/// Each percentage is rounded independently, so the set may sum to anything in
/// `100 ± (n - 1)` for `n` categories.
pub fn rebalance_percentages(categories: &[CategoryShare]) -> Vec<CategoryShare> {
    let grand: Decimal = categories.iter().map(|c| c.total).sum();
    categories
        .iter()
        .map(|c| CategoryShare {
            percentage: rounded_percentage(c.total, grand),
            ..c.clone()
        })
        .collect()
}

/// Adds `amount` to the share called `name` (appending it when absent) and rebalances.
pub fn credit_category(
    categories: &[CategoryShare],
    name: &str,
    amount: Decimal,
) -> Vec<CategoryShare> {
    let mut updated = categories.to_vec();
    match updated.iter_mut().find(|c| c.name == name) {
        Some(c) => c.total += amount,
        None => updated.push(CategoryShare {
            id: format!("c{}", updated.len() + 1),
            name: name.to_string(),
            total: amount,
            percentage: Decimal::ZERO,
        }),
    }
    rebalance_percentages(&updated)
}

fn progress(spent: Decimal, allocated: Decimal) -> BudgetProgress {
    if allocated.is_zero() {
        return BudgetProgress {
            percentage: Decimal::ZERO,
            is_over_budget: spent > Decimal::ZERO,
        };
    }
    let percentage = percent_of(spent, allocated);
    BudgetProgress {
        percentage,
        is_over_budget: percentage > Decimal::ONE_HUNDRED,
    }
}

pub fn budget_progress(category: &BudgetCategory) -> BudgetProgress {
    progress(category.spent, category.allocated)
}

pub fn budget_summary(categories: &[BudgetCategory]) -> BudgetSummary {
    let allocated: Decimal = categories.iter().map(|c| c.allocated).sum();
    let spent: Decimal = categories.iter().map(|c| c.spent).sum();
    BudgetSummary {
        allocated,
        spent,
        remaining: allocated - spent,
        progress: progress(spent, allocated),
    }
}

/// Mean amount. Unlike the totals, an average over nothing is undefined and is reported.
pub fn average(records: &[Record]) -> LedgerResult<Decimal> {
    if records.is_empty() {
        return Err(LedgerError::EmptyInput);
    }
    let sum: Decimal = records.iter().map(|r| r.amount).sum();
    Ok(sum / Decimal::from(records.len()))
}

pub fn recurring_split(records: &[Record]) -> RecurringSplit {
    let total: Decimal = records.iter().map(|r| r.amount).sum();
    let recurring: Decimal = records
        .iter()
        .filter(|r| r.is_recurring())
        .map(|r| r.amount)
        .sum();
    RecurringSplit {
        total,
        recurring,
        non_recurring: total - recurring,
    }
}

/// Income, expense and savings per calendar month, oldest month first.
pub fn monthly_trend(records: &[Record]) -> Vec<MonthlyFlow> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for r in records {
        let entry = map
            .entry(r.occurred_at.format("%Y-%m").to_string())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match r.kind {
            RecordKind::Income => entry.0 += r.amount,
            RecordKind::Expense => entry.1 += r.amount,
        }
    }
    map.into_iter()
        .map(|(month, (income, expense))| MonthlyFlow {
            month,
            income,
            expense,
            savings: income - expense,
        })
        .collect()
}

/// The category of `kind` with the largest total; the earliest seen wins ties.
pub fn top_category(records: &[Record], kind: RecordKind) -> Option<(String, Decimal)> {
    group_by_category(records.iter().filter(|r| r.kind == kind))
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}

/// The largest single record by amount; the earliest wins ties.
pub fn largest(records: &[Record]) -> Option<&Record> {
    records
        .iter()
        .reduce(|best, next| if next.amount > best.amount { next } else { best })
}
