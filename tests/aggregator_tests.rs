// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::aggregator::{
    average, budget_progress, budget_summary, category_distribution, credit_category, filter,
    largest, monthly_trend, rebalance_percentages, recurring_split, sort_by_date, top_category,
    totals,
};
use finboard::errors::LedgerError;
use finboard::models::{
    BudgetCategory, CategoryShare, FilterCriteria, Frequency, KindFilter, Record, RecordKind,
    RecordStatus, SortOrder,
};
use finboard::sample;
use rust_decimal::Decimal;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 4, d).unwrap()
}

fn rec(id: &str, amount: i64, kind: RecordKind, category: &str, d: u32) -> Record {
    Record {
        id: id.into(),
        description: format!("{} entry", category),
        amount: Decimal::from(amount),
        kind,
        category: category.into(),
        occurred_at: day(d),
        method: "Cash".into(),
        status: RecordStatus::Completed,
        recurrence: None,
        notes: None,
    }
}

fn scenario() -> Vec<Record> {
    vec![
        rec("r1", 100, RecordKind::Income, "Salary", 1),
        rec("r2", 40, RecordKind::Expense, "Food", 2),
        rec("r3", 60, RecordKind::Expense, "Food", 3),
    ]
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn scenario_totals_and_distribution() {
    let records = scenario();
    let t = totals(&records);
    assert_eq!(t.income, Decimal::from(100));
    assert_eq!(t.expense, Decimal::from(100));
    assert_eq!(t.balance, Decimal::ZERO);

    let dist = category_distribution(&records);
    assert_eq!(dist.len(), 2);
    assert_eq!(dist[0].category, "Salary");
    assert_eq!(dist[0].total, Decimal::from(100));
    assert_eq!(dist[0].percentage, Decimal::from(50));
    assert_eq!(dist[1].category, "Food");
    assert_eq!(dist[1].total, Decimal::from(100));
    assert_eq!(dist[1].percentage, Decimal::from(50));
}

#[test]
fn scenario_filter_then_sort_descending() {
    let records = scenario();
    let criteria = FilterCriteria {
        kind: KindFilter::Expense,
        ..FilterCriteria::default()
    };
    let expenses = filter(&records, &criteria);
    assert_eq!(ids(&expenses), vec!["r2", "r3"]);

    let sorted = sort_by_date(&expenses, SortOrder::Descending);
    assert_eq!(ids(&sorted), vec!["r3", "r2"]);
}

#[test]
fn empty_criteria_is_identity() {
    let ledger = sample::transactions().unwrap();
    let out = filter(ledger.records(), &FilterCriteria::default());
    assert_eq!(out, ledger.records());

    let all = FilterCriteria {
        category: Some("all".into()),
        payment_method: Some("ALL".into()),
        search_text: Some("   ".into()),
        kind: KindFilter::All,
    };
    assert_eq!(filter(ledger.records(), &all).len(), ledger.len());
}

#[test]
fn filter_predicates_are_conjunctive() {
    let ledger = sample::transactions().unwrap();
    let criteria = FilterCriteria {
        search_text: Some("BILL".into()),
        category: Some("Utilities".into()),
        kind: KindFilter::Expense,
        payment_method: Some("Direct Debit".into()),
    };
    let out = filter(ledger.records(), &criteria);
    assert_eq!(ids(&out), vec!["t9", "t10"]);

    let none = FilterCriteria {
        search_text: Some("bill".into()),
        kind: KindFilter::Income,
        ..FilterCriteria::default()
    };
    assert!(filter(ledger.records(), &none).is_empty());
}

#[test]
fn sort_is_stable_and_idempotent() {
    let records = vec![
        rec("a", 1, RecordKind::Expense, "X", 5),
        rec("b", 2, RecordKind::Expense, "X", 3),
        rec("c", 3, RecordKind::Expense, "X", 5),
        rec("d", 4, RecordKind::Expense, "X", 1),
    ];
    let asc = sort_by_date(&records, SortOrder::Ascending);
    assert_eq!(ids(&asc), vec!["d", "b", "a", "c"]);
    let desc = sort_by_date(&records, SortOrder::Descending);
    assert_eq!(ids(&desc), vec!["a", "c", "b", "d"]);

    for order in [SortOrder::Ascending, SortOrder::Descending] {
        let once = sort_by_date(&records, order);
        assert_eq!(sort_by_date(&once, order), once);
    }
    // input untouched
    assert_eq!(ids(&records), vec!["a", "b", "c", "d"]);
}

#[test]
fn totals_of_nothing_are_zero() {
    let t = totals(&[]);
    assert_eq!(t.income, Decimal::ZERO);
    assert_eq!(t.expense, Decimal::ZERO);
    assert_eq!(t.balance, Decimal::ZERO);
}

#[test]
fn sample_balance_is_income_minus_expense() {
    let ledger = sample::transactions().unwrap();
    let t = totals(ledger.records());
    assert_eq!(t.income, "4550.00".parse::<Decimal>().unwrap());
    assert_eq!(t.expense, "1339.58".parse::<Decimal>().unwrap());
    assert_eq!(t.balance, t.income - t.expense);
}

#[test]
fn distribution_sums_to_about_one_hundred() {
    let ledger = sample::transactions().unwrap();
    let dist = category_distribution(ledger.records());
    let sum: Decimal = dist.iter().map(|d| d.percentage).sum();
    let n = Decimal::from(dist.len());
    assert!((sum - Decimal::ONE_HUNDRED).abs() <= n, "sum was {}", sum);
}

#[test]
fn distribution_of_zero_total_is_all_zero() {
    assert!(category_distribution(&[]).is_empty());
    let zeros = vec![
        rec("z1", 0, RecordKind::Expense, "A", 1),
        rec("z2", 0, RecordKind::Income, "B", 2),
    ];
    let dist = category_distribution(&zeros);
    assert_eq!(dist.len(), 2);
    assert!(dist.iter().all(|d| d.percentage.is_zero()));
}

#[test]
fn budget_progress_handles_zero_allocation() {
    let unbudgeted = BudgetCategory {
        id: "gifts".into(),
        name: "Gifts".into(),
        allocated: Decimal::ZERO,
        spent: Decimal::from(5),
    };
    let p = budget_progress(&unbudgeted);
    assert_eq!(p.percentage, Decimal::ZERO);
    assert!(p.is_over_budget);

    let idle = BudgetCategory {
        spent: Decimal::ZERO,
        ..unbudgeted
    };
    assert!(!budget_progress(&idle).is_over_budget);
}

#[test]
fn extreme_amounts_do_not_overflow_percentages() {
    let huge: Decimal = "1000000000000000000000000000".parse().unwrap();
    let mut big = rec("t1", 0, RecordKind::Expense, "Housing", 1);
    big.amount = huge;
    let dist = category_distribution(&[big]);
    assert_eq!(dist[0].percentage, Decimal::ONE_HUNDRED);

    let runaway = BudgetCategory {
        id: "housing".into(),
        name: "Housing".into(),
        allocated: Decimal::ONE,
        spent: huge,
    };
    assert!(budget_progress(&runaway).is_over_budget);
    assert!(budget_summary(&[runaway]).progress.is_over_budget);
}

#[test]
fn budget_progress_flags_overspend() {
    let budgets = sample::budgets().unwrap();
    let current = budgets.period("current").unwrap();
    let over: Vec<&str> = current
        .categories
        .iter()
        .filter(|c| budget_progress(c).is_over_budget)
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(over, vec!["entertainment"]);

    // exactly at the allocation is not over
    let housing = &current.categories[0];
    assert_eq!(budget_progress(housing).percentage, Decimal::ONE_HUNDRED);
}

#[test]
fn budget_summary_of_sample_period() {
    let budgets = sample::budgets().unwrap();
    let s = budget_summary(&budgets.period("current").unwrap().categories);
    assert_eq!(s.allocated, Decimal::from(3500));
    assert_eq!(s.spent, Decimal::from(3220));
    assert_eq!(s.remaining, Decimal::from(280));
    assert_eq!(s.progress.percentage, Decimal::from(92));
    assert!(!s.progress.is_over_budget);

    let empty = budget_summary(&[]);
    assert_eq!(empty.progress.percentage, Decimal::ZERO);
    assert!(!empty.progress.is_over_budget);
}

#[test]
fn average_requires_records() {
    assert_eq!(average(&[]), Err(LedgerError::EmptyInput));
    let two = vec![
        rec("a", 10, RecordKind::Income, "X", 1),
        rec("b", 20, RecordKind::Income, "X", 2),
    ];
    assert_eq!(average(&two).unwrap(), Decimal::from(15));
}

#[test]
fn rebalance_follows_new_totals() {
    let shares = sample::income_categories().unwrap();
    let pct: Vec<Decimal> = shares.iter().map(|s| s.percentage).collect();
    let expected: Vec<Decimal> = [51, 9, 2, 14, 3, 21].into_iter().map(Decimal::from).collect();
    assert_eq!(pct, expected);

    let mut bumped = shares.clone();
    bumped[1].total += Decimal::from(5620);
    let rebalanced = rebalance_percentages(&bumped);
    let sum: Decimal = rebalanced.iter().map(|s| s.percentage).sum();
    assert!((sum - Decimal::ONE_HUNDRED).abs() < Decimal::from(rebalanced.len()));
    assert_eq!(rebalanced[1].percentage, Decimal::from(54));
    // the input set is left alone
    assert_eq!(bumped[1].percentage, Decimal::from(9));
}

#[test]
fn credit_category_appends_unknown_names() {
    let shares = vec![CategoryShare {
        id: "c1".into(),
        name: "Employment".into(),
        total: Decimal::from(300),
        percentage: Decimal::ONE_HUNDRED,
    }];
    let out = credit_category(&shares, "Gifts", Decimal::from(100));
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].percentage, Decimal::from(75));
    assert_eq!(out[1].name, "Gifts");
    assert_eq!(out[1].id, "c2");
    assert_eq!(out[1].percentage, Decimal::from(25));

    let again = credit_category(&out, "Employment", Decimal::from(600));
    assert_eq!(again[0].total, Decimal::from(900));
    assert_eq!(again[0].percentage, Decimal::from(90));
    assert_eq!(again[1].percentage, Decimal::from(10));
}

#[test]
fn recurring_split_of_sample_incomes() {
    let incomes = sample::incomes().unwrap();
    let split = recurring_split(incomes.records());
    assert_eq!(split.total, "5620.50".parse::<Decimal>().unwrap());
    assert_eq!(split.recurring, "3770.50".parse::<Decimal>().unwrap());
    assert_eq!(split.non_recurring, Decimal::from(1850));
    assert!(incomes
        .records()
        .iter()
        .filter(|r| r.is_recurring())
        .all(|r| r.recurrence == Some(Frequency::Monthly)));
}

#[test]
fn monthly_trend_groups_by_calendar_month() {
    let mut records = scenario();
    let mut may = rec("r4", 30, RecordKind::Expense, "Food", 1);
    may.occurred_at = NaiveDate::from_ymd_opt(2023, 5, 2).unwrap();
    records.insert(0, may);

    let trend = monthly_trend(&records);
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0].month, "2023-04");
    assert_eq!(trend[0].savings, Decimal::ZERO);
    assert_eq!(trend[1].month, "2023-05");
    assert_eq!(trend[1].expense, Decimal::from(30));
    assert_eq!(trend[1].savings, Decimal::from(-30));
}

#[test]
fn highlights_pick_first_on_ties() {
    let records = scenario();
    assert_eq!(
        top_category(&records, RecordKind::Expense),
        Some(("Food".to_string(), Decimal::from(100)))
    );
    assert_eq!(top_category(&[], RecordKind::Income), None);

    let tied = vec![
        rec("a", 50, RecordKind::Expense, "X", 1),
        rec("b", 50, RecordKind::Expense, "Y", 2),
    ];
    assert_eq!(largest(&tied).map(|r| r.id.as_str()), Some("a"));
    assert!(largest(&[]).is_none());
}
