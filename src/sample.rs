// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Seed data for a fresh session.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::aggregator::rebalance_percentages;
use crate::ledger::{BudgetBook, Ledger};
use crate::models::{
    BudgetCategory, BudgetPeriod, CategoryShare, Frequency, Record, RecordKind, RecordStatus,
};
use crate::utils::{parse_date, parse_decimal};

const BANK_TRANSFER: &str = "Bank Transfer";
const CREDIT_CARD: &str = "Credit Card";
const DEBIT_CARD: &str = "Debit Card";
const DIRECT_DEBIT: &str = "Direct Debit";

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    description: &str,
    amount: &str,
    kind: RecordKind,
    category: &str,
    date: &str,
    method: &str,
    status: RecordStatus,
) -> Result<Record> {
    Ok(Record {
        id: id.into(),
        description: description.into(),
        amount: parse_decimal(amount)?,
        kind,
        category: category.into(),
        occurred_at: parse_date(date)?,
        method: method.into(),
        status,
        recurrence: None,
        notes: None,
    })
}

pub fn transactions() -> Result<Ledger> {
    use RecordKind::{Expense, Income};
    use RecordStatus::{Completed, Pending};
    let rows = vec![
        record(
            "t1",
            "Payroll",
            "2850.00",
            Income,
            "Salary",
            "2023-04-15",
            BANK_TRANSFER,
            Completed,
        )?,
        record(
            "t2",
            "Corner Supermarket",
            "125.40",
            Expense,
            "Food",
            "2023-04-18",
            DEBIT_CARD,
            Completed,
        )?,
        record(
            "t3",
            "Netflix",
            "15.99",
            Expense,
            "Entertainment",
            "2023-04-20",
            CREDIT_CARD,
            Completed,
        )?,
        record("t4", "Uber", "24.50", Expense, "Transport", "2023-04-22", CREDIT_CARD, Completed)?,
        record(
            "t5",
            "Transfer Received",
            "1200.00",
            Income,
            "Income",
            "2023-04-25",
            BANK_TRANSFER,
            Completed,
        )?,
        record(
            "t6",
            "Rent Payment",
            "950.00",
            Expense,
            "Housing",
            "2023-04-05",
            BANK_TRANSFER,
            Completed,
        )?,
        record(
            "t7",
            "La Plaza Restaurant",
            "78.50",
            Expense,
            "Food",
            "2023-04-12",
            CREDIT_CARD,
            Completed,
        )?,
        record(
            "t8",
            "Freelance Payment",
            "500.00",
            Income,
            "Income",
            "2023-04-28",
            BANK_TRANSFER,
            Pending,
        )?,
        record(
            "t9",
            "Electricity Bill",
            "85.20",
            Expense,
            "Utilities",
            "2023-04-10",
            DIRECT_DEBIT,
            Completed,
        )?,
        record(
            "t10",
            "Internet Bill",
            "59.99",
            Expense,
            "Utilities",
            "2023-04-14",
            DIRECT_DEBIT,
            Completed,
        )?,
    ];
    Ok(Ledger::with_records("t", rows)?)
}

fn income(
    id: &str,
    source: &str,
    amount: &str,
    category: &str,
    date: &str,
    recurrence: Option<Frequency>,
    notes: &str,
) -> Result<Record> {
    let mut r = record(
        id,
        source,
        amount,
        RecordKind::Income,
        category,
        date,
        BANK_TRANSFER,
        RecordStatus::Completed,
    )?;
    r.recurrence = recurrence;
    r.notes = Some(notes.into());
    Ok(r)
}

pub fn incomes() -> Result<Ledger> {
    use Frequency::Monthly;
    let rows = vec![
        income(
            "i1",
            "Main Salary",
            "2850.00",
            "Employment",
            "2023-04-15",
            Some(Monthly),
            "Monthly salary from main job",
        )?,
        income(
            "i2",
            "Freelance Project",
            "500.00",
            "Freelance",
            "2023-04-28",
            None,
            "Web design project for a client",
        )?,
        income(
            "i3",
            "Transfer Received",
            "1200.00",
            "Other",
            "2023-04-25",
            None,
            "Loan repaid by a relative",
        )?,
        income(
            "i4",
            "Dividends",
            "120.50",
            "Investments",
            "2023-04-10",
            Some(Monthly),
            "Stock dividends",
        )?,
        income(
            "i5",
            "Property Rent",
            "800.00",
            "Rental",
            "2023-04-05",
            Some(Monthly),
            "Rent from the second apartment",
        )?,
        income("i6", "Marketplace Sale", "150.00", "Sales", "2023-04-22", None, "Sold used items")?,
    ];
    Ok(Ledger::with_records("i", rows)?)
}

/// Income category shares, rebalanced from their totals.
pub fn income_categories() -> Result<Vec<CategoryShare>> {
    let rows = [
        ("c1", "Employment", "2850"),
        ("c2", "Freelance", "500"),
        ("c3", "Investments", "120.5"),
        ("c4", "Rental", "800"),
        ("c5", "Sales", "150"),
        ("c6", "Other", "1200"),
    ];
    let mut shares = Vec::with_capacity(rows.len());
    for (id, name, total) in rows {
        shares.push(CategoryShare {
            id: id.into(),
            name: name.into(),
            total: parse_decimal(total)?,
            percentage: Decimal::ZERO,
        });
    }
    Ok(rebalance_percentages(&shares))
}

fn categories(rows: &[(&str, &str, i64, i64)]) -> Vec<BudgetCategory> {
    rows.iter()
        .map(|(id, name, allocated, spent)| BudgetCategory {
            id: (*id).into(),
            name: (*name).into(),
            allocated: Decimal::from(*allocated),
            spent: Decimal::from(*spent),
        })
        .collect()
}

pub fn budgets() -> Result<BudgetBook> {
    let current = BudgetPeriod {
        id: "current".into(),
        name: "May 2023".into(),
        start: parse_date("2023-05-01")?,
        end: parse_date("2023-05-31")?,
        categories: categories(&[
            ("housing", "Housing", 1200, 1200),
            ("food", "Food", 700, 580),
            ("transport", "Transport", 500, 420),
            ("entertainment", "Entertainment", 300, 350),
            ("utilities", "Utilities", 350, 290),
            ("shopping", "Shopping", 450, 380),
        ]),
    };
    let previous = BudgetPeriod {
        id: "previous".into(),
        name: "April 2023".into(),
        start: parse_date("2023-04-01")?,
        end: parse_date("2023-04-30")?,
        categories: categories(&[
            ("housing", "Housing", 1200, 1200),
            ("food", "Food", 700, 650),
            ("transport", "Transport", 500, 480),
            ("entertainment", "Entertainment", 300, 320),
            ("utilities", "Utilities", 350, 340),
            ("shopping", "Shopping", 450, 420),
        ]),
    };
    Ok(BudgetBook::new(vec![current, previous]))
}
