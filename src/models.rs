// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Largest amount a record or budget line may hold, in whole currency units.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
pub fn check_amount(what: &str, v: Decimal) -> Result<(), LedgerError> {
    if v < Decimal::ZERO {
        return Err(LedgerError::InvalidRecord(format!(
            "{} must not be negative, got {}",
            what, v
        )));
    }
    if v > Decimal::from(MAX_AMOUNT) {
        return Err(LedgerError::InvalidRecord(format!(
            "{} must not exceed {}, got {}",
            what, MAX_AMOUNT, v
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

/// A single dated monetary event. Amounts are magnitudes; direction lives in `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub kind: RecordKind,
    pub category: String,
    pub occurred_at: NaiveDate,
    pub method: String,
    pub status: RecordStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Record {
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Checks the invariants every stored record must satisfy.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.id.trim().is_empty() {
            return Err(LedgerError::InvalidRecord("id must not be empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(LedgerError::InvalidRecord(format!(
                "record '{}' has an empty description",
                self.id
            )));
        }
        check_amount(&format!("amount of record '{}'", self.id), self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: String,
    pub name: String,
    pub allocated: Decimal,
    pub spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    pub id: String,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub categories: Vec<BudgetCategory>,
}

/// A running category total whose share of the grand total is kept in sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub id: String,
    pub name: String,
    pub total: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDistribution {
    pub category: String,
    pub total: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl KindFilter {
    pub fn accepts(self, kind: RecordKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Income => kind == RecordKind::Income,
            KindFilter::Expense => kind == RecordKind::Expense,
        }
    }
}

/// Conjunctive record filter. `None` and `"all"` both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_text: Option<String>,
    pub category: Option<String>,
    pub kind: KindFilter,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    pub percentage: Decimal,
    pub is_over_budget: bool,
}

impl BudgetProgress {
    /// Progress capped at 100, for bar-style displays.
    pub fn clamped(&self) -> Decimal {
        self.percentage.min(Decimal::ONE_HUNDRED)
    }

    /// How far past the allocation spending went, in percent; zero when within budget.
    pub fn excess(&self) -> Decimal {
        if self.percentage > Decimal::ONE_HUNDRED {
            self.percentage - Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetSummary {
    pub allocated: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub progress: BudgetProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RecurringSplit {
    pub total: Decimal,
    pub recurring: Decimal,
    pub non_recurring: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyFlow {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
}

fn unknown(what: &str, value: &str, expected: &str) -> LedgerError {
    LedgerError::InvalidRecord(format!(
        "unknown {} '{}', expected {}",
        what, value, expected
    ))
}

impl FromStr for RecordKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(RecordKind::Income),
            "expense" => Ok(RecordKind::Expense),
            other => Err(unknown("kind", other, "income|expense")),
        }
    }
}

impl FromStr for RecordStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(RecordStatus::Completed),
            "pending" => Ok(RecordStatus::Pending),
            "failed" => Ok(RecordStatus::Failed),
            other => Err(unknown("status", other, "completed|pending|failed")),
        }
    }
}

impl FromStr for Frequency {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(unknown(
                "frequency",
                other,
                "weekly|biweekly|monthly|yearly",
            )),
        }
    }
}

impl FromStr for KindFilter {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(KindFilter::All),
            "income" => Ok(KindFilter::Income),
            "expense" => Ok(KindFilter::Expense),
            other => Err(unknown("type filter", other, "all|income|expense")),
        }
    }
}

impl FromStr for SortOrder {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(unknown("sort order", other, "asc|desc")),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        })
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordStatus::Completed => "completed",
            RecordStatus::Pending => "pending",
            RecordStatus::Failed => "failed",
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        })
    }
}
