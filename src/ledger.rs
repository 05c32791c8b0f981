// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Caller-owned collections.
//!
//! A [`Ledger`] is the only place records are mutated. Aggregation works on the
//! slice returned by [`Ledger::records`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};
use crate::models::{
    BudgetCategory, BudgetPeriod, Frequency, Record, RecordKind, RecordStatus, check_amount,
};

pub const DEFAULT_CATEGORY: &str = "Other";
pub const DEFAULT_METHOD: &str = "Cash";

fn trimmed_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Builder for a new record. Only description, amount and kind are required.
#[derive(Debug, Clone)]
pub struct RecordDraft {
    description: String,
    amount: Decimal,
    kind: RecordKind,
    category: Option<String>,
    occurred_at: Option<NaiveDate>,
    method: Option<String>,
    status: RecordStatus,
    recurrence: Option<Frequency>,
    notes: Option<String>,
}

impl RecordDraft {
    pub fn new(description: impl Into<String>, amount: Decimal, kind: RecordKind) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            category: None,
            occurred_at: None,
            method: None,
            status: RecordStatus::default(),
            recurrence: None,
            notes: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.occurred_at = Some(date);
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn status(mut self, status: RecordStatus) -> Self {
        self.status = status;
        self
    }

    pub fn recurring(mut self, frequency: Frequency) -> Self {
        self.recurrence = Some(frequency);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Fills defaults and validates. A missing date means today.
    pub fn build(self, id: impl Into<String>) -> LedgerResult<Record> {
        let record = Record {
            id: id.into(),
            description: self.description.trim().to_string(),
            amount: self.amount,
            kind: self.kind,
            category: trimmed_or(self.category.as_deref(), DEFAULT_CATEGORY),
            occurred_at: self
                .occurred_at
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            method: trimmed_or(self.method.as_deref(), DEFAULT_METHOD),
            status: self.status,
            recurrence: self.recurrence,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        };
        record.validate()?;
        Ok(record)
    }
}

/// Explicit field overrides for an existing record. `None` leaves a field as is.
///
/// `recurrence` and `notes` are double options: `Some(None)` clears the field.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub kind: Option<RecordKind>,
    pub category: Option<String>,
    pub occurred_at: Option<NaiveDate>,
    pub method: Option<String>,
    pub status: Option<RecordStatus>,
    pub recurrence: Option<Option<Frequency>>,
    pub notes: Option<Option<String>>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.occurred_at.is_none()
            && self.method.is_none()
            && self.status.is_none()
            && self.recurrence.is_none()
            && self.notes.is_none()
    }

    /// Blank category or method fall back to the same defaults as [`RecordDraft::build`].
    fn apply(self, mut record: Record) -> Record {
        if let Some(v) = self.description {
            record.description = v.trim().to_string();
        }
        if let Some(v) = self.amount {
            record.amount = v;
        }
        if let Some(v) = self.kind {
            record.kind = v;
        }
        if let Some(v) = self.category {
            record.category = trimmed_or(Some(v.as_str()), DEFAULT_CATEGORY);
        }
        if let Some(v) = self.occurred_at {
            record.occurred_at = v;
        }
        if let Some(v) = self.method {
            record.method = trimmed_or(Some(v.as_str()), DEFAULT_METHOD);
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.recurrence {
            record.recurrence = v;
        }
        if let Some(v) = self.notes {
            record.notes = v;
        }
        record
    }
}

/// An ordered record collection that never hands out the same id twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    prefix: String,
    next_seq: u64,
    records: Vec<Record>,
    #[serde(default)]
    retired: BTreeSet<String>,
}

impl Ledger {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next_seq: 1,
            records: Vec::new(),
            retired: BTreeSet::new(),
        }
    }

    /// Builds a ledger from existing records, rejecting duplicate or invalid ones.
    pub fn with_records(
        prefix: impl Into<String>,
        records: impl IntoIterator<Item = Record>,
    ) -> LedgerResult<Self> {
        let mut ledger = Self::new(prefix);
        for r in records {
            ledger.insert(r)?;
        }
        Ok(ledger)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    fn is_taken(&self, id: &str) -> bool {
        self.retired.contains(id) || self.records.iter().any(|r| r.id == id)
    }

    fn issue_id(&mut self) -> String {
        loop {
            let candidate = format!("{}{}", self.prefix, self.next_seq);
            self.next_seq += 1;
            if !self.is_taken(&candidate) {
                return candidate;
            }
        }
    }

    /// Validates the draft under a fresh id and appends it.
    pub fn add(&mut self, draft: RecordDraft) -> LedgerResult<&Record> {
        let id = self.issue_id();
        let record = draft.build(id)?;
        tracing::debug!(
            id = %record.id,
            amount = %record.amount,
            kind = %record.kind,
            "record added"
        );
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Appends a record that already carries its id.
    pub fn insert(&mut self, record: Record) -> LedgerResult<()> {
        record.validate()?;
        if self.is_taken(&record.id) {
            return Err(LedgerError::DuplicateId(record.id));
        }
        self.records.push(record);
        Ok(())
    }

    /// Applies `patch` to the record `id`. The stored record is only replaced
    /// once the patched version validates.
    pub fn update(&mut self, id: &str, patch: RecordPatch) -> LedgerResult<&Record> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let patched = patch.apply(self.records[idx].clone());
        patched.validate()?;
        tracing::debug!(id, "record updated");
        self.records[idx] = patched;
        Ok(&self.records[idx])
    }

    pub fn remove(&mut self, id: &str) -> LedgerResult<Record> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))?;
        let removed = self.records.remove(idx);
        self.retired.insert(removed.id.clone());
        tracing::debug!(id, "record removed");
        Ok(removed)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetCategoryPatch {
    pub name: Option<String>,
    pub allocated: Option<Decimal>,
    pub spent: Option<Decimal>,
}

fn validate_category(c: &BudgetCategory) -> LedgerResult<()> {
    if c.id.trim().is_empty() || c.name.trim().is_empty() {
        return Err(LedgerError::InvalidRecord(
            "budget category needs an id and a name".into(),
        ));
    }
    check_amount("allocated", c.allocated)?;
    check_amount("spent", c.spent)
}

/// Budget periods, each owning its own category list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetBook {
    periods: Vec<BudgetPeriod>,
}

impl BudgetBook {
    pub fn new(periods: Vec<BudgetPeriod>) -> Self {
        Self { periods }
    }

    pub fn periods(&self) -> &[BudgetPeriod] {
        &self.periods
    }

    pub fn period(&self, id: &str) -> LedgerResult<&BudgetPeriod> {
        self.periods
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("budget period {}", id)))
    }

    fn period_mut(&mut self, id: &str) -> LedgerResult<&mut BudgetPeriod> {
        self.periods
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("budget period {}", id)))
    }

    /// Adds a category; the id is derived from the name when not given.
    pub fn add_category(
        &mut self,
        period: &str,
        id: Option<&str>,
        name: &str,
        allocated: Decimal,
        spent: Decimal,
    ) -> LedgerResult<&BudgetCategory> {
        let p = self.period_mut(period)?;
        let base = id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slug(name));
        let mut cid = base.clone();
        let mut n = 2;
        while p.categories.iter().any(|c| c.id == cid) {
            if id.is_some() {
                return Err(LedgerError::DuplicateId(base));
            }
            cid = format!("{}-{}", base, n);
            n += 1;
        }
        let category = BudgetCategory {
            id: cid,
            name: name.trim().to_string(),
            allocated,
            spent,
        };
        validate_category(&category)?;
        tracing::debug!(period, id = %category.id, "budget category added");
        p.categories.push(category);
        Ok(&p.categories[p.categories.len() - 1])
    }

    pub fn update_category(
        &mut self,
        period: &str,
        id: &str,
        patch: BudgetCategoryPatch,
    ) -> LedgerResult<&BudgetCategory> {
        let p = self.period_mut(period)?;
        let idx = p
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("budget category {}", id)))?;
        let mut next = p.categories[idx].clone();
        if let Some(name) = patch.name {
            next.name = name.trim().to_string();
        }
        if let Some(v) = patch.allocated {
            next.allocated = v;
        }
        if let Some(v) = patch.spent {
            next.spent = v;
        }
        validate_category(&next)?;
        p.categories[idx] = next;
        Ok(&p.categories[idx])
    }

    pub fn remove_category(&mut self, period: &str, id: &str) -> LedgerResult<BudgetCategory> {
        let p = self.period_mut(period)?;
        let idx = p
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("budget category {}", id)))?;
        Ok(p.categories.remove(idx))
    }

    /// Adds `amount` to the category's `spent`.
    pub fn record_expense(
        &mut self,
        period: &str,
        id: &str,
        amount: Decimal,
    ) -> LedgerResult<&BudgetCategory> {
        check_amount("expense amount", amount)?;
        let p = self.period_mut(period)?;
        let c = p
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| LedgerError::NotFound(format!("budget category {}", id)))?;
        let spent = c.spent + amount;
        check_amount("spent", spent)?;
        c.spent = spent;
        Ok(&*c)
    }
}

fn slug(name: &str) -> String {
    let s: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let s = s.trim_matches('-').to_string();
    if s.is_empty() { "category".into() } else { s }
}
