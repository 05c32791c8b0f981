// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finboard::errors::LedgerError;
use finboard::ledger::{BudgetCategoryPatch, Ledger, RecordDraft, RecordPatch};
use finboard::models::{Frequency, RecordKind, RecordStatus};
use finboard::sample;
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(desc: &str, amount: i64) -> RecordDraft {
    RecordDraft::new(desc, Decimal::from(amount), RecordKind::Expense).on(date("2023-04-01"))
}

#[test]
fn ids_are_never_reused_after_delete() {
    let mut ledger = Ledger::new("t");
    let a = ledger.add(draft("A", 1)).unwrap().id.clone();
    let b = ledger.add(draft("B", 2)).unwrap().id.clone();
    assert_eq!((a.as_str(), b.as_str()), ("t1", "t2"));

    ledger.remove(&b).unwrap();
    let c = ledger.add(draft("C", 3)).unwrap().id.clone();
    assert_eq!(c, "t3");

    let reused = ledger.records()[0].clone();
    let mut stale = reused.clone();
    stale.id = b.clone();
    assert_eq!(ledger.insert(stale), Err(LedgerError::DuplicateId(b)));
    assert_eq!(
        ledger.insert(reused),
        Err(LedgerError::DuplicateId("t1".into()))
    );
}

#[test]
fn add_skips_ids_already_present() {
    let mut ledger = sample::transactions().unwrap();
    let r = ledger.add(draft("Bakery", 7)).unwrap();
    assert_eq!(r.id, "t11");
    assert_eq!(ledger.len(), 11);
}

#[test]
fn draft_validation_happens_before_insert() {
    let mut ledger = Ledger::new("t");
    let err = ledger.add(draft("", 5)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidRecord(_)));
    assert!(ledger.is_empty());

    let err = ledger.add(draft("Refund", -5)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidRecord(_)));
}

#[test]
fn update_replaces_fields_by_id() {
    let mut ledger = sample::transactions().unwrap();
    let patch = RecordPatch {
        amount: Some(Decimal::new(1650, 2)),
        status: Some(RecordStatus::Failed),
        notes: Some(Some("charged twice".into())),
        ..RecordPatch::default()
    };
    let r = ledger.update("t3", patch).unwrap();
    assert_eq!(r.amount, Decimal::new(1650, 2));
    assert_eq!(r.status, RecordStatus::Failed);
    assert_eq!(r.description, "Netflix");
    assert_eq!(r.notes.as_deref(), Some("charged twice"));
    // position is kept
    assert_eq!(ledger.records()[2].id, "t3");
}

#[test]
fn failed_update_leaves_record_untouched() {
    let mut ledger = sample::transactions().unwrap();
    let before = ledger.get("t2").cloned().unwrap();
    let patch = RecordPatch {
        description: Some("Supermarket".into()),
        amount: Some(Decimal::from(-1)),
        ..RecordPatch::default()
    };
    assert!(matches!(
        ledger.update("t2", patch),
        Err(LedgerError::InvalidRecord(_))
    ));
    assert_eq!(ledger.get("t2"), Some(&before));
}

#[test]
fn unknown_ids_are_reported() {
    let mut ledger = Ledger::new("t");
    assert_eq!(
        ledger.remove("t9").unwrap_err(),
        LedgerError::NotFound("t9".into())
    );
    assert!(matches!(
        ledger.update("t9", RecordPatch::default()),
        Err(LedgerError::NotFound(_))
    ));
}

#[test]
fn kinds_and_frequencies_parse_case_insensitively() {
    assert_eq!("Income".parse::<RecordKind>().unwrap(), RecordKind::Income);
    assert_eq!(" EXPENSE ".parse::<RecordKind>().unwrap(), RecordKind::Expense);
    assert!(matches!(
        "transfer".parse::<RecordKind>(),
        Err(LedgerError::InvalidRecord(_))
    ));
    assert_eq!("BiWeekly".parse::<Frequency>().unwrap(), Frequency::Biweekly);
    assert!("pending".parse::<RecordStatus>().is_ok());
    assert!("lost".parse::<RecordStatus>().is_err());
}

#[test]
fn ledger_round_trips_through_json_with_retired_ids() {
    let mut ledger = Ledger::new("i");
    ledger.add(draft("A", 1).recurring(Frequency::Monthly)).unwrap();
    ledger.remove("i1").unwrap();
    let text = serde_json::to_string(&ledger).unwrap();
    let mut back: Ledger = serde_json::from_str(&text).unwrap();
    assert_eq!(back, ledger);
    assert_eq!(back.add(draft("B", 2)).unwrap().id, "i2");
}

#[test]
fn budget_categories_crud() {
    let mut book = sample::budgets().unwrap();
    let c = book
        .add_category("current", None, "Eating Out", Decimal::from(120), Decimal::ZERO)
        .unwrap();
    assert_eq!(c.id, "eating-out");
    let again = book
        .add_category("current", None, "Eating out", Decimal::from(10), Decimal::ZERO)
        .unwrap();
    assert_eq!(again.id, "eating-out-2");
    assert_eq!(
        book.add_category("current", Some("food"), "Food", Decimal::ONE, Decimal::ZERO)
            .unwrap_err(),
        LedgerError::DuplicateId("food".into())
    );

    let updated = book
        .update_category(
            "current",
            "eating-out",
            BudgetCategoryPatch {
                allocated: Some(Decimal::from(150)),
                ..BudgetCategoryPatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.allocated, Decimal::from(150));
    assert_eq!(updated.name, "Eating Out");

    let spent = book
        .record_expense("current", "eating-out", Decimal::from(40))
        .unwrap();
    assert_eq!(spent.spent, Decimal::from(40));
    assert!(book
        .record_expense("current", "eating-out", Decimal::from(-1))
        .is_err());

    book.remove_category("current", "eating-out-2").unwrap();
    assert_eq!(book.period("current").unwrap().categories.len(), 7);
    assert!(matches!(
        book.remove_category("nope", "food"),
        Err(LedgerError::NotFound(_))
    ));
    // other periods are independent
    assert_eq!(book.period("previous").unwrap().categories.len(), 6);
}
