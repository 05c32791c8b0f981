// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finboard::store::Session;
use finboard::{cli, commands::exporter, commands::importer};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn export_transactions_writes_pretty_json_oldest_first() {
    let session = Session::sample().unwrap();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let matches = cli::build_cli().get_matches_from([
        "finboard",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&session, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(
        items[0],
        json!({
            "id": "t6",
            "date": "2023-04-05",
            "description": "Rent Payment",
            "amount": "950.00",
            "type": "expense",
            "category": "Housing",
            "method": "Bank Transfer",
            "status": "completed",
        })
    );
    assert_eq!(items[9]["id"], "t8");
}

#[test]
fn csv_export_can_be_imported_back() {
    let session = Session::sample().unwrap();
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    exporter::export_transactions(&session, "csv", &out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("date,description,amount,type,category,method,status")
    );
    assert_eq!(
        lines.next(),
        Some("2023-04-05,Rent Payment,950.00,expense,Housing,Bank Transfer,completed")
    );

    let mut fresh = Session::sample().unwrap();
    let n = importer::import_transactions(&mut fresh, &out).unwrap();
    assert_eq!(n, 10);
    let totals = finboard::aggregator::totals(fresh.transactions.records());
    let original = finboard::aggregator::totals(session.transactions.records());
    assert_eq!(totals.income, original.income * rust_decimal::Decimal::TWO);
}

#[test]
fn unknown_export_format_is_an_error() {
    let session = Session::sample().unwrap();
    let dir = tempdir().unwrap();
    assert!(exporter::export_transactions(&session, "xml", &dir.path().join("x")).is_err());
}
