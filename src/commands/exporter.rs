// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregator::sort_by_date;
use crate::models::SortOrder;
use crate::store::Session;
use crate::utils::required;
use anyhow::{bail, Result};
use serde_json::json;
use std::path::Path;

pub fn handle(session: &Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = required(sub, "format")?.to_lowercase();
            let out = required(sub, "out")?;
            export_transactions(session, &fmt, Path::new(out))?;
            println!("Exported transactions to {}", out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes every transaction, oldest first, as `csv` or `json`.
pub fn export_transactions(session: &Session, fmt: &str, out: &Path) -> Result<()> {
    let rows = sort_by_date(session.transactions.records(), SortOrder::Ascending);
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "description",
                "amount",
                "type",
                "category",
                "method",
                "status",
            ])?;
            for r in &rows {
                wtr.write_record([
                    r.occurred_at.to_string(),
                    r.description.clone(),
                    r.amount.to_string(),
                    r.kind.to_string(),
                    r.category.clone(),
                    r.method.clone(),
                    r.status.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|r| {
                    json!({
                        "id": r.id,
                        "date": r.occurred_at.to_string(),
                        "description": r.description,
                        "amount": r.amount.to_string(),
                        "type": r.kind.to_string(),
                        "category": r.category,
                        "method": r.method,
                        "status": r.status.to_string(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    tracing::debug!(count = rows.len(), out = %out.display(), "transactions exported");
    Ok(())
}
