// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::RecordDraft;
use crate::models::{RecordKind, RecordStatus};
use crate::store::Session;
use crate::utils::{parse_date, parse_decimal, required};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = required(sub, "path")?;
            let n = import_transactions(session, Path::new(path))?;
            println!("Imported {} transactions from {}", n, path);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Appends every row of the CSV under fresh ids. Either all rows land or none do.
pub fn import_transactions(session: &mut Session, path: &Path) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let mut staged = session.transactions.clone();
    let mut count = 0;
    for (i, result) in rdr.records().enumerate() {
        let line = i + 2;
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?;
        let description = rec.get(1).context("description missing")?;
        let amount_raw = rec.get(2).context("amount missing")?;
        let kind_raw = rec.get(3).filter(|s| !s.is_empty()).unwrap_or("expense");
        let category = rec.get(4).unwrap_or("");
        let method = rec.get(5).unwrap_or("");
        let status_raw = rec.get(6).filter(|s| !s.is_empty()).unwrap_or("completed");

        let date = parse_date(date_raw).with_context(|| format!("line {}", line))?;
        let amount = parse_decimal(amount_raw).with_context(|| {
            format!(
                "Invalid amount '{}' for {} (line {})",
                amount_raw, description, line
            )
        })?;
        let kind: RecordKind = kind_raw.parse().with_context(|| format!("line {}", line))?;
        let status: RecordStatus = status_raw.parse().with_context(|| format!("line {}", line))?;

        let mut draft = RecordDraft::new(description, amount, kind)
            .on(date)
            .status(status);
        if !category.is_empty() {
            draft = draft.category(category);
        }
        if !method.is_empty() {
            draft = draft.method(method);
        }
        staged
            .add(draft)
            .with_context(|| format!("line {}", line))?;
        count += 1;
    }
    session.transactions = staged;
    tracing::info!(count, path = %path.display(), "transactions imported");
    Ok(count)
}
