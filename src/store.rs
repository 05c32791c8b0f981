// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::project_dirs;
use crate::ledger::{BudgetBook, Ledger};
use crate::models::CategoryShare;
use crate::sample;

/// Everything the dashboard pages work on during one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub transactions: Ledger,
    pub incomes: Ledger,
    pub budgets: BudgetBook,
    pub income_categories: Vec<CategoryShare>,
}

impl Session {
    pub fn sample() -> Result<Self> {
        Ok(Self {
            transactions: sample::transactions()?,
            incomes: sample::incomes()?,
            budgets: sample::budgets()?,
            income_categories: sample::income_categories()?,
        })
    }
}

pub fn data_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("finboard.json"))
}

/// Loads the session at `path`, seeding it with sample data on first use.
pub fn open_or_init(path: &Path) -> Result<Session> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "seeding new session with sample data");
        let session = Session::sample()?;
        save(path, &session)?;
        return Ok(session);
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("Open session at {}", path.display()))?;
    let session: Session = serde_json::from_str(&data)
        .with_context(|| format!("Parse session at {}", path.display()))?;
    tracing::debug!(
        transactions = session.transactions.len(),
        incomes = session.incomes.len(),
        "session loaded"
    );
    Ok(session)
}

/// Writes to a temporary sibling, then renames it over `path`.
pub fn save(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create data dir")?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(session)?)
        .with_context(|| format!("Write session at {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Replace session at {}", path.display()))?;
    Ok(())
}
