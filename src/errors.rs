// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the ledger library.
///
/// Aggregation is total over well-formed input; only [`LedgerError::EmptyInput`]
/// can come out of it. The other variants are raised when records are built,
/// edited, or removed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("cannot aggregate an empty set of records")]
    EmptyInput,
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("id '{0}' is already in use or was retired")]
    DuplicateId(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
