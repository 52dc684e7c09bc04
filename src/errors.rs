// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Kind;
use std::fmt;
use thiserror::Error;

/// A single violated input rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    AmountNotPositive,
    AmountTooLarge,
    InvalidKind,
    MissingCategory,
    FutureDate,
    UnknownCategory(String),
    CategoryKindMismatch {
        category: String,
        expected: Kind,
        actual: Kind,
    },
    DuplicateCategory(String),
    NegativeBudget,
    InvalidMonth(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::AmountNotPositive => write!(f, "Amount must be greater than zero"),
            ErrorKind::AmountTooLarge => {
                write!(f, "Amount cannot exceed {}", crate::validation::MAX_AMOUNT)
            }
            ErrorKind::InvalidKind => write!(f, "Type must be 'income' or 'expense'"),
            ErrorKind::MissingCategory => write!(f, "Category is required"),
            ErrorKind::FutureDate => write!(f, "Date cannot be in the future"),
            ErrorKind::UnknownCategory(name) => write!(f, "Category '{}' does not exist", name),
            ErrorKind::CategoryKindMismatch {
                category,
                expected,
                actual,
            } => write!(
                f,
                "Category '{}' is an {} category and cannot hold an {} transaction",
                category, actual, expected
            ),
            ErrorKind::DuplicateCategory(name) => {
                write!(f, "Category '{}' already exists", name)
            }
            ErrorKind::NegativeBudget => write!(f, "Budget amount cannot be negative"),
            ErrorKind::InvalidMonth(m) => write!(f, "Invalid month '{}', expected YYYY-MM", m),
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{}", join_messages(.0))]
    Validation(Vec<ErrorKind>),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    /// Rule violations carried by a validation failure, empty otherwise.
    pub fn violations(&self) -> &[ErrorKind] {
        match self {
            LedgerError::Validation(kinds) => kinds,
            _ => &[],
        }
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

fn join_messages(kinds: &[ErrorKind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
