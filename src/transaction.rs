//! Defines the core data model for the ledger: a single income or expense entry.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::ValidationError;

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. rent.
    Expense,
}

impl TransactionKind {
    /// The label used for this kind in the stored ledger and in selector controls.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Income" => Ok(TransactionKind::Income),
            "Expense" => Ok(TransactionKind::Expense),
            _ => Err(ValidationError::UnknownKind),
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The field names of the serialized form (`desc`, `type`) match the ledger
/// blobs written by earlier versions of the app, so they must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the ledger and never changed.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    #[serde(rename = "desc")]
    pub description: String,
    /// The amount of money spent or earned, always greater than zero.
    pub amount: f64,
    /// Whether the amount was earned or spent.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub date: Date,
}

/// The mutable fields of a [Transaction], i.e. everything except its ID.
///
/// The form controller hands these to the ledger, and hands a copy back to
/// the renderer when an edit begins.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// Whether the amount was earned or spent.
    pub kind: TransactionKind,
    /// When the transaction happened.
    pub date: Date,
}

impl TransactionFields {
    /// Create a set of transaction fields.
    ///
    /// Shortcut for constructing [TransactionFields] from borrowed text.
    pub fn new(description: &str, amount: f64, kind: TransactionKind, date: Date) -> Self {
        Self {
            description: description.to_owned(),
            amount,
            kind,
            date,
        }
    }

    /// Check the invariants every stored transaction must satisfy.
    ///
    /// # Errors
    /// This function will return a:
    /// - [ValidationError::EmptyDescription] if the description is blank,
    /// - or [ValidationError::NonPositiveAmount] if the amount is not a finite number above zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount);
        }

        Ok(())
    }

    pub(crate) fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            kind: self.kind,
            date: self.date,
        }
    }
}

impl From<&Transaction> for TransactionFields {
    fn from(transaction: &Transaction) -> Self {
        Self {
            description: transaction.description.clone(),
            amount: transaction.amount,
            kind: transaction.kind,
            date: transaction.date,
        }
    }
}
