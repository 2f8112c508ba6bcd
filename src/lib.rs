//! Pocket Ledger is the model behind a small personal finance ledger.
//!
//! It records income and expense entries, persists them to a key-value blob
//! store, and projects them into a filtered, sorted table plus a summary of
//! totals for whatever renders the ledger on screen.
//!
//! The usual flow for one user action is:
//! 1. [FormController] validates raw input,
//! 2. [Ledger] applies the mutation and persists the full ledger through a
//!    [PersistenceAdapter],
//! 3. the renderer calls [project] and [summary_pie_chart] and paints the result.

#![warn(missing_docs)]

mod chart;
mod config;
mod form;
mod ledger;
mod persistence;
mod transaction;
mod view;

pub use chart::summary_pie_chart;
pub use config::LedgerConfig;
pub use form::{FormController, FormMode, SubmitOutcome};
pub use ledger::Ledger;
pub use persistence::{
    BlobStore, MemoryBlobStore, PersistenceAdapter, PersistenceError, SqliteBlobStore,
};
pub use transaction::{Transaction, TransactionFields, TransactionId, TransactionKind};
pub use view::{EMPTY_STATE_MESSAGE, Filter, Projection, SortOrder, Summary, project, summarize};

/// The errors that may occur when working with the ledger.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user entered something that cannot be recorded.
    ///
    /// The message is meant to be shown next to the form and no change has
    /// been made to the ledger.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// An operation referred to a transaction ID that is not in the ledger.
    ///
    /// This indicates a stale ID held by the renderer, e.g. a row that was
    /// already deleted, rather than a mistake by the user.
    #[error("transaction {0} could not be found")]
    NotFound(TransactionId),

    /// Every transaction ID up to the largest possible value has been issued,
    /// so no new transaction can be recorded.
    #[error("no transaction IDs are left to issue")]
    IdsExhausted,

    /// The ledger could not be read from or written to the blob store.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Reasons why user input could not be turned into a transaction.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The description was empty or only whitespace.
    #[error("description required")]
    EmptyDescription,

    /// The amount was not a number, or was zero or negative.
    #[error("amount must be positive")]
    NonPositiveAmount,

    /// No date was given.
    #[error("date required")]
    MissingDate,

    /// A date was given but it is not a calendar date in `YYYY-MM-DD` form.
    #[error("date must be a valid YYYY-MM-DD date")]
    InvalidDate,

    /// The transaction type was neither `Income` nor `Expense`.
    #[error("type must be Income or Expense")]
    UnknownKind,
}
