//! Projects the ledger into what the renderer displays: a filtered and sorted
//! list of rows, plus a summary of income and expenses.
//!
//! Everything here is a pure function of its inputs, so a projection can be
//! recomputed whenever the ledger or the selectors change.

use std::{cmp::Ordering, str::FromStr};

use crate::transaction::{Transaction, TransactionKind};

/// The text the renderer shows when a projection has no rows.
pub const EMPTY_STATE_MESSAGE: &str = "No transactions yet.";

/// Which transactions to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Show every transaction.
    #[default]
    All,
    /// Show only transactions of the given kind.
    Only(TransactionKind),
}

impl Filter {
    fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(kind) => transaction.kind == *kind,
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    /// Parse the value of the filter selector: `All`, `Income` or `Expense`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "All" => Ok(Filter::All),
            other => other
                .parse()
                .map(Filter::Only)
                .map_err(|_| format!("unknown filter \"{other}\"")),
        }
    }
}

/// The order to display transactions in.
///
/// Sorting is stable: transactions with equal keys keep their ledger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the ledger order.
    #[default]
    None,
    /// Oldest first.
    DateAscending,
    /// Newest first.
    DateDescending,
    /// Smallest amount first.
    AmountAscending,
    /// Largest amount first.
    AmountDescending,
}

impl SortOrder {
    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortOrder::None => Ordering::Equal,
            SortOrder::DateAscending => a.date.cmp(&b.date),
            SortOrder::DateDescending => b.date.cmp(&a.date),
            SortOrder::AmountAscending => a.amount.total_cmp(&b.amount),
            SortOrder::AmountDescending => b.amount.total_cmp(&a.amount),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    /// Parse the value of the sort selector, e.g. `date-desc` or `amount-asc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortOrder::None),
            "date-asc" => Ok(SortOrder::DateAscending),
            "date-desc" => Ok(SortOrder::DateDescending),
            "amount-asc" => Ok(SortOrder::AmountAscending),
            "amount-desc" => Ok(SortOrder::AmountDescending),
            other => Err(format!("unknown sort order \"{other}\"")),
        }
    }
}

/// Totals over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// The sum of all income amounts.
    pub income: f64,
    /// The sum of all expense amounts.
    pub expense: f64,
    /// Income minus expenses.
    pub balance: f64,
    /// The fraction of all money recorded that was income.
    ///
    /// 0 for an empty ledger, or when the totals are too large to represent.
    pub income_share: f64,
    /// The fraction of all money recorded that was spent.
    ///
    /// 0 for an empty ledger, or when the totals are too large to represent.
    pub expense_share: f64,
}

impl Summary {
    /// Whether more has been spent than earned.
    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0.0
    }

    /// The width of the income bar as a percentage.
    pub fn income_percent(&self) -> f64 {
        self.income_share * 100.0
    }

    /// The width of the expense bar as a percentage.
    pub fn expense_percent(&self) -> f64 {
        self.expense_share * 100.0
    }
}

/// The rows to display and the summary to show alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// The filtered and sorted transactions, each carrying the ID the renderer
    /// uses for edit and delete actions.
    pub rows: Vec<Transaction>,
    /// Totals over the whole ledger, regardless of the filter.
    pub summary: Summary,
}

impl Projection {
    /// Whether there are no rows to display, in which case the renderer shows
    /// [EMPTY_STATE_MESSAGE].
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Filter and sort `transactions` for display and summarize them.
///
/// The summary is always computed over all of `transactions`, so changing the
/// filter never changes the totals.
pub fn project(transactions: &[Transaction], filter: Filter, sort: SortOrder) -> Projection {
    let mut rows: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| filter.matches(transaction))
        .cloned()
        .collect();

    // `sort_by` is stable, which keeps ties in ledger order.
    if sort != SortOrder::None {
        rows.sort_by(|a, b| sort.compare(a, b));
    }

    Projection {
        rows,
        summary: summarize(transactions),
    }
}

/// Compute the income, expense and balance totals for `transactions`.
///
/// The shares are always finite: if the combined total is zero or overflows
/// to infinity, both shares are 0.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let (income, expense) =
        transactions
            .iter()
            .fold((0.0, 0.0), |(income, expense), transaction| {
                match transaction.kind {
                    TransactionKind::Income => (income + transaction.amount, expense),
                    TransactionKind::Expense => (income, expense + transaction.amount),
                }
            });

    let total = income + expense;
    let share = |amount: f64| {
        if total == 0.0 || !total.is_finite() {
            0.0
        } else {
            amount / total
        }
    };

    Summary {
        income,
        expense,
        balance: income - expense,
        income_share: share(income),
        expense_share: share(expense),
    }
}
