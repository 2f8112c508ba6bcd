//! The transaction form: turns raw user input into ledger mutations.
//!
//! The controller only tracks whether the form is creating a new transaction
//! or editing an existing one. Filling in and clearing the input widgets is
//! left to the renderer.

use time::{Date, macros::format_description};

use crate::{
    Error, ValidationError,
    ledger::Ledger,
    persistence::BlobStore,
    transaction::{TransactionFields, TransactionId, TransactionKind},
};

/// What a submit will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Submitting records a new transaction.
    #[default]
    Creating,
    /// Submitting overwrites the transaction with this ID.
    Editing(TransactionId),
}

/// The mutation a successful submit made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new transaction was recorded with this ID.
    Created(TransactionId),
    /// The transaction with this ID was updated.
    Updated(TransactionId),
}

/// Tracks the create/edit state of the transaction form.
#[derive(Debug, Default)]
pub struct FormController {
    mode: FormMode,
}

impl FormController {
    /// Create a controller in the [FormMode::Creating] state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state of the form.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The label for the submit button in the current state.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Creating => "Add",
            FormMode::Editing(_) => "Update",
        }
    }

    /// Switch to editing the transaction `id` and return a copy of its fields
    /// for the renderer to prefill the inputs with.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` is not in `ledger`, in which case the
    /// state is unchanged.
    pub fn begin_edit<B: BlobStore>(
        &mut self,
        ledger: &Ledger<B>,
        id: TransactionId,
    ) -> Result<TransactionFields, Error> {
        let transaction = ledger.get(id)?;
        self.mode = FormMode::Editing(id);

        Ok(TransactionFields::from(&transaction))
    }

    /// Abandon any edit in progress and go back to creating transactions.
    pub fn cancel(&mut self) {
        self.mode = FormMode::Creating;
    }

    /// Validate the raw form input and apply it to `ledger`.
    ///
    /// In the creating state this records a new transaction, in the editing
    /// state it updates the transaction being edited. After either succeeds the
    /// form goes back to the creating state.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the input is invalid,
    /// - or [Error::NotFound] if the transaction being edited no longer exists,
    /// - or [Error::IdsExhausted] if no new transaction ID can be issued,
    /// - or [Error::Persistence] if the ledger could not be saved.
    ///
    /// On any error the ledger and the form state are left unchanged.
    pub fn submit<B: BlobStore>(
        &mut self,
        ledger: &mut Ledger<B>,
        raw_description: &str,
        raw_amount: &str,
        raw_kind: &str,
        raw_date: &str,
    ) -> Result<SubmitOutcome, Error> {
        let fields = parse_form(raw_description, raw_amount, raw_kind, raw_date).inspect_err(
            |error| tracing::debug!("rejected transaction form: {error}"),
        )?;

        let outcome = match self.mode {
            FormMode::Creating => SubmitOutcome::Created(ledger.create(fields)?),
            FormMode::Editing(id) => {
                ledger.update(id, fields)?;
                SubmitOutcome::Updated(id)
            }
        };

        self.mode = FormMode::Creating;
        Ok(outcome)
    }
}

/// Parse and validate the raw form input, checking the description, then the
/// amount, then the date, then the type.
fn parse_form(
    raw_description: &str,
    raw_amount: &str,
    raw_kind: &str,
    raw_date: &str,
) -> Result<TransactionFields, ValidationError> {
    let description = raw_description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    let amount = match raw_amount.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
        _ => return Err(ValidationError::NonPositiveAmount),
    };

    let date = parse_date(raw_date)?;
    let kind: TransactionKind = raw_kind.parse()?;

    Ok(TransactionFields::new(description, amount, kind, date))
}

fn parse_date(raw_date: &str) -> Result<Date, ValidationError> {
    let raw_date = raw_date.trim();
    if raw_date.is_empty() {
        return Err(ValidationError::MissingDate);
    }

    Date::parse(raw_date, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::InvalidDate)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{FormController, FormMode, SubmitOutcome, parse_form};
    use crate::{
        Error, Ledger, LedgerConfig, MemoryBlobStore, PersistenceAdapter, TransactionFields,
        TransactionKind, ValidationError,
    };

    fn get_test_ledger() -> Ledger<MemoryBlobStore> {
        Ledger::new(PersistenceAdapter::new(
            MemoryBlobStore::new(),
            &LedgerConfig::default(),
        ))
    }

    #[test]
    fn parse_form_trims_description() {
        let fields = parse_form("  Groceries ", "52.30", "Expense", "2024-02-10").unwrap();

        assert_eq!(
            fields,
            TransactionFields::new(
                "Groceries",
                52.3,
                TransactionKind::Expense,
                date!(2024 - 02 - 10)
            )
        );
    }

    #[test]
    fn parse_form_reports_each_problem() {
        let cases = [
            (("   ", "10", "Income", "2024-01-01"), ValidationError::EmptyDescription),
            (("Pay", "", "Income", "2024-01-01"), ValidationError::NonPositiveAmount),
            (("Pay", "abc", "Income", "2024-01-01"), ValidationError::NonPositiveAmount),
            (("Pay", "0", "Income", "2024-01-01"), ValidationError::NonPositiveAmount),
            (("Pay", "-5", "Income", "2024-01-01"), ValidationError::NonPositiveAmount),
            (("Pay", "NaN", "Income", "2024-01-01"), ValidationError::NonPositiveAmount),
            (("Pay", "10", "Income", ""), ValidationError::MissingDate),
            (("Pay", "10", "Income", "01/02/2024"), ValidationError::InvalidDate),
            (("Pay", "10", "Income", "2024-02-30"), ValidationError::InvalidDate),
            (("Pay", "10", "Gift", "2024-01-01"), ValidationError::UnknownKind),
        ];

        for ((description, amount, kind, date), want) in cases {
            let got = parse_form(description, amount, kind, date);
            assert_eq!(
                got,
                Err(want),
                "want {want:?} for input {description:?}, {amount:?}, {kind:?}, {date:?}"
            );
        }
    }

    #[test]
    fn description_is_checked_before_amount_and_date() {
        let got = parse_form("", "-1", "Income", "");

        assert_eq!(got, Err(ValidationError::EmptyDescription));
    }

    #[test]
    fn validation_messages() {
        assert_eq!(
            ValidationError::EmptyDescription.to_string(),
            "description required"
        );
        assert_eq!(
            ValidationError::NonPositiveAmount.to_string(),
            "amount must be positive"
        );
        assert_eq!(ValidationError::MissingDate.to_string(), "date required");
    }

    #[test]
    fn submit_in_creating_state_creates() {
        let mut ledger = get_test_ledger();
        let mut form = FormController::new();

        let outcome = form
            .submit(&mut ledger, "Salary", "1000", "Income", "2024-01-01")
            .unwrap();

        let SubmitOutcome::Created(id) = outcome else {
            panic!("want created outcome, got {outcome:?}");
        };
        assert_eq!(ledger.get(id).unwrap().description, "Salary");
        assert_eq!(form.mode(), FormMode::Creating);
        assert_eq!(form.submit_label(), "Add");
    }

    #[test]
    fn begin_edit_returns_fields_and_switches_state() {
        let mut ledger = get_test_ledger();
        let mut form = FormController::new();
        let fields =
            TransactionFields::new("Rent", 400.0, TransactionKind::Expense, date!(2024 - 01 - 02));
        let id = ledger.create(fields.clone()).unwrap();

        let prefill = form.begin_edit(&ledger, id).unwrap();

        assert_eq!(prefill, fields);
        assert_eq!(form.mode(), FormMode::Editing(id));
        assert_eq!(form.submit_label(), "Update");
    }

    #[test]
    fn begin_edit_missing_id_keeps_state() {
        let ledger = get_test_ledger();
        let mut form = FormController::new();

        let result = form.begin_edit(&ledger, 99);

        assert_eq!(result, Err(Error::NotFound(99)));
        assert_eq!(form.mode(), FormMode::Creating);
    }

    #[test]
    fn submit_in_editing_state_updates_and_resets() {
        let mut ledger = get_test_ledger();
        let mut form = FormController::new();
        let id = form
            .submit(&mut ledger, "Rent", "400", "Expense", "2024-01-02")
            .map(|outcome| match outcome {
                SubmitOutcome::Created(id) => id,
                SubmitOutcome::Updated(id) => panic!("unexpected update of {id}"),
            })
            .unwrap();
        form.begin_edit(&ledger, id).unwrap();

        let outcome = form
            .submit(&mut ledger, "Rent (March)", "420", "Expense", "2024-03-01")
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Updated(id));
        assert_eq!(ledger.len(), 1);
        let transaction = ledger.get(id).unwrap();
        assert_eq!(transaction.description, "Rent (March)");
        assert_eq!(transaction.amount, 420.0);
        assert_eq!(transaction.date, date!(2024 - 03 - 01));
        assert_eq!(form.mode(), FormMode::Creating);
    }

    #[test]
    fn invalid_submit_keeps_editing_state() {
        let mut ledger = get_test_ledger();
        let mut form = FormController::new();
        let id = ledger
            .create(TransactionFields::new(
                "Rent",
                400.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 02),
            ))
            .unwrap();
        form.begin_edit(&ledger, id).unwrap();
        let before = ledger.list();

        let result = form.submit(&mut ledger, "", "400", "Expense", "2024-01-02");

        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::EmptyDescription))
        );
        assert_eq!(form.mode(), FormMode::Editing(id));
        assert_eq!(ledger.list(), before);
    }

    #[test]
    fn cancel_returns_to_creating() {
        let mut ledger = get_test_ledger();
        let mut form = FormController::new();
        let id = ledger
            .create(TransactionFields::new(
                "Rent",
                400.0,
                TransactionKind::Expense,
                date!(2024 - 01 - 02),
            ))
            .unwrap();
        form.begin_edit(&ledger, id).unwrap();

        form.cancel();

        assert_eq!(form.mode(), FormMode::Creating);
    }
}
