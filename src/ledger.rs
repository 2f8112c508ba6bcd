//! The ledger store: the single owner of every recorded transaction.

use time::OffsetDateTime;

use crate::{
    Error,
    persistence::{BlobStore, PersistenceAdapter},
    transaction::{Transaction, TransactionFields, TransactionId},
};

/// The authoritative set of transactions.
///
/// Every successful mutation is immediately followed by saving the whole
/// ledger through the [PersistenceAdapter]. If that save fails the mutation is
/// undone, so the in-memory ledger never runs ahead of what was persisted.
///
/// Records are kept in insertion order, but callers should not rely on it;
/// use [crate::project] to get a display order.
#[derive(Debug)]
pub struct Ledger<B> {
    transactions: Vec<Transaction>,
    persistence: PersistenceAdapter<B>,
    last_id: TransactionId,
}

impl<B: BlobStore> Ledger<B> {
    /// Create an empty ledger that saves through `persistence`.
    ///
    /// Nothing is read from the blob store, use [Ledger::open] to start from
    /// previously saved data.
    pub fn new(persistence: PersistenceAdapter<B>) -> Self {
        Self {
            transactions: Vec::new(),
            persistence,
            last_id: 0,
        }
    }

    /// Create a ledger populated from whatever `persistence` has saved.
    ///
    /// # Errors
    /// Returns [Error::Persistence] if the blob store cannot be read or holds
    /// a corrupt ledger. A missing or empty blob gives an empty ledger.
    pub fn open(persistence: PersistenceAdapter<B>) -> Result<Self, Error> {
        let records = persistence.load()?;
        let mut ledger = Self::new(persistence);
        ledger.load(records);

        Ok(ledger)
    }

    /// Replace the entire contents of the ledger with `records`.
    ///
    /// The records are trusted as-is since they came from persisted data.
    /// `None` leaves the ledger empty. Nothing is written back to the blob store.
    pub fn load(&mut self, records: Option<Vec<Transaction>>) {
        self.transactions = records.unwrap_or_default();
        self.last_id = self
            .transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or(0)
            .max(self.last_id);

        tracing::info!("loaded {} transactions", self.transactions.len());
    }

    /// Record a new transaction and return its ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Validation] if the description is blank or the amount is not positive,
    /// - or [Error::IdsExhausted] if the ledger already holds the largest possible ID,
    /// - or [Error::Persistence] if the ledger could not be saved, in which case
    ///   the transaction is not added.
    pub fn create(&mut self, fields: TransactionFields) -> Result<TransactionId, Error> {
        fields.validate()?;

        let id = self.next_id()?;
        self.transactions.push(fields.into_transaction(id));

        if let Err(error) = self.persist() {
            self.transactions.pop();
            return Err(error);
        }

        tracing::debug!("created transaction {id}");
        Ok(id)
    }

    /// Replace every field of the transaction `id` except the ID itself.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction in the ledger,
    /// - or [Error::Validation] if the new fields are invalid,
    /// - or [Error::Persistence] if the ledger could not be saved, in which case
    ///   the transaction keeps its previous fields.
    pub fn update(&mut self, id: TransactionId, fields: TransactionFields) -> Result<(), Error> {
        let index = self.position(id)?;
        fields.validate()?;

        let previous =
            std::mem::replace(&mut self.transactions[index], fields.into_transaction(id));

        if let Err(error) = self.persist() {
            self.transactions[index] = previous;
            return Err(error);
        }

        tracing::debug!("updated transaction {id}");
        Ok(())
    }

    /// Remove the transaction `id` from the ledger and return it.
    ///
    /// This does not ask for confirmation, the caller is expected to have
    /// done that before calling.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a transaction in the ledger,
    /// - or [Error::Persistence] if the ledger could not be saved, in which case
    ///   the transaction is kept.
    pub fn delete(&mut self, id: TransactionId) -> Result<Transaction, Error> {
        let index = self.position(id)?;
        let removed = self.transactions.remove(index);

        if let Err(error) = self.persist() {
            self.transactions.insert(index, removed);
            return Err(error);
        }

        tracing::debug!("deleted transaction {id}");
        Ok(removed)
    }

    /// A copy of every transaction in the ledger.
    pub fn list(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// A read-only view of every transaction in the ledger.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// A copy of the transaction `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a transaction in the ledger.
    pub fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let index = self.position(id)?;

        Ok(self.transactions[index].clone())
    }

    /// The number of transactions in the ledger.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The adapter the ledger saves through.
    pub fn persistence(&self) -> &PersistenceAdapter<B> {
        &self.persistence
    }

    fn position(&self, id: TransactionId) -> Result<usize, Error> {
        self.transactions
            .iter()
            .position(|transaction| transaction.id == id)
            .ok_or_else(|| {
                tracing::warn!("transaction {id} is not in the ledger");
                Error::NotFound(id)
            })
    }

    fn persist(&mut self) -> Result<(), Error> {
        self.persistence.save(&self.transactions)?;
        Ok(())
    }

    /// IDs are millisecond timestamps, bumped past the last issued ID so they
    /// stay unique even if the clock repeats or runs backwards.
    fn next_id(&mut self) -> Result<TransactionId, Error> {
        let now = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as TransactionId;
        let next = self.last_id.checked_add(1).ok_or_else(|| {
            tracing::error!("cannot issue an ID after {}", self.last_id);
            Error::IdsExhausted
        })?;
        let id = now.max(next);
        self.last_id = id;

        Ok(id)
    }
}
