//! Configuration shared by the ledger and its persistence adapter.

/// The key the browser version of the app stored its ledger under.
const DEFAULT_STORAGE_KEY: &str = "transactions";

/// The config for a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// The blob store key that the whole ledger is saved under.
    pub storage_key: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
        }
    }
}
