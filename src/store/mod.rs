mod file_store;
#[cfg(test)]
mod tests;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use file_store::JsonFileStore;

/// Behaviour a record type plugs into the flat-file store.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Whether appending `self` while the live record `other` exists would
    /// break identity uniqueness. Record types without a uniqueness rule keep
    /// the default.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }

    /// Fills in defaults right before the record is persisted.
    fn normalize(&mut self) {}
}
