use crate::types::SlotIndex;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Every failure the validator, store, and service can produce.
///
/// The routing layer in front of this crate translates kinds to status codes via
/// [`StoreError::status_code`]; nothing in here ever touches a transport.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {reason}")]
    Validation {
        reason: String
    },
    #[error("Conflict error: a live record at index [{index}] already carries this card number")]
    Conflict {
        index: SlotIndex
    },
    #[error("Not found: no live record at index [{index}]")]
    NotFound {
        index: SlotIndex
    },
    #[error("Storage error: could not read [{path}]: {source}")]
    StorageRead {
        path: String,
        #[source]
        source: io::Error
    },
    #[error("Storage error: [{path}] does not hold a valid record sequence: {source}")]
    StorageParse {
        path: String,
        #[source]
        source: serde_json::Error
    },
    #[error("Storage error: could not write [{path}]: {source}")]
    StorageWrite {
        path: String,
        #[source]
        source: io::Error
    }
}

impl StoreError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation { reason: reason.into() }
    }

    pub fn conflict(index: SlotIndex) -> Self {
        Self::Conflict { index }
    }

    pub fn not_found(index: SlotIndex) -> Self {
        Self::NotFound { index }
    }

    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::StorageRead {
            path: path.display().to_string(),
            source
        }
    }

    pub fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::StorageParse {
            path: path.display().to_string(),
            source
        }
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::StorageWrite {
            path: path.display().to_string(),
            source
        }
    }

    /// The status class an HTTP front end maps this kind to.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } | Self::Conflict { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::StorageRead { .. } | Self::StorageParse { .. } | Self::StorageWrite { .. } => 500
        }
    }

    /// Storage trouble is an application fault; everything else is the client's.
    pub fn is_fault(&self) -> bool {
        self.status_code() == 500
    }
}
