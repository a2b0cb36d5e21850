use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::models::StoreError;
use crate::store::Record;
use crate::types::SlotIndex;

/// A sequence of records persisted as one JSON array in one file.
///
/// The file is the single source of truth: every operation is a full
/// read-mutate-write cycle and nothing is cached between calls. A record's
/// identity is its position in the array; deletion nulls the slot out instead
/// of removing it, so positions never shift and the sequence never shrinks.
///
/// Mutations take an async mutex for the whole cycle, so two in-process writers
/// cannot silently drop each other's updates. Reads stay lock-free, and a
/// writer in another process is still last-writer-wins. A crash in the middle
/// of the overwrite can corrupt the file; there is no recovery path for that.
pub struct JsonFileStore<R> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<R>
}

impl<R: Record> JsonFileStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seeds the backing file with an empty sequence unless it already exists.
    pub async fn init(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let exists = fs::try_exists(&self.path).await
            .map_err(|error| StoreError::read(&self.path, error))?;

        if exists {
            return Ok(());
        }

        self.persist(&[]).await
    }

    /// Reads the full sequence, null slots included.
    ///
    /// A missing file or content that is not a valid record array is a storage
    /// fault for the caller; there is no defensive fallback.
    pub async fn load_all(&self) -> Result<Vec<Option<R>>, StoreError> {
        let raw = fs::read(&self.path).await
            .map_err(|error| StoreError::read(&self.path, error))?;

        serde_json::from_slice(&raw).map_err(|error| StoreError::parse(&self.path, error))
    }

    /// Appends a record to the end of the sequence and persists it.
    ///
    /// Fails with a conflict when any live record clashes with the candidate
    /// under [`Record::conflicts_with`]; uniqueness is enforced here at insert
    /// time and nowhere else. The record is normalized before it is written,
    /// and the normalized form is what the caller gets back.
    pub async fn append(&self, mut record: R) -> Result<R, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_all().await?;

        let clash = records.iter().position(|slot| {
            slot.as_ref().is_some_and(|live| record.conflicts_with(live))
        });

        if let Some(index) = clash {
            return Err(StoreError::conflict(index));
        }

        record.normalize();
        records.push(Some(record.clone()));
        self.persist(&records).await?;

        debug!("Appended record at index [{}] to [{}]", records.len() - 1, self.path.display());

        Ok(record)
    }

    /// Nulls out the slot at `index` and persists the sequence.
    ///
    /// An index past the end or a slot that is already null reports not-found
    /// without touching the file.
    pub async fn mark_deleted(&self, index: SlotIndex) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load_all().await?;

        match records.get_mut(index) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => return Err(StoreError::not_found(index))
        }

        self.persist(&records).await?;

        debug!("Cleared slot [{index}] in [{}]", self.path.display());

        Ok(())
    }

    async fn persist(&self, records: &[Option<R>]) -> Result<(), StoreError> {
        let serialized = serde_json::to_vec(records)
            .map_err(|error| StoreError::write(&self.path, io::Error::other(error)))?;

        fs::write(&self.path, serialized).await
            .map_err(|error| StoreError::write(&self.path, error))
    }
}
