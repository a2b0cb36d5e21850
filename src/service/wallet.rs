use std::path::Path;

use serde_json::Value;
use tracing::{error, warn};

use crate::models::{CardRecord, StoreError, TransactionRecord};
use crate::store::JsonFileStore;
use crate::types::SlotIndex;
use crate::validator;

/// Request-level operations over the card and transaction stores.
///
/// This is the collaborator an HTTP routing layer talks to. It never touches a
/// transport: every operation returns a value or a [`StoreError`], and the
/// caller maps the error kind to a status code via [`StoreError::status_code`].
/// Storage faults are logged here at error level, client mistakes at warn.
pub struct WalletService {
    cards: JsonFileStore<CardRecord>,
    transactions: JsonFileStore<TransactionRecord>
}

impl WalletService {
    /// Creates a service over `<data_dir>/cards.json` and
    /// `<data_dir>/transactions.json`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();

        Self {
            cards: JsonFileStore::new(data_dir.join("cards.json")),
            transactions: JsonFileStore::new(data_dir.join("transactions.json"))
        }
    }

    /// Seeds both backing files with empty sequences when they do not exist.
    pub async fn init(&self) -> Result<(), StoreError> {
        self.cards.init().await?;
        self.transactions.init().await.inspect_err(Self::log)
    }

    /// The full card sequence, null slots included.
    pub async fn list_cards(&self) -> Result<Vec<Option<CardRecord>>, StoreError> {
        self.cards.load_all().await.inspect_err(Self::log)
    }

    /// Validates a raw card payload and appends it to the card store.
    ///
    /// Returns the stored record, with the default balance filled in when the
    /// client omitted one.
    pub async fn create_card(&self, payload: Value) -> Result<CardRecord, StoreError> {
        self.create_card_inner(payload).await.inspect_err(Self::log)
    }

    /// Nulls out the card slot at `index`.
    pub async fn delete_card(&self, index: SlotIndex) -> Result<(), StoreError> {
        self.cards.mark_deleted(index).await.inspect_err(Self::log)
    }

    /// The live transactions recorded against the card at `card_index`.
    ///
    /// A card slot that is absent or already cleared is not-found, matching the
    /// behaviour of the card routes.
    pub async fn list_transactions(&self, card_index: SlotIndex) -> Result<Vec<TransactionRecord>, StoreError> {
        self.list_transactions_inner(card_index).await.inspect_err(Self::log)
    }

    /// Records a transaction against the card at `card_index`.
    ///
    /// The `cardId` is stamped from the index, so anything the client put there
    /// is overwritten; a missing timestamp is stamped on append.
    pub async fn create_transaction(&self, card_index: SlotIndex, payload: Value) -> Result<TransactionRecord, StoreError> {
        self.create_transaction_inner(card_index, payload).await.inspect_err(Self::log)
    }

    async fn create_card_inner(&self, payload: Value) -> Result<CardRecord, StoreError> {
        if !validator::validate(&payload) {
            return Err(StoreError::validation("card payload failed the number checks"));
        }

        let record: CardRecord = serde_json::from_value(payload).map_err(|error| {
            StoreError::validation(format!("card payload has an invalid shape: {error}"))
        })?;

        self.cards.append(record).await
    }

    async fn list_transactions_inner(&self, card_index: SlotIndex) -> Result<Vec<TransactionRecord>, StoreError> {
        self.require_live_card(card_index).await?;

        let transactions = self.transactions.load_all().await?;

        Ok(transactions
            .into_iter()
            .flatten()
            .filter(|transaction| transaction.card_id == card_index)
            .collect())
    }

    async fn create_transaction_inner(&self, card_index: SlotIndex, payload: Value) -> Result<TransactionRecord, StoreError> {
        self.require_live_card(card_index).await?;

        let mut record: TransactionRecord = serde_json::from_value(payload).map_err(|error| {
            StoreError::validation(format!("transaction payload has an invalid shape: {error}"))
        })?;

        if record.sum.is_sign_negative() {
            return Err(StoreError::validation("transaction sum must not be negative"));
        }

        record.card_id = card_index;

        self.transactions.append(record).await
    }

    async fn require_live_card(&self, card_index: SlotIndex) -> Result<(), StoreError> {
        let cards = self.cards.load_all().await?;

        match cards.get(card_index) {
            Some(Some(_)) => Ok(()),
            _ => Err(StoreError::not_found(card_index))
        }
    }

    fn log(failure: &StoreError) {
        if failure.is_fault() {
            error!("{failure}");
        } else {
            warn!("{failure}");
        }
    }
}
