use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::TransactionType;
use crate::store::Record;
use crate::types::SlotIndex;

/// A money movement recorded against one card.
///
/// `card_id` is the positional index of the owning card in the card store; the
/// service stamps it from the request path, so a value submitted by the client
/// is overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "cardId", default)]
    pub card_id: SlotIndex,
    /// What kind of movement this is (top-up, card-to-card, mobile payment).
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Free-form counterparty data: a phone number, the target card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub sum: Decimal,
    /// Stamped with the current time on append when the client omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>
}

impl Record for TransactionRecord {
    fn normalize(&mut self) {
        if self.time.is_none() {
            self.time = Some(Utc::now());
        }
    }
}
