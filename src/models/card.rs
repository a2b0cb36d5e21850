use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::Record;

/// A stored bank card.
///
/// `card_number` keeps the scalar exactly as the client submitted it (JSON
/// number or string), because the stored file and the create response both echo
/// the payload back unchanged. Fields this application does not know about ride
/// along in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(rename = "cardNumber")]
    pub card_number: Value,
    /// Balance as a decimal string. Filled with `"0"` on append when the client
    /// omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>
}

impl CardRecord {
    /// The numeric identity used for duplicate detection.
    ///
    /// Comparison is numeric, so `"007"` and `7` coerce to the same key. A
    /// stored value that does not coerce has no identity and never collides,
    /// matching the NaN semantics of a dynamic runtime.
    pub fn identity(&self) -> Option<u128> {
        match &self.card_number {
            Value::Number(number) => number.as_u64().map(u128::from),
            Value::String(text) => text.trim().parse().ok(),
            _ => None
        }
    }
}

impl Record for CardRecord {
    fn conflicts_with(&self, other: &Self) -> bool {
        match (self.identity(), other.identity()) {
            (Some(mine), Some(theirs)) => mine == theirs,
            _ => false
        }
    }

    fn normalize(&mut self) {
        if self.balance.is_none() {
            self.balance = Some("0".to_string());
        }
    }
}
