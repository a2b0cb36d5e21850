mod card;
mod errors;
mod transaction;

use serde::{Deserialize, Serialize};

pub use card::CardRecord;
pub use errors::StoreError;
pub use transaction::TransactionRecord;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    PrepaidCard,
    Card2Card,
    PaymentMobile
}
