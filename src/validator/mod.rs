
use serde_json::Value;

use crate::types::CardNumber;

/// Decides whether a submitted payload is a well-formed card.
///
/// The payload must be a JSON object carrying a `cardNumber` whose string form
/// is 14 or 16 digits and whose digits pass the Luhn checksum. This is a total
/// function: any malformed input, whatever its shape, is simply `false`.
pub fn validate(payload: &Value) -> bool {
    let Some(object) = payload.as_object() else {
        return false;
    };

    let Some(raw) = object.get("cardNumber") else {
        return false;
    };

    match CardNumber::from_value(raw) {
        Ok(number) => number.luhn_valid(),
        Err(_) => false
    }
}
