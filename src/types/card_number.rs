use crate::types::errors::CardNumberError;
use serde_json::Value;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const SHORT_LENGTH: usize = 14;
const LONG_LENGTH: usize = 16;

/// A card number that has passed the shape checks: taken from a JSON number or
/// string, exactly 14 or 16 characters long, and consisting only of decimal
/// digits. The Luhn checksum is a separate, explicit question ([`Self::luhn_valid`]),
/// so callers can distinguish "malformed" from "fails the checksum".
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct CardNumber {
    digits: String,
    value: u128
}

impl CardNumber {
    /// Parses a card number out of a raw JSON value.
    ///
    /// The checks run in a fixed order: the value must be a number or a string,
    /// its string form must be exactly 14 or 16 characters, and every character
    /// must be a decimal digit (so no sign, no fraction, no separators).
    pub fn from_value(raw: &Value) -> Result<Self, CardNumberError> {
        match raw {
            Value::Number(number) => number.to_string().parse(),
            Value::String(text) => text.parse(),
            _ => Err(CardNumberError::Unsupported)
        }
    }

    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    pub fn as_u128(&self) -> u128 {
        self.value
    }

    /// Runs the Luhn checksum over the digits: every second digit from the
    /// right is doubled (minus 9 when the double exceeds 9), and the sum of all
    /// digit values must be a multiple of 10.
    pub fn luhn_valid(&self) -> bool {
        let mut sum = 0u32;

        for (position, byte) in self.digits.bytes().rev().enumerate() {
            let mut digit = u32::from(byte - b'0');

            if position % 2 == 1 {
                digit *= 2;

                if digit > 9 {
                    digit -= 9;
                }
            }

            sum += digit;
        }

        sum % 10 == 0
    }
}

impl Display for CardNumber {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.digits)
    }
}

impl FromStr for CardNumber {
    type Err = CardNumberError;

    fn from_str(form: &str) -> Result<Self, Self::Err> {
        let length = form.chars().count();

        if length != SHORT_LENGTH && length != LONG_LENGTH {
            return Err(CardNumberError::WrongLength(length));
        }

        if !form.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(CardNumberError::NotAnInteger(form.to_string()));
        }

        //NOTE: 16 decimal digits always fit a u128, so this parse only exists to
        //      turn the digit string into a comparable numeric value.
        let value: u128 = form.parse()?;

        Ok(Self {
            digits: form.to_string(),
            value
        })
    }
}
