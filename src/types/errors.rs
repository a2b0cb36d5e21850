use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardNumberError {
    #[error("Card number error: value is not a number or a string")]
    Unsupported,
    #[error("Card number error: expected 14 or 16 characters, got {0}")]
    WrongLength(usize),
    #[error("Card number error: {0:?} is not an integer digit sequence")]
    NotAnInteger(String),
    #[error("Card number error: {0}")]
    ParseInt(#[from] ParseIntError)
}
