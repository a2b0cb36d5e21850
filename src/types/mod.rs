mod card_number;
mod errors;

pub use card_number::CardNumber;
pub use errors::CardNumberError;

pub type SlotIndex = usize;
