pub mod enums;
pub mod patient;
pub mod reminder;

pub use enums::*;
pub use patient::*;
pub use reminder::*;

use thiserror::Error;

/// A string did not name any variant of a model enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid enum value for {field}: {value}")]
pub struct ParseEnumError {
    pub field: &'static str,
    pub value: String,
}
