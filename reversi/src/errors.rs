/// The error type for [`Board::from_state_code()`](crate::Board::from_state_code).
#[derive(Debug, PartialEq, Eq)]
pub enum ParseStateCodeError {
    WrongLength { expected: usize, found: usize },
    MissingSeparator,
    InvalidDigit { position: usize, digit: char },
    InvalidCell { cell: usize, value: u8 },
}

impl std::error::Error for ParseStateCodeError {}

impl std::fmt::Display for ParseStateCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseStateCodeError::WrongLength { expected, found } => write!(
                f,
                "A position code has {} characters, but this one has {}",
                expected, found
            ),
            ParseStateCodeError::MissingSeparator => {
                write!(f, "The two halves of the position code must be separated by '-'")
            }
            ParseStateCodeError::InvalidDigit { position, digit } => write!(
                f,
                "Character {} of the position code, '{}', is not a hex digit",
                position, digit
            ),
            ParseStateCodeError::InvalidCell { cell, value } => write!(
                f,
                "Cell {} of the position code has the value {}, but only 0, 1 and 2 are valid",
                cell, value
            ),
        }
    }
}
