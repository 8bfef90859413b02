use core::fmt;

/// Failures reported by the fixed-width integer operations.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[non_exhaustive]
pub enum Error {
    /// A hex string or byte slice has a length the fixed width cannot accept.
    InvalidLength,

    /// A character outside `[0-9a-fA-F]` was encountered.
    InvalidDigit,

    /// An output buffer cannot hold the full fixed-width rendering.
    BufferTooSmall,

    /// Division or modulo by zero.
    DivisionByZero,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Error::InvalidLength => "length not supported for this width",
                Error::InvalidDigit => "input contains an invalid hex digit",
                Error::BufferTooSmall => "output cannot hold the full width",
                Error::DivisionByZero => "division by zero",
            }
        )
    }
}

impl std::error::Error for Error {}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        match e {
            hex::FromHexError::InvalidHexCharacter { .. } => Error::InvalidDigit,
            hex::FromHexError::OddLength => Error::InvalidLength,
            hex::FromHexError::InvalidStringLength => Error::InvalidLength,
        }
    }
}
