use std::error;
use std::fmt;
use std::result;

/// Errors reported by the tree engine and the container adapters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A lookup that requires the key to be present did not find it.
    OutOfRange,
    /// A position did not refer to a live node in the tree, such as the end position.
    InvalidPosition,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange => write!(f, "key does not exist"),
            Error::InvalidPosition => write!(f, "position does not refer to an element"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
