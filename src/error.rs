use std::error;
use std::fmt;
use std::result;

/// Errors produced by the tree collections.
///
/// Every failing operation leaves the tree exactly as it was before the call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An element was absent on insertion, or a configuration value was malformed.
    InvalidArgument(String),
    /// Navigation reached an absent root, parent, or child.
    NotFound(&'static str),
    /// The operation is not permitted on this kind of tree.
    UnsupportedOperation(&'static str),
    /// A vertex handle was not produced by this tree, or its vertex is gone.
    ContractViolation(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
            Error::NotFound(what) => write!(f, "{} not found", what),
            Error::UnsupportedOperation(message) => write!(f, "unsupported operation: {}", message),
            Error::ContractViolation(message) => write!(f, "contract violation: {}", message),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
