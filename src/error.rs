/// Errors raised by [`ProbingHashTable`](crate::ProbingHashTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A required argument was absent; names the argument
    InvalidArgument(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(arg) => write!(f, "ProbingTableError: invalid argument: {arg} is absent"),
        }
    }
}

impl std::error::Error for Error {}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
