use thiserror::Error;

/// Errors that can occur when operating on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// Positional access outside the valid range for the operation.
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot find min/max of an empty list")]
    Empty,
}

/// Errors raised while reading patient records from a text source.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read patient records: {0}")]
    Io(#[from] std::io::Error),
}
