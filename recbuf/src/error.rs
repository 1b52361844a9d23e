#[cfg(test)]
#[path = "../tests/error.rs"]
mod tests;

use std::io;

use thiserror::Error;

/// Result type alias for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Error types for buffer window and stream operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Window bounds were inverted after negative index normalization.
    #[error("invalid buffer range: {to} < {from}")]
    InvalidRange { from: usize, to: usize },

    /// Single byte write attempted with no room left in the backing region.
    #[error("buffer full ({capacity} bytes)")]
    BufferFull { capacity: usize },

    /// Read attempted on an empty window.
    #[error("end of stream")]
    EndOfStream,

    /// Source ended (or failed) before the requested amount was read.
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        expected: usize,
        actual: usize,
        #[source]
        source: Option<io::Error>,
    },

    /// Underlying source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BufferError {
    /// Check if the caller may continue using the buffer after this error.
    /// Everything but an inverted range (a caller bug) is recoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, BufferError::InvalidRange { .. })
    }

    #[inline]
    pub(crate) fn short_read(expected: usize, actual: usize, source: Option<io::Error>) -> Self {
        Self::ShortRead {
            expected,
            actual,
            source,
        }
    }
}

impl From<BufferError> for io::Error {
    fn from(value: BufferError) -> Self {
        let kind = match value {
            BufferError::Io(source) => return source,
            BufferError::InvalidRange { .. } => io::ErrorKind::InvalidInput,
            BufferError::BufferFull { .. } => io::ErrorKind::WriteZero,
            BufferError::EndOfStream | BufferError::ShortRead { .. } => io::ErrorKind::UnexpectedEof,
        };
        io::Error::new(kind, value)
    }
}
