use thiserror::Error;

/// Error types for `ByteBuffer` and `Range` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ByteBufferError {
    /// Range bounds are inverted or empty
    #[error("Invalid range: upper bound {upper} must be greater than lower bound {lower}")]
    InvalidRange {
        /// Requested lower bound
        lower: usize,
        /// Requested upper bound
        upper: usize,
    },
    /// Capacity ceiling must be positive
    #[error("Invalid capacity: {value} (the ceiling must be greater than zero)")]
    InvalidCapacity {
        /// Requested ceiling
        value: usize,
    },
    /// Index is beyond the occupied region
    #[error("Index out of bounds: index {index} is beyond buffer length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the buffer
        length: usize,
    },
    /// Range reaches beyond the occupied region
    #[error("Range out of bounds: upper bound {upper} is beyond buffer length {length}")]
    RangeOutOfBounds {
        /// Upper bound of the offending range
        upper: usize,
        /// Current length of the buffer
        length: usize,
    },
    /// A bounded buffer has no room for the requested write
    #[error("Capacity exceeded: requested {requested} bytes, but only {available} bytes available")]
    CapacityExceeded {
        /// Number of bytes requested
        requested: usize,
        /// Number of bytes that still fit under the ceiling
        available: usize,
    },
    /// Reading or writing the backing stream failed
    #[error("IO error: {kind:?} (while {context})")]
    Io {
        /// The kind of IO error that occurred
        kind: embedded_io::ErrorKind,
        /// Description of what operation was being performed
        context: &'static str,
    },
    /// `save()` was called on a buffer that was never bound to a file
    #[error("No source path: the buffer was not loaded from a file, use `save_to_path` instead")]
    NoSourcePath,
}

impl ByteBufferError {
    pub(crate) fn from_io<E: embedded_io::Error>(error: &E, context: &'static str) -> Self {
        ByteBufferError::Io {
            kind: error.kind(),
            context,
        }
    }
}

pub type Result<T> = core::result::Result<T, ByteBufferError>;
