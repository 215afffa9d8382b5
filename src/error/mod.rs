//! Error types for the codec library.

use thiserror::Error;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors returned by the two top-level codec operations and the wire
/// plumbing around them. There is no internal retry and no silent fallback
/// to a different transform; callers decide what to surface.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A required input buffer is missing or empty.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// Width or height is zero, or buffer sizes disagree with the stated
    /// dimensions (mismatched coefficient arrays fall under this too).
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// The platform refused memory for a scratch buffer or output array.
    #[error("allocation of {0} bytes failed")]
    AllocationFailed(usize),

    /// A transform tag outside the enumerated set.
    #[error("invalid transform tag: {0}")]
    InvalidTransform(u8),

    /// Parameter validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error from the wire format.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_descriptive() {
        let e = CodecError::InvalidDimensions("0x12".into());
        assert!(e.to_string().contains("invalid dimensions"));
        let e = CodecError::InvalidTransform(9);
        assert!(e.to_string().contains('9'));
        let e = CodecError::AllocationFailed(4096);
        assert!(e.to_string().contains("4096"));
    }
}
