//! Error types for URL normalization.

use thiserror::Error;

/// Errors returned by [`crate::normalize`].
///
/// Malformed URLs never produce an error; they degrade to absent or
/// passed-through components. The only failure is a caller asking for a
/// component that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The component selector is outside the known set.
    #[error("Invalid component selector: {0}")]
    InvalidArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            NormalizeError::InvalidArgument("42".to_string()).to_string(),
            "Invalid component selector: 42"
        );
    }
}
