// Error types for the log-mel front-end
//
// This module defines the error type for the checked extraction paths,
// with numeric error codes suitable for forwarding across a host binding.

mod extraction;

pub use extraction::{log_extraction_error, ExtractionError, ExtractionErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the binding boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_trait() {
        let err: &dyn ErrorCode = &ExtractionError::NonFiniteSample { index: 0 };
        assert_eq!(err.code(), ExtractionErrorCodes::NON_FINITE_SAMPLE);
    }

    #[test]
    fn test_error_propagation() {
        fn may_fail() -> Result<(), ExtractionError> {
            Err(ExtractionError::NonFiniteSample { index: 2 })
        }

        fn caller() -> Result<(), ExtractionError> {
            may_fail()?;
            Ok(())
        }

        assert!(caller().is_err());
    }
}
