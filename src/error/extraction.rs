// Extraction error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Extraction error code constants
///
/// Single source of truth for the numeric codes a host binding forwards
/// alongside the error message.
///
/// Error code range: 3001-3005
pub struct ExtractionErrorCodes {}

impl ExtractionErrorCodes {
    /// Waveform contains a NaN or infinite sample
    pub const NON_FINITE_SAMPLE: i32 = 3001;

    /// Nested spectrogram rows have differing lengths
    pub const RAGGED_FRAME: i32 = 3002;

    /// Two spectrograms do not share the same (frames, bands) shape
    pub const SHAPE_MISMATCH: i32 = 3003;

    /// Front-end manifest disagrees with the compiled-in parameters
    pub const INCOMPATIBLE_CONFIG: i32 = 3004;

    /// Reference spectrogram could not be read or parsed
    pub const REFERENCE_UNAVAILABLE: i32 = 3005;
}

/// Log an extraction error with structured context
///
/// Fields logged:
/// - error_code: Numeric error code for programmatic handling
/// - component: Always FeatureExtractor
/// - message: Human-readable error message
/// - context: Caller-supplied location
pub fn log_extraction_error(err: &ExtractionError, context: &str) {
    error!(
        "Extraction error in {}: code={}, component=FeatureExtractor, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by the checked entry points around the log-mel pipeline
///
/// `FeatureExtractor::extract` itself never fails; these cover input
/// validation, spectrogram reshaping, and interop verification.
///
/// Error code range: 3001-3005
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// First NaN/Inf sample found in the waveform
    NonFiniteSample { index: usize },

    /// Row `frame` of a nested spectrogram has the wrong band count
    RaggedFrame {
        frame: usize,
        expected: usize,
        found: usize,
    },

    /// Shapes are (frames, bands)
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Manifest field differs from the compiled constant
    IncompatibleConfig {
        field: String,
        expected: String,
        found: String,
    },

    /// Reference spectrogram could not be loaded
    ReferenceUnavailable { reason: String },
}

impl ErrorCode for ExtractionError {
    fn code(&self) -> i32 {
        match self {
            ExtractionError::NonFiniteSample { .. } => ExtractionErrorCodes::NON_FINITE_SAMPLE,
            ExtractionError::RaggedFrame { .. } => ExtractionErrorCodes::RAGGED_FRAME,
            ExtractionError::ShapeMismatch { .. } => ExtractionErrorCodes::SHAPE_MISMATCH,
            ExtractionError::IncompatibleConfig { .. } => {
                ExtractionErrorCodes::INCOMPATIBLE_CONFIG
            }
            ExtractionError::ReferenceUnavailable { .. } => {
                ExtractionErrorCodes::REFERENCE_UNAVAILABLE
            }
        }
    }

    fn message(&self) -> String {
        match self {
            ExtractionError::NonFiniteSample { index } => {
                format!("Waveform sample {} is NaN or infinite", index)
            }
            ExtractionError::RaggedFrame {
                frame,
                expected,
                found,
            } => {
                format!(
                    "Frame {} has {} values, expected {}",
                    frame, found, expected
                )
            }
            ExtractionError::ShapeMismatch { expected, found } => {
                format!(
                    "Shape mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, found.0, found.1
                )
            }
            ExtractionError::IncompatibleConfig {
                field,
                expected,
                found,
            } => {
                format!(
                    "Incompatible front-end config: {} must be {} (got {})",
                    field, expected, found
                )
            }
            ExtractionError::ReferenceUnavailable { reason } => {
                format!("Reference spectrogram unavailable: {}", reason)
            }
        }
    }
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExtractionError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ExtractionError {}

/// Convert from std::io::Error to ExtractionError
impl From<std::io::Error> for ExtractionError {
    fn from(err: std::io::Error) -> Self {
        ExtractionError::ReferenceUnavailable {
            reason: err.to_string(),
        }
    }
}
