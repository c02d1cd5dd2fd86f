//! Interop verification against a reference spectrogram.
//!
//! A reference implementation dumps its log-mel output as a JSON nested
//! array (frames x bands). This module loads such dumps and reports how far
//! the native output deviates from them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::features::LogMelSpectrogram;
use crate::error::{log_extraction_error, ExtractionError};

/// Absolute tolerance the reference harness accepts per value
pub const DEFAULT_TOLERANCE: f32 = 1e-4;

/// Outcome of comparing two equally shaped spectrograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub frames: usize,
    pub n_mels: usize,
    pub max_abs_diff: f32,
    pub mean_abs_diff: f32,
    pub mse: f32,
    pub tolerance: f32,
    pub within_tolerance: bool,
}

/// Compare `actual` against `expected` value by value
///
/// Returns `RaggedFrame` when either side holds a partial frame and
/// `ShapeMismatch` when the (frames, bands) shapes differ. Differences are
/// accumulated in f64; two empty spectrograms compare as identical.
pub fn compare(
    actual: &LogMelSpectrogram,
    expected: &LogMelSpectrogram,
    tolerance: f32,
) -> Result<ComparisonReport, ExtractionError> {
    for side in [actual, expected] {
        if let Err(err) = side.check_layout() {
            log_extraction_error(&err, "interop::compare");
            return Err(err);
        }
    }

    if actual.shape() != expected.shape() {
        let err = ExtractionError::ShapeMismatch {
            expected: expected.shape(),
            found: actual.shape(),
        };
        log_extraction_error(&err, "interop::compare");
        return Err(err);
    }

    let count = actual.data.len();
    let mut max_abs = 0.0f64;
    let mut sum_abs = 0.0f64;
    let mut sum_sq = 0.0f64;

    for (&a, &e) in actual.data.iter().zip(&expected.data) {
        let diff = (a as f64 - e as f64).abs();
        // NaN never compares greater, so track it explicitly
        if diff > max_abs || diff.is_nan() {
            max_abs = diff;
        }
        sum_abs += diff;
        sum_sq += diff * diff;
    }

    let (mean_abs, mse) = if count == 0 {
        (0.0, 0.0)
    } else {
        (sum_abs / count as f64, sum_sq / count as f64)
    };

    let report = ComparisonReport {
        frames: actual.num_frames(),
        n_mels: actual.n_mels,
        max_abs_diff: max_abs as f32,
        mean_abs_diff: mean_abs as f32,
        mse: mse as f32,
        tolerance,
        within_tolerance: max_abs <= tolerance as f64,
    };

    tracing::info!(
        frames = report.frames,
        max_abs_diff = report.max_abs_diff,
        mse = report.mse,
        within_tolerance = report.within_tolerance,
        "interop comparison finished"
    );

    Ok(report)
}

/// Load a reference spectrogram dumped as a JSON nested array
///
/// Read and parse failures carry an `ExtractionError::ReferenceUnavailable`
/// source, ragged rows a `RaggedFrame`; both can be recovered with
/// `downcast_ref`.
pub fn load_reference(path: &Path) -> Result<LogMelSpectrogram> {
    let contents = fs::read_to_string(path)
        .map_err(ExtractionError::from)
        .map_err(|err| {
            log_extraction_error(&err, "interop::load_reference");
            err
        })
        .with_context(|| format!("reading {}", path.display()))?;

    let frames: Vec<Vec<f32>> = serde_json::from_str(&contents)
        .map_err(|err| {
            let err = ExtractionError::ReferenceUnavailable {
                reason: err.to_string(),
            };
            log_extraction_error(&err, "interop::load_reference");
            err
        })
        .with_context(|| format!("parsing reference spectrogram {}", path.display()))?;

    LogMelSpectrogram::from_nested(frames)
        .with_context(|| format!("reshaping reference spectrogram {}", path.display()))
}
