// Types module - output data structures
//
// The log-mel spectrogram is stored time-major in one flat buffer so a
// whole clip is a single allocation. Hosts that want nested rows call
// `into_nested`.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Time-major log-mel spectrogram
///
/// `data[t * n_mels + m]` is band `m` of frame `t`, in dB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMelSpectrogram {
    /// Values per frame (40 for the fixed front-end)
    pub n_mels: usize,
    /// Flat frame-major values
    pub data: Vec<f32>,
}

impl LogMelSpectrogram {
    /// Empty spectrogram with capacity reserved for `frames` frames
    pub fn with_capacity(n_mels: usize, frames: usize) -> Self {
        Self {
            n_mels,
            data: Vec::with_capacity(n_mels * frames),
        }
    }

    pub fn num_frames(&self) -> usize {
        if self.n_mels == 0 {
            0
        } else {
            self.data.len() / self.n_mels
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// (frames, bands)
    pub fn shape(&self) -> (usize, usize) {
        (self.num_frames(), self.n_mels)
    }

    /// Band values of frame `index`, if it exists
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        if index >= self.num_frames() {
            return None;
        }
        let start = index * self.n_mels;
        Some(&self.data[start..start + self.n_mels])
    }

    /// Frames in time order
    ///
    /// Only whole frames are yielded, so the count always equals
    /// `num_frames()`.
    pub fn frames(&self) -> impl Iterator<Item = &[f32]> {
        let whole = self.num_frames() * self.n_mels;
        self.data[..whole].chunks_exact(self.n_mels.max(1))
    }

    /// Check that `data` holds whole frames of `n_mels` values
    ///
    /// Fails with `RaggedFrame` for a trailing partial frame, or for values
    /// stored under a zero band count.
    pub fn check_layout(&self) -> Result<(), ExtractionError> {
        let trailing = if self.n_mels == 0 {
            self.data.len()
        } else {
            self.data.len() % self.n_mels
        };

        if trailing != 0 {
            return Err(ExtractionError::RaggedFrame {
                frame: self.num_frames(),
                expected: self.n_mels,
                found: trailing,
            });
        }
        Ok(())
    }

    pub(crate) fn push_frame(&mut self, frame: &[f32]) {
        debug_assert_eq!(frame.len(), self.n_mels);
        self.data.extend_from_slice(frame);
    }

    /// Convert to one `Vec` per frame
    pub fn into_nested(self) -> Vec<Vec<f32>> {
        self.frames().map(<[f32]>::to_vec).collect()
    }

    /// Build from nested rows, rejecting rows of differing length
    ///
    /// An empty input yields an empty spectrogram with `n_mels` 0.
    pub fn from_nested(frames: Vec<Vec<f32>>) -> Result<Self, ExtractionError> {
        let n_mels = frames.first().map(Vec::len).unwrap_or(0);
        let mut spectrogram = Self::with_capacity(n_mels, frames.len());

        for (index, frame) in frames.iter().enumerate() {
            if frame.len() != n_mels {
                return Err(ExtractionError::RaggedFrame {
                    frame: index,
                    expected: n_mels,
                    found: frame.len(),
                });
            }
            spectrogram.data.extend_from_slice(frame);
        }

        Ok(spectrogram)
    }
}

/// Rewrite a spectrogram as decibels relative to its loudest value
///
/// Subtracts the global finite maximum from every value (so the peak becomes
/// 0 dB) and, when `top_db` is given, clamps everything below `-top_db`.
/// NaN values pass through unclamped. Spectrograms with no finite values are
/// left untouched.
pub fn to_peak_relative_db(spectrogram: &mut LogMelSpectrogram, top_db: Option<f32>) {
    let peak = spectrogram
        .data
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f32::NEG_INFINITY, f32::max);

    if !peak.is_finite() {
        return;
    }

    for value in spectrogram.data.iter_mut() {
        *value -= peak;
        // f32::max would swallow NaN into the clamp floor
        if let Some(range) = top_db {
            if !value.is_nan() {
                *value = value.max(-range);
            }
        }
    }
}
