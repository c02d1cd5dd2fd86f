//! Front-end parameter manifest
//!
//! The extractor's spectral parameters are compiled in and cannot be
//! changed at runtime. This module describes them as a serializable
//! manifest so a host can ship the parameters a model was trained with
//! and check them against the compiled front-end before extracting.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::analysis::features::constants::{
    FRAME_SIZE, F_MAX, F_MIN, HOP_LENGTH, LOG_EPSILON, N_MELS, SAMPLE_RATE,
};
use crate::error::ExtractionError;

/// Log-mel front-end parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Input sample rate in Hz
    pub sample_rate: u32,
    /// Samples per analysis frame (also the transform length)
    pub frame_size: usize,
    /// Samples between consecutive frame starts
    pub hop_length: usize,
    /// Mel bands per output frame
    pub n_mels: usize,
    /// Lower filterbank edge in Hz
    pub f_min: f32,
    /// Upper filterbank edge in Hz
    pub f_max: f32,
    /// Floor added before log compression
    pub log_epsilon: f32,
}

impl Default for ExtractorConfig {
    /// The compiled-in parameters
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            frame_size: FRAME_SIZE,
            hop_length: HOP_LENGTH,
            n_mels: N_MELS,
            f_min: F_MIN,
            f_max: F_MAX,
            log_epsilon: LOG_EPSILON,
        }
    }
}

impl ExtractorConfig {
    /// Load a manifest from a JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON manifest
    ///
    /// # Returns
    /// The parsed manifest, or the compiled defaults if the file is missing
    /// or the JSON is invalid
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded front-end manifest from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read manifest {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Check this manifest against the compiled front-end
    ///
    /// Returns `IncompatibleConfig` naming the first field that differs.
    pub fn ensure_compatible(&self) -> Result<(), ExtractionError> {
        let compiled = Self::default();

        check_field("sample_rate", compiled.sample_rate, self.sample_rate)?;
        check_field("frame_size", compiled.frame_size, self.frame_size)?;
        check_field("hop_length", compiled.hop_length, self.hop_length)?;
        check_field("n_mels", compiled.n_mels, self.n_mels)?;
        check_field("f_min", compiled.f_min, self.f_min)?;
        check_field("f_max", compiled.f_max, self.f_max)?;
        check_field("log_epsilon", compiled.log_epsilon, self.log_epsilon)?;

        Ok(())
    }
}

fn check_field<T>(field: &str, expected: T, found: T) -> Result<(), ExtractionError>
where
    T: PartialEq + std::fmt::Display,
{
    if expected == found {
        Ok(())
    } else {
        Err(ExtractionError::IncompatibleConfig {
            field: field.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        })
    }
}
