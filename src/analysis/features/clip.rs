// Clip module - framing arithmetic and fixed-length clip fitting

use crate::analysis::features::constants::{FRAME_SIZE, HOP_LENGTH};

/// Number of whole frames a waveform of `len` samples produces
///
/// Frames start at 0, HOP_LENGTH, 2·HOP_LENGTH, … and must fit entirely;
/// trailing samples that do not fill a frame are dropped.
pub fn frame_count(len: usize) -> usize {
    if len < FRAME_SIZE {
        0
    } else {
        (len - FRAME_SIZE) / HOP_LENGTH + 1
    }
}

/// Zero-pad or truncate `samples` to exactly `clip_len` samples
///
/// Models fed by this front-end expect a fixed input size, so the
/// reference preprocessing fits every waveform to a one-second clip.
pub fn fit_to_clip(samples: &[f32], clip_len: usize) -> Vec<f32> {
    let mut clip = vec![0.0f32; clip_len];
    let copied = samples.len().min(clip_len);
    clip[..copied].copy_from_slice(&samples[..copied]);
    clip
}
