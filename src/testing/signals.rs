//! Deterministic synthetic waveforms for exercising the front-end.
//!
//! Every generator is a pure function of its arguments; white noise is
//! drawn from a seeded `StdRng` so test vectors and interop dumps are
//! reproducible across runs.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Supported deterministic waveform patterns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalPattern {
    Sine { frequency_hz: f32 },
    WhiteNoise { seed: u64 },
    ImpulseTrain { interval: usize },
    Constant,
}

/// Declarative description of a synthetic waveform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSpec {
    pub pattern: SignalPattern,
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    pub len: usize,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl SignalSpec {
    /// Render the waveform.
    pub fn render(&self) -> Vec<f32> {
        match self.pattern {
            SignalPattern::Sine { frequency_hz } => {
                sine(frequency_hz, self.sample_rate, self.len, self.amplitude)
            }
            SignalPattern::WhiteNoise { seed } => white_noise(self.len, self.amplitude, seed),
            SignalPattern::ImpulseTrain { interval } => {
                impulse_train(self.len, interval, self.amplitude)
            }
            SignalPattern::Constant => constant(self.len, self.amplitude),
        }
    }
}

fn default_amplitude() -> f32 {
    0.5
}

fn default_sample_rate() -> u32 {
    crate::analysis::features::constants::SAMPLE_RATE
}

/// Pure sine wave starting at phase 0.
pub fn sine(frequency_hz: f32, sample_rate: u32, len: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * PI * frequency_hz * t).sin() * amplitude
        })
        .collect()
}

/// Uniform white noise in `[-amplitude, amplitude)`.
pub fn white_noise(len: usize, amplitude: f32, seed: u64) -> Vec<f32> {
    if amplitude <= 0.0 {
        return vec![0.0; len];
    }
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| rng.gen_range(-amplitude..amplitude))
        .collect()
}

/// Unit impulses every `interval` samples, starting at sample 0.
pub fn impulse_train(len: usize, interval: usize, amplitude: f32) -> Vec<f32> {
    let interval = interval.max(1);
    (0..len)
        .map(|i| if i % interval == 0 { amplitude } else { 0.0 })
        .collect()
}

/// Constant (DC) signal.
pub fn constant(len: usize, value: f32) -> Vec<f32> {
    vec![value; len]
}
