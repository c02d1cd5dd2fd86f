// Front-end constants
//
// Every spectral parameter of the log-mel pipeline is fixed at compile
// time. Models trained against this front-end depend on these exact values.

/// 16 kHz mono input
pub const SAMPLE_RATE: u32 = 16_000;

/// Samples per analysis frame (32 ms at 16 kHz)
pub const FRAME_SIZE: usize = 512;

/// Stride between consecutive frame offsets (10 ms at 16 kHz)
pub const HOP_LENGTH: usize = 160;

/// Number of mel bands per output frame
pub const N_MELS: usize = 40;

/// Non-negative frequency bins of a real-input transform of `FRAME_SIZE`
pub const N_FFT_BINS: usize = FRAME_SIZE / 2 + 1;

/// Lower edge of the filterbank in Hz
pub const F_MIN: f32 = 0.0;

/// Upper edge of the filterbank in Hz (Nyquist for 16 kHz)
pub const F_MAX: f32 = 8_000.0;

/// Added to every mel energy before `log10` so silence stays finite
pub const LOG_EPSILON: f32 = 1e-10;

/// One-second clip length used by the golden-reference preprocessing
pub const CLIP_LENGTH_SAMPLES: usize = SAMPLE_RATE as usize;

/// Frames produced by a full clip: (16000 - 512) / 160 + 1
pub const CLIP_FRAME_COUNT: usize = (CLIP_LENGTH_SAMPLES - FRAME_SIZE) / HOP_LENGTH + 1;
