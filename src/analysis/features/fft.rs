// FFT module - power spectrum computation
//
// Two interchangeable ways of turning a windowed frame into its power
// spectrum: a planned rustfft transform for production use, and the direct
// O(N²) DFT that defines the numeric contract. Both keep only the
// non-negative frequency half (N/2 + 1 bins) and normalize by N.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;

/// How a windowed frame is taken to the frequency domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectrumMethod {
    /// Planned fast transform (rustfft)
    Fft,
    /// Direct quadratic DFT, the reference numeric contract
    Direct,
}

/// Per-call transient buffers for the fast path
///
/// Each `extract` call owns one of these, so a shared processor never
/// needs interior mutability.
pub struct SpectrumWorkspace {
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

/// Power spectrum processor for a fixed frame size
///
/// The FFT plan is built once at construction; rustfft plans are
/// `Send + Sync`, so one processor can serve concurrent callers.
pub struct PowerSpectrumProcessor {
    method: SpectrumMethod,
    frame_size: usize,
    fft: Arc<dyn Fft<f32>>,
}

impl PowerSpectrumProcessor {
    /// Create a processor for `frame_size`-sample frames
    ///
    /// # Arguments
    /// * `frame_size` - Transform length (512 for the log-mel front-end)
    /// * `method` - Fast or direct evaluation
    pub fn new(frame_size: usize, method: SpectrumMethod) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame_size);

        Self {
            method,
            frame_size,
            fft,
        }
    }

    pub fn method(&self) -> SpectrumMethod {
        self.method
    }

    /// Number of output bins (frame_size / 2 + 1)
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2 + 1
    }

    /// Allocate the transient buffers one extraction call needs
    pub fn workspace(&self) -> SpectrumWorkspace {
        let scratch_len = match self.method {
            SpectrumMethod::Fft => self.fft.get_inplace_scratch_len(),
            SpectrumMethod::Direct => 0,
        };

        SpectrumWorkspace {
            buffer: vec![Complex::new(0.0, 0.0); self.frame_size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    /// Compute the power spectrum of a windowed frame into `power`
    ///
    /// # Arguments
    /// * `windowed` - Windowed frame (length = frame_size)
    /// * `workspace` - Buffers from [`PowerSpectrumProcessor::workspace`]
    /// * `power` - Output slice (length = num_bins)
    pub fn compute_into(
        &self,
        windowed: &[f32],
        workspace: &mut SpectrumWorkspace,
        power: &mut [f32],
    ) {
        debug_assert_eq!(windowed.len(), self.frame_size);
        debug_assert_eq!(power.len(), self.num_bins());

        match self.method {
            SpectrumMethod::Fft => {
                for (slot, &sample) in workspace.buffer.iter_mut().zip(windowed) {
                    *slot = Complex::new(sample, 0.0);
                }

                self.fft
                    .process_with_scratch(&mut workspace.buffer, &mut workspace.scratch);

                let norm = self.frame_size as f32;
                for (dst, bin) in power.iter_mut().zip(&workspace.buffer) {
                    *dst = bin.norm_sqr() / norm;
                }
            }
            SpectrumMethod::Direct => direct_dft_into(windowed, power),
        }
    }

    /// Convenience wrapper allocating its own buffers
    pub fn compute(&self, windowed: &[f32]) -> Vec<f32> {
        let mut workspace = self.workspace();
        let mut power = vec![0.0; self.num_bins()];
        self.compute_into(windowed, &mut workspace, &mut power);
        power
    }
}

/// Reference power spectrum via the direct DFT
///
/// For each bin k in 0..=N/2:
///   real += x[n]·cos(2πkn/N), imag -= x[n]·sin(2πkn/N)
///   power[k] = (real² + imag²) / N
pub fn power_spectrum_direct(windowed: &[f32]) -> Vec<f32> {
    let mut power = vec![0.0; windowed.len() / 2 + 1];
    direct_dft_into(windowed, &mut power);
    power
}

fn direct_dft_into(windowed: &[f32], power: &mut [f32]) {
    let n_samples = windowed.len();

    for (k, dst) in power.iter_mut().enumerate() {
        let mut real = 0.0f32;
        let mut imag = 0.0f32;

        for (n, &sample) in windowed.iter().enumerate() {
            // Angle in f64, trig in f32
            let angle = (2.0 * PI * k as f64 * n as f64 / n_samples as f64) as f32;
            real += sample * angle.cos();
            imag -= sample * angle.sin();
        }

        *dst = (real * real + imag * imag) / n_samples as f32;
    }
}
