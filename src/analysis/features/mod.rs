// FeatureExtractor - log-mel spectrogram front-end
//
// This module turns a 16 kHz mono waveform into a time-major sequence of
// 40-band log-mel vectors, the input representation of the downstream
// audio models.
//
// Module organization:
// - constants: Fixed spectral parameters
// - window: Hann analysis window
// - fft: Power spectrum (rustfft fast path + direct DFT reference)
// - mel: Triangular mel filterbank and log compression
// - clip: Framing arithmetic and fixed-length clip fitting
// - types: Output spectrogram type and dB post-processing
// - mod.rs: Coordinator (FeatureExtractor)
//
// Per frame:
// 1. Slice FRAME_SIZE samples at offset t·HOP_LENGTH
// 2. Multiply by the Hann window
// 3. Power spectrum: |X[k]|² / N for k in 0..=N/2
// 4. Project through the mel filterbank
// 5. 10·log10(energy + 1e-10)

mod clip;
pub mod constants;
mod fft;
mod mel;
mod types;
mod window;

pub use clip::{fit_to_clip, frame_count};
pub use fft::{power_spectrum_direct, PowerSpectrumProcessor, SpectrumMethod, SpectrumWorkspace};
pub use mel::{
    hz_to_mel, log_compress, mel_to_hz, triangle_weight, FilterbankParams, MelFilterbank,
};
pub use types::{to_peak_relative_db, LogMelSpectrogram};
pub use window::{apply_window, hann_window};

use constants::{
    CLIP_LENGTH_SAMPLES, FRAME_SIZE, F_MAX, F_MIN, HOP_LENGTH, LOG_EPSILON, N_FFT_BINS, N_MELS,
    SAMPLE_RATE,
};

use crate::config::ExtractorConfig;
use crate::error::{log_extraction_error, ExtractionError};

/// FeatureExtractor coordinates the log-mel pipeline
///
/// Owns the Hann window, the mel filterbank and the power spectrum
/// processor. All three are built once in the constructor and never
/// mutated, so a constructed extractor can be shared by reference across
/// threads without locking.
pub struct FeatureExtractor {
    window: Vec<f32>,
    filterbank: MelFilterbank,
    spectrum: PowerSpectrumProcessor,
}

impl FeatureExtractor {
    /// Create an extractor using the fast transform
    pub fn new() -> Self {
        Self::with_method(SpectrumMethod::Fft)
    }

    /// Create an extractor using the direct DFT
    ///
    /// Slower (quadratic per frame) but evaluates the reference formula
    /// term by term; used for conformance runs.
    pub fn reference() -> Self {
        Self::with_method(SpectrumMethod::Direct)
    }

    /// Create an extractor with an explicit spectrum method
    pub fn with_method(method: SpectrumMethod) -> Self {
        let window = hann_window(FRAME_SIZE);
        let filterbank = MelFilterbank::new(FilterbankParams {
            sample_rate: SAMPLE_RATE,
            frame_size: FRAME_SIZE,
            n_mels: N_MELS,
            f_min: F_MIN,
            f_max: F_MAX,
        });
        let spectrum = PowerSpectrumProcessor::new(FRAME_SIZE, method);

        tracing::info!(
            "[FeatureExtractor] Initialized. Mel bands: {}, FFT size: {}, method: {:?}",
            N_MELS,
            FRAME_SIZE,
            method
        );

        Self {
            window,
            filterbank,
            spectrum,
        }
    }

    /// Parameters of the compiled-in front-end
    pub fn config(&self) -> ExtractorConfig {
        ExtractorConfig::default()
    }

    pub fn method(&self) -> SpectrumMethod {
        self.spectrum.method()
    }

    /// Hann window lookup table
    pub fn window(&self) -> &[f32] {
        &self.window
    }

    /// Mel filterbank lookup table
    pub fn filterbank(&self) -> &MelFilterbank {
        &self.filterbank
    }

    /// Compute the log-mel spectrogram of a waveform
    ///
    /// # Arguments
    /// * `waveform` - Mono samples at 16 kHz, any length
    ///
    /// # Returns
    /// One 40-value vector per frame, in time order. Empty when the
    /// waveform is shorter than one frame.
    ///
    /// # Note
    /// Input is not validated; NaN or infinite samples propagate into the
    /// frames that contain them. Use [`FeatureExtractor::extract_checked`]
    /// to reject them instead.
    pub fn extract(&self, waveform: &[f32]) -> Vec<Vec<f32>> {
        self.extract_spectrogram(waveform).into_nested()
    }

    /// Same as [`FeatureExtractor::extract`], returned as one flat buffer
    pub fn extract_spectrogram(&self, waveform: &[f32]) -> LogMelSpectrogram {
        let n_frames = frame_count(waveform.len());
        let mut spectrogram = LogMelSpectrogram::with_capacity(N_MELS, n_frames);

        // Transient per-call buffers
        let mut workspace = self.spectrum.workspace();
        let mut windowed = vec![0.0f32; FRAME_SIZE];
        let mut power = vec![0.0f32; N_FFT_BINS];
        let mut energies = vec![0.0f32; N_MELS];

        for frame in waveform.windows(FRAME_SIZE).step_by(HOP_LENGTH) {
            apply_window(frame, &self.window, &mut windowed);
            self.spectrum
                .compute_into(&windowed, &mut workspace, &mut power);
            self.filterbank.apply_into(&power, &mut energies);
            log_compress(&mut energies, LOG_EPSILON);
            spectrogram.push_frame(&energies);
        }

        tracing::debug!(
            samples = waveform.len(),
            frames = spectrogram.num_frames(),
            "log-mel spectrogram extracted"
        );

        spectrogram
    }

    /// Extract after rejecting NaN or infinite samples
    ///
    /// Output for finite input is identical to [`FeatureExtractor::extract`].
    pub fn extract_checked(&self, waveform: &[f32]) -> Result<Vec<Vec<f32>>, ExtractionError> {
        if let Some(index) = waveform.iter().position(|s| !s.is_finite()) {
            let err = ExtractionError::NonFiniteSample { index };
            log_extraction_error(&err, "extract_checked");
            return Err(err);
        }

        Ok(self.extract(waveform))
    }

    /// Fit the waveform to a one-second clip, then extract
    ///
    /// Always yields `CLIP_FRAME_COUNT` frames.
    pub fn extract_clip(&self, waveform: &[f32]) -> Vec<Vec<f32>> {
        self.extract(&fit_to_clip(waveform, CLIP_LENGTH_SAMPLES))
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::signals;
    use super::constants::CLIP_FRAME_COUNT;

    fn silence_floor() -> f32 {
        10.0 * LOG_EPSILON.log10()
    }

    #[test]
    fn test_feature_extractor_creation() {
        let extractor = FeatureExtractor::new();
        assert_eq!(extractor.window().len(), FRAME_SIZE);
        assert_eq!(extractor.filterbank().shape(), (N_MELS, N_FFT_BINS));
        assert_eq!(extractor.method(), SpectrumMethod::Fft);
        assert_eq!(FeatureExtractor::reference().method(), SpectrumMethod::Direct);
    }

    #[test]
    fn test_short_waveform_yields_no_frames() {
        let extractor = FeatureExtractor::new();
        assert!(extractor.extract(&[]).is_empty());
        assert!(extractor.extract(&vec![0.3; FRAME_SIZE - 1]).is_empty());
    }

    #[test]
    fn test_frame_count_formula() {
        let extractor = FeatureExtractor::new();

        for len in [512usize, 671, 672, 1000, 4096, 16_000] {
            let frames = extractor.extract(&signals::sine(300.0, SAMPLE_RATE, len, 0.5));
            assert_eq!(frames.len(), (len - FRAME_SIZE) / HOP_LENGTH + 1, "len {}", len);
            assert!(frames.iter().all(|f| f.len() == N_MELS));
        }
    }

    #[test]
    fn test_silence_hits_epsilon_floor() {
        let extractor = FeatureExtractor::new();
        let frames = extractor.extract(&vec![0.0; 2048]);
        let floor = silence_floor();

        assert_eq!(frames.len(), frame_count(2048));
        for value in frames.iter().flatten() {
            assert!((value - floor).abs() < 1e-3, "expected {}, got {}", floor, value);
            assert!((value + 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_dc_frame_end_to_end() {
        let extractor = FeatureExtractor::new();
        let frames = extractor.extract(&vec![1.0; FRAME_SIZE]);

        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!(frame.len(), N_MELS);
        assert!(frame.iter().all(|v| v.is_finite()));

        // DC energy sits in the lowest bands
        assert!(frame[0] > 0.0, "lowest band {} dB", frame[0]);
        assert!(frame[0] > frame[N_MELS - 1] + 40.0);
        println!("DC frame: {:?}", &frame[..5]);
    }

    #[test]
    fn test_sine_energy_lands_in_matching_band() {
        let extractor = FeatureExtractor::new();
        let frames = extractor.extract(&signals::sine(1000.0, SAMPLE_RATE, 4096, 0.8));

        let anchors = extractor.filterbank().anchor_frequencies();
        for frame in &frames {
            let loudest = frame
                .iter()
                .enumerate()
                .fold((0, f32::MIN), |acc, (m, &v)| if v > acc.1 { (m, v) } else { acc })
                .0;
            assert!(
                anchors[loudest] < 1000.0 && anchors[loudest + 2] > 1000.0,
                "loudest band {} spans {}..{} Hz",
                loudest,
                anchors[loudest],
                anchors[loudest + 2]
            );
        }
    }

    #[test]
    fn test_extract_is_deterministic() {
        let extractor = FeatureExtractor::new();
        let signal = signals::white_noise(8000, 0.9, 1234);

        let first = extractor.extract(&signal);
        let second = extractor.extract(&signal);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reference_matches_fast_path() {
        let fast = FeatureExtractor::new();
        let reference = FeatureExtractor::reference();
        let signal = signals::white_noise(1024, 0.5, 99);

        let a = fast.extract(&signal);
        let b = reference.extract(&signal);
        assert_eq!(a.len(), b.len());

        // Broadband noise keeps every band well above the floor, so dB
        // values are directly comparable
        for (fa, fb) in a.iter().zip(&b) {
            for (x, y) in fa.iter().zip(fb) {
                assert!((x - y).abs() < 5e-2, "fast {} vs direct {}", x, y);
            }
        }
    }

    #[test]
    fn test_frames_follow_time_order() {
        let extractor = FeatureExtractor::new();
        // Silence, then a loud tone starting at sample 2048
        let mut signal = vec![0.0; 2048];
        signal.extend(signals::sine(500.0, SAMPLE_RATE, 2048, 1.0));

        let frames = extractor.extract(&signal);
        assert!(frames[0].iter().all(|&v| (v - silence_floor()).abs() < 1e-3));
        assert!(frames.last().unwrap().iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let extractor = FeatureExtractor::new();
        let mut signal = vec![0.1; FRAME_SIZE + HOP_LENGTH];
        signal[FRAME_SIZE + 10] = f32::NAN;

        let frames = extractor.extract(&signal);
        assert_eq!(frames.len(), 2);
        assert!(frames[0].iter().all(|v| v.is_finite()));
        assert!(frames[1].iter().any(|v| v.is_nan()));
    }

    #[test]
    fn test_extract_checked() {
        let extractor = FeatureExtractor::new();
        let signal = signals::sine(700.0, SAMPLE_RATE, 1024, 0.5);
        assert_eq!(extractor.extract_checked(&signal).unwrap(), extractor.extract(&signal));

        let mut bad = signal.clone();
        bad[600] = f32::INFINITY;
        assert_eq!(
            extractor.extract_checked(&bad),
            Err(ExtractionError::NonFiniteSample { index: 600 })
        );
    }

    #[test]
    fn test_extract_clip_has_fixed_frame_count() {
        let extractor = FeatureExtractor::new();

        let short = extractor.extract_clip(&signals::sine(250.0, SAMPLE_RATE, 300, 0.5));
        let long = extractor.extract_clip(&signals::sine(250.0, SAMPLE_RATE, 40_000, 0.5));
        assert_eq!(short.len(), CLIP_FRAME_COUNT);
        assert_eq!(long.len(), CLIP_FRAME_COUNT);
    }

    #[test]
    fn test_spectrogram_and_nested_agree() {
        let extractor = FeatureExtractor::new();
        let signal = signals::impulse_train(3000, 160, 1.0);

        let flat = extractor.extract_spectrogram(&signal);
        let nested = extractor.extract(&signal);
        assert_eq!(flat.shape(), (nested.len(), N_MELS));
        assert_eq!(flat.into_nested(), nested);
    }

    #[test]
    fn test_config_reports_compiled_parameters() {
        let config = FeatureExtractor::new().config();
        assert_eq!(config.frame_size, FRAME_SIZE);
        assert_eq!(config.hop_length, HOP_LENGTH);
        assert_eq!(config.n_mels, N_MELS);
    }
}
