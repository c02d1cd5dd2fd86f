// Mel module - filterbank projection and log compression
//
// The filterbank is a (bands x bins) matrix of triangular weights stored
// as one row-major buffer. Anchors are spaced evenly on the mel scale
//   mel = 2595 * log10(1 + hz / 700)
// and every band spans three consecutive anchors (left, center, right).

/// Convert frequency in Hz to mel
pub fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

/// Convert mel back to Hz
pub fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}

/// Weight of a frequency under one triangular band
///
/// Rising edge on `left < freq < center`, falling edge on
/// `center <= freq < right`, zero elsewhere. A frequency exactly on the
/// center anchor always takes the falling branch; downstream models were
/// trained on that tie-break.
pub fn triangle_weight(freq: f32, left: f32, center: f32, right: f32) -> f32 {
    if freq > left && freq < center {
        (freq - left) / (center - left)
    } else if freq >= center && freq < right {
        (right - freq) / (right - center)
    } else {
        0.0
    }
}

/// Parameters the filterbank is built from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterbankParams {
    pub sample_rate: u32,
    pub frame_size: usize,
    pub n_mels: usize,
    pub f_min: f32,
    pub f_max: f32,
}

/// Triangular mel filterbank
///
/// Immutable after construction. `weights[m * n_bins + k]` is the weight
/// of spectral bin `k` in band `m`.
#[derive(Debug, Clone)]
pub struct MelFilterbank {
    weights: Vec<f32>,
    anchors_hz: Vec<f32>,
    n_mels: usize,
    n_bins: usize,
}

impl MelFilterbank {
    /// Build the filterbank
    ///
    /// 1. Convert f_min and f_max to mel
    /// 2. Place n_mels + 2 evenly spaced mel points and convert back to Hz
    /// 3. Weight every bin (center = k * sample_rate / frame_size) under
    ///    each (left, center, right) triple
    pub fn new(params: FilterbankParams) -> Self {
        let n_bins = params.frame_size / 2 + 1;
        let n_mels = params.n_mels;

        let mel_min = hz_to_mel(params.f_min);
        let mel_max = hz_to_mel(params.f_max);

        let anchors_hz: Vec<f32> = (0..n_mels + 2)
            .map(|i| {
                mel_to_hz(mel_min + (mel_max - mel_min) * i as f32 / (n_mels + 1) as f32)
            })
            .collect();

        let mut weights = vec![0.0f32; n_mels * n_bins];
        for (m, row) in weights.chunks_exact_mut(n_bins).enumerate() {
            let left = anchors_hz[m];
            let center = anchors_hz[m + 1];
            let right = anchors_hz[m + 2];

            for (k, weight) in row.iter_mut().enumerate() {
                let freq = k as f32 * params.sample_rate as f32 / params.frame_size as f32;
                *weight = triangle_weight(freq, left, center, right);
            }
        }

        Self {
            weights,
            anchors_hz,
            n_mels,
            n_bins,
        }
    }

    /// (bands, bins)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_mels, self.n_bins)
    }

    /// Weights of band `m`
    pub fn row(&self, m: usize) -> &[f32] {
        &self.weights[m * self.n_bins..(m + 1) * self.n_bins]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.weights.chunks_exact(self.n_bins)
    }

    /// Flat row-major weight buffer
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }

    /// The n_mels + 2 anchor frequencies in Hz
    pub fn anchor_frequencies(&self) -> &[f32] {
        &self.anchors_hz
    }

    /// Project a power spectrum onto the mel bands
    ///
    /// # Arguments
    /// * `power` - Power spectrum (length = bins)
    /// * `energies` - Output mel energies (length = bands)
    pub fn apply_into(&self, power: &[f32], energies: &mut [f32]) {
        debug_assert_eq!(power.len(), self.n_bins);
        debug_assert_eq!(energies.len(), self.n_mels);

        for (energy, row) in energies.iter_mut().zip(self.rows()) {
            *energy = row.iter().zip(power).map(|(w, p)| w * p).sum();
        }
    }

    pub fn apply(&self, power: &[f32]) -> Vec<f32> {
        let mut energies = vec![0.0; self.n_mels];
        self.apply_into(power, &mut energies);
        energies
    }
}

/// Log-compress mel energies in place: 10 * log10(energy + epsilon)
pub fn log_compress(energies: &mut [f32], epsilon: f32) {
    for value in energies.iter_mut() {
        *value = 10.0 * (*value + epsilon).log10();
    }
}
