// Window module - analysis window lookup table

use std::f64::consts::PI;

/// Build a symmetric Hann window of `len` samples
///
/// Formula: w[i] = 0.5 * (1 - cos(2π·i / (N - 1)))
///
/// The cosine is evaluated in f64 and narrowed, so both endpoints are
/// exactly 0.0. A window of length 1 is a single unit weight; length 0
/// gives an empty window.
pub fn hann_window(len: usize) -> Vec<f32> {
    match len {
        0 => return Vec::new(),
        1 => return vec![1.0],
        _ => {}
    }

    let denom = (len - 1) as f64;
    (0..len)
        .map(|i| (0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos())) as f32)
        .collect()
}

/// Multiply `frame` by `window` into `out`
///
/// All three slices must share the same length.
pub fn apply_window(frame: &[f32], window: &[f32], out: &mut [f32]) {
    debug_assert_eq!(frame.len(), window.len());
    debug_assert_eq!(frame.len(), out.len());

    for ((dst, &sample), &weight) in out.iter_mut().zip(frame).zip(window) {
        *dst = sample * weight;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::features::constants::FRAME_SIZE;

    #[test]
    fn test_hann_endpoints_and_peak() {
        let window = hann_window(FRAME_SIZE);
        assert_eq!(window.len(), FRAME_SIZE);
        assert!(window[0].abs() < 1e-7);
        assert!(window[FRAME_SIZE - 1].abs() < 1e-7);

        let peak = window.iter().cloned().fold(f32::MIN, f32::max);
        assert!(peak <= 1.0);
        assert!(peak > 0.9999, "peak was {}", peak);
    }

    #[test]
    fn test_hann_sum_matches_theory() {
        // Sum over a symmetric Hann window is exactly 0.5 * (N - 1)
        let window = hann_window(FRAME_SIZE);
        let sum: f64 = window.iter().map(|&w| w as f64).sum();
        let expected = 0.5 * (FRAME_SIZE as f64 - 1.0);
        assert!(
            (sum - expected).abs() < 1e-3,
            "window sum {} differs from {}",
            sum,
            expected
        );
    }

    #[test]
    fn test_hann_is_symmetric() {
        let window = hann_window(FRAME_SIZE);
        for i in 0..FRAME_SIZE / 2 {
            let mirrored = window[FRAME_SIZE - 1 - i];
            assert!((window[i] - mirrored).abs() < 1e-6, "asymmetry at {}", i);
        }
    }

    #[test]
    fn test_single_sample_window() {
        assert_eq!(hann_window(1), vec![1.0]);
    }

    #[test]
    fn test_empty_window() {
        assert!(hann_window(0).is_empty());
    }

    #[test]
    fn test_apply_window() {
        let frame = [2.0, 2.0, 2.0];
        let window = [0.0, 0.5, 1.0];
        let mut out = [0.0; 3];
        apply_window(&frame, &window, &mut out);
        assert_eq!(out, [0.0, 1.0, 2.0]);
    }
}
