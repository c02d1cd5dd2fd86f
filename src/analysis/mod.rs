// Analysis module - log-mel feature extraction
//
// The pipeline lives in `features`; this module adds the process-wide
// extractor that host bindings call into.

use once_cell::sync::Lazy;

pub mod features;

pub use features::{FeatureExtractor, LogMelSpectrogram, SpectrumMethod};

/// Global extractor, built on first use and immutable afterwards.
static SHARED: Lazy<FeatureExtractor> = Lazy::new(FeatureExtractor::new);

/// Access the process-wide extractor.
///
/// Construction completes before the reference is handed out, so callers on
/// any thread may run `extract` concurrently without further coordination.
pub fn shared() -> &'static FeatureExtractor {
    &SHARED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::signals;
    use std::thread;

    #[test]
    fn test_shared_is_a_single_instance() {
        assert!(std::ptr::eq(shared(), shared()));
    }

    #[test]
    fn test_concurrent_extraction_matches_serial() {
        let signal = signals::white_noise(4000, 0.7, 2024);
        let expected = shared().extract(&signal);

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| shared().extract(&signal)))
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
