// AudioGuard Core - log-mel spectrogram front-end
// Turns 16 kHz mono waveforms into 40-band log-mel frames for audio models

// Module declarations
pub mod analysis;
pub mod config;
pub mod error;
pub mod interop;
pub mod testing;

// Re-exports for convenience
pub use analysis::features::constants;
pub use analysis::{shared, FeatureExtractor, LogMelSpectrogram, SpectrumMethod};
pub use config::ExtractorConfig;
pub use error::{ErrorCode, ExtractionError};

/// Install a fmt subscriber for `tracing` (and `log`) output
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
        let frames = shared().extract(&vec![0.0; constants::FRAME_SIZE]);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_extractor_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FeatureExtractor>();
    }
}
