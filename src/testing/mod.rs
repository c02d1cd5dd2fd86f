//! Test-support utilities.
//!
//! Synthetic waveforms shared by the unit tests, the integration suite,
//! and host-side conformance scripts that need reproducible input.

pub mod signals;

pub use signals::{SignalPattern, SignalSpec};
