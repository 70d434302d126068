//! DTMF Engine - Dual-Tone Multi-Frequency synthesis and detection
//!
//! Synthesizes the two-tone signals behind telephone keypad presses, derives
//! one-sided magnitude spectra from sampled audio, and classifies detected
//! frequency pairs back to keypad keys by nearest-neighbor matching.

pub mod audio;
pub mod config;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod report;
pub mod signal;
pub mod spectrum;
pub mod tones;
pub mod utils;

pub use error::{Error, Result};
pub use pipeline::{DecodePipeline, DecodeRequest, DecodeResult};
pub use signal::{Signal, ToneSynthesizer};
pub use spectrum::{SpectralAnalyzer, Spectrum, SpectrumBin};
pub use tones::{FrequencyPair, Key};

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
