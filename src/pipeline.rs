//! End-to-end decode orchestration

use tracing::{debug, info};

use crate::matcher;
use crate::signal::{Signal, ToneSynthesizer};
use crate::spectrum::{SpectralAnalyzer, Spectrum};
use crate::tones::{FrequencyPair, Key};
use crate::{Error, Result};

/// Tagged decode request, dispatched to the matching pipeline operation.
#[derive(Debug)]
pub enum DecodeRequest {
    /// Synthesize a known key and confirm its identity against the table.
    Synthetic {
        key: Key,
        duration_secs: f64,
        sample_rate: u32,
    },
    /// Classify an externally supplied sample buffer.
    Sampled { signal: Signal },
}

/// Outcome of a single decode operation.
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// The (low, high) pair the classification was based on.
    pub detected: FrequencyPair,
    /// Matched keys: the exact-match set for synthetic decodes, exactly one
    /// key for sampled decodes.
    pub keys: Vec<Key>,
    /// Diagnostic spectrum the detection was derived from.
    pub spectrum: Spectrum,
    /// The synthesized signal, present for synthetic decodes only.
    pub signal: Option<Signal>,
}

/// Orchestrates synthesizer, analyzer and matcher for the two decode flows.
pub struct DecodePipeline {
    analyzer: SpectralAnalyzer,
}

impl DecodePipeline {
    pub fn new() -> Self {
        Self {
            analyzer: SpectralAnalyzer::new(),
        }
    }

    pub fn decode(&mut self, request: DecodeRequest) -> Result<DecodeResult> {
        match request {
            DecodeRequest::Synthetic {
                key,
                duration_secs,
                sample_rate,
            } => self.decode_synthetic(key, duration_secs, sample_rate),
            DecodeRequest::Sampled { signal } => self.decode_sampled(&signal),
        }
    }

    /// Round-trip a known key: synthesize its tone, analyze it, and
    /// exact-match the key's own table pair back through the table.
    pub fn decode_synthetic(
        &mut self,
        key: Key,
        duration_secs: f64,
        sample_rate: u32,
    ) -> Result<DecodeResult> {
        let signal = ToneSynthesizer::new(sample_rate).synthesize(key, duration_secs)?;
        let spectrum = self.analyzer.analyze(&signal)?;

        let detected = key.frequencies();
        let keys = matcher::exact_match(detected);
        debug!(%key, low = detected.low, high = detected.high, "synthetic decode");

        Ok(DecodeResult {
            detected,
            keys,
            spectrum,
            signal: Some(signal),
        })
    }

    /// Detect the dominant key in an external buffer: analyze, pick the two
    /// highest-magnitude bins, and nearest-match the sorted pair.
    pub fn decode_sampled(&mut self, signal: &Signal) -> Result<DecodeResult> {
        let spectrum = self.analyzer.analyze(signal)?;

        let (first, second) = spectrum.top_two().ok_or_else(|| {
            Error::invalid_buffer("buffer too short for two-tone peak detection")
        })?;
        let detected = FrequencyPair::from_detected(first.frequency, second.frequency);
        let key = matcher::nearest_match(detected)?;

        info!(
            %key,
            low = detected.low,
            high = detected.high,
            "decoded sampled signal"
        );

        Ok(DecodeResult {
            detected,
            keys: vec![key],
            spectrum,
            signal: None,
        })
    }
}

impl Default for DecodePipeline {
    fn default() -> Self {
        Self::new()
    }
}
