//! Plot-ready payloads for presentation adapters
//!
//! The engine itself renders nothing; these types carry the (x, y) series and
//! matched keys a presentation layer serializes into its response.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::pipeline::DecodeResult;
use crate::signal::Signal;
use crate::spectrum::Spectrum;
use crate::tones::Key;
use crate::{Error, Result};

/// Time-domain preview length, in samples.
const TIME_PREVIEW_POINTS: usize = 100;

/// Length of the per-tone decomposition series, in samples.
const DECOMPOSITION_POINTS: usize = 200;

/// A plottable (x, y) series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    fn time_domain(signal: &Signal, limit: usize) -> Self {
        let count = signal.len().min(limit);
        Self {
            x: (0..count).map(|i| signal.time_at(i)).collect(),
            y: signal.samples()[..count].to_vec(),
        }
    }

    fn frequency_domain(spectrum: &Spectrum) -> Self {
        Self {
            x: spectrum.bins().iter().map(|b| b.frequency).collect(),
            y: spectrum.bins().iter().map(|b| b.magnitude).collect(),
        }
    }

    fn sine(frequency: f64, signal: &Signal, limit: usize) -> Self {
        let count = signal.len().min(limit);
        let x: Vec<f64> = (0..count).map(|i| signal.time_at(i)).collect();
        let y = x.iter().map(|t| (2.0 * PI * frequency * t).sin()).collect();
        Self { x, y }
    }
}

/// Payload for the "analyze a known key" flow: time and frequency series,
/// the sine decomposition view, and the identified key set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub time_domain: Series,
    pub frequency_domain: Series,
    pub low_tone: Series,
    pub high_tone: Series,
    pub combined_tone: Series,
    pub identified_keys: Vec<Key>,
    pub frequencies: (f64, f64),
}

impl AnalysisReport {
    /// Build the payload from a synthetic decode result.
    ///
    /// Fails when the result carries no signal, i.e. it did not come from
    /// `decode_synthetic`.
    pub fn from_result(result: &DecodeResult) -> Result<Self> {
        let signal = result
            .signal
            .as_ref()
            .ok_or_else(|| Error::internal("analysis report requires a synthesized signal"))?;

        let low = Series::sine(result.detected.low, signal, DECOMPOSITION_POINTS);
        let high = Series::sine(result.detected.high, signal, DECOMPOSITION_POINTS);
        let combined = Series {
            x: low.x.clone(),
            y: low
                .y
                .iter()
                .zip(&high.y)
                .map(|(l, h)| (l + h) / 2.0)
                .collect(),
        };

        Ok(Self {
            time_domain: Series::time_domain(signal, TIME_PREVIEW_POINTS),
            frequency_domain: Series::frequency_domain(&result.spectrum),
            low_tone: low,
            high_tone: high,
            combined_tone: combined,
            identified_keys: result.keys.clone(),
            frequencies: (result.detected.low, result.detected.high),
        })
    }
}

/// Payload for the "decode an uploaded buffer" flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub frequency_domain: Series,
    pub identified_keys: Vec<Key>,
    pub detected: (f64, f64),
}

impl FileReport {
    pub fn from_result(result: &DecodeResult) -> Self {
        Self {
            frequency_domain: Series::frequency_domain(&result.spectrum),
            identified_keys: result.keys.clone(),
            detected: (result.detected.low, result.detected.high),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::DecodePipeline;
    use crate::signal::ToneSynthesizer;

    #[test]
    fn test_analysis_report_series_lengths() {
        let result = DecodePipeline::new()
            .decode_synthetic(Key::Five, 0.5, 8000)
            .unwrap();
        let report = AnalysisReport::from_result(&result).unwrap();

        assert_eq!(report.time_domain.x.len(), TIME_PREVIEW_POINTS);
        assert_eq!(report.low_tone.x.len(), DECOMPOSITION_POINTS);
        assert_eq!(report.high_tone.x.len(), DECOMPOSITION_POINTS);
        assert_eq!(report.combined_tone.x.len(), DECOMPOSITION_POINTS);
        assert_eq!(report.frequency_domain.x.len(), result.spectrum.len());
        assert_eq!(report.identified_keys, vec![Key::Five]);
        assert_eq!(report.frequencies, (770.0, 1336.0));
    }

    #[test]
    fn test_combined_tone_is_averaged() {
        let result = DecodePipeline::new()
            .decode_synthetic(Key::One, 0.5, 8000)
            .unwrap();
        let report = AnalysisReport::from_result(&result).unwrap();

        for i in 0..report.combined_tone.y.len() {
            let expected = (report.low_tone.y[i] + report.high_tone.y[i]) / 2.0;
            assert!((report.combined_tone.y[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_analysis_report_requires_signal() {
        let signal = ToneSynthesizer::new(8000).synthesize(Key::Two, 0.5).unwrap();
        let result = DecodePipeline::new().decode_sampled(&signal).unwrap();
        assert!(AnalysisReport::from_result(&result).is_err());
    }

    #[test]
    fn test_short_signal_truncates_preview() {
        let result = DecodePipeline::new()
            .decode_synthetic(Key::Three, 0.005, 8000)
            .unwrap();
        let report = AnalysisReport::from_result(&result).unwrap();
        assert_eq!(report.time_domain.x.len(), 40);
    }

    #[test]
    fn test_file_report_serializes_keys_as_symbols() {
        let signal = ToneSynthesizer::new(8000).synthesize(Key::Star, 0.5).unwrap();
        let result = DecodePipeline::new().decode_sampled(&signal).unwrap();
        let report = FileReport::from_result(&result);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"identified_keys\":[\"*\"]"), "json: {}", json);
        assert!(json.contains("\"detected\""));

        let back: FileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.identified_keys, vec![Key::Star]);
    }
}
