//! One-sided magnitude spectrum computation

use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;
use tracing::debug;

use crate::signal::Signal;
use crate::{Error, Result};

/// A single (frequency, magnitude) spectrum bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumBin {
    pub frequency: f64,
    pub magnitude: f64,
}

/// One-sided magnitude spectrum of a real-valued signal.
///
/// Bins are frequency-ascending, covering `f_k = k * sample_rate / N` for
/// `k` in `[0, floor(N/2))`. Nyquist and mirrored negative-frequency
/// components are discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    bins: Vec<SpectrumBin>,
    resolution: f64,
}

impl Spectrum {
    pub fn bins(&self) -> &[SpectrumBin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Frequency spacing between adjacent bins, `sample_rate / N`.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// The two highest-magnitude bins, strongest first.
    ///
    /// Selection is a single stable pass: when magnitudes tie, the earlier
    /// (lower-frequency) bin wins. `None` when the spectrum holds fewer than
    /// two bins.
    pub fn top_two(&self) -> Option<(SpectrumBin, SpectrumBin)> {
        if self.bins.len() < 2 {
            return None;
        }

        let (mut best, mut second) = if self.bins[1].magnitude > self.bins[0].magnitude {
            (self.bins[1], self.bins[0])
        } else {
            (self.bins[0], self.bins[1])
        };

        for &bin in &self.bins[2..] {
            if bin.magnitude > best.magnitude {
                second = best;
                best = bin;
            } else if bin.magnitude > second.magnitude {
                second = bin;
            }
        }

        Some((best, second))
    }
}

/// Forward-DFT analyzer producing one-sided magnitude spectra.
///
/// The planner caches FFT setups across calls; concurrent callers each use
/// their own analyzer and signal buffers.
pub struct SpectralAnalyzer {
    planner: FftPlanner<f64>,
}

impl SpectralAnalyzer {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// Transform the full buffer and derive the one-sided magnitude spectrum.
    ///
    /// Magnitudes are scaled by `2 / N`, compensating for the discarded
    /// mirrored half of a real signal's spectrum. Arbitrary buffer lengths
    /// are supported; a length-1 buffer yields an empty spectrum.
    pub fn analyze(&mut self, signal: &Signal) -> Result<Spectrum> {
        if signal.is_empty() {
            return Err(Error::invalid_buffer("cannot analyze an empty signal"));
        }

        let n = signal.len();
        let fft = self.planner.plan_fft_forward(n);

        let mut buffer: Vec<Complex<f64>> = signal
            .samples()
            .iter()
            .map(|&s| Complex::new(s, 0.0))
            .collect();
        fft.process(&mut buffer);

        let resolution = signal.sample_rate() as f64 / n as f64;
        let scale = 2.0 / n as f64;
        let bins = buffer[..n / 2]
            .iter()
            .enumerate()
            .map(|(k, x)| SpectrumBin {
                frequency: k as f64 * resolution,
                magnitude: scale * x.norm(),
            })
            .collect();

        debug!(
            samples = n,
            sample_rate = signal.sample_rate(),
            resolution_hz = resolution,
            "computed one-sided spectrum"
        );

        Ok(Spectrum { bins, resolution })
    }
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ToneSynthesizer;
    use crate::tones::Key;

    use std::f64::consts::PI;

    fn sine(frequency: f64, sample_rate: u32, count: usize) -> Signal {
        let samples = (0..count)
            .map(|i| (2.0 * PI * frequency * i as f64 / sample_rate as f64).sin())
            .collect();
        Signal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let signal = Signal::new(Vec::new(), 8000).unwrap();
        let err = SpectralAnalyzer::new().analyze(&signal).unwrap_err();
        assert!(matches!(err, Error::InvalidBuffer(_)));
    }

    #[test]
    fn test_single_sample_does_not_crash() {
        let signal = Signal::new(vec![1.0], 8000).unwrap();
        let spectrum = SpectralAnalyzer::new().analyze(&signal).unwrap();
        assert!(spectrum.is_empty());
        assert!(spectrum.top_two().is_none());
    }

    #[test]
    fn test_bin_labeling() {
        let spectrum = SpectralAnalyzer::new().analyze(&sine(1000.0, 8000, 4000)).unwrap();
        assert_eq!(spectrum.len(), 2000);
        assert_eq!(spectrum.resolution(), 2.0);
        assert_eq!(spectrum.bins()[0].frequency, 0.0);
        assert_eq!(spectrum.bins()[1].frequency, 2.0);
        assert_eq!(spectrum.bins()[500].frequency, 1000.0);
    }

    #[test]
    fn test_magnitude_scaling_unit_sine() {
        // 1000 Hz lands exactly on bin 1000 of an 8000-sample transform, so
        // the 2/N scaling must recover the unit amplitude.
        let spectrum = SpectralAnalyzer::new().analyze(&sine(1000.0, 8000, 8000)).unwrap();
        let peak = spectrum.bins()[1000];
        assert_eq!(peak.frequency, 1000.0);
        assert!((peak.magnitude - 1.0).abs() < 1e-6, "magnitude {}", peak.magnitude);
    }

    #[test]
    fn test_odd_length_buffer() {
        let spectrum = SpectralAnalyzer::new().analyze(&sine(1000.0, 8000, 4001)).unwrap();
        assert_eq!(spectrum.len(), 2000);
        let (best, _) = spectrum.top_two().unwrap();
        assert!((best.frequency - 1000.0).abs() <= spectrum.resolution());
    }

    #[test]
    fn test_key_five_peaks() {
        // Key '5' at 8000 Hz for 0.5 s gives 2 Hz resolution;
        // the two strongest bins must sit within one bin of 770 and 1336 Hz.
        let signal = ToneSynthesizer::new(8000).synthesize(Key::Five, 0.5).unwrap();
        let spectrum = SpectralAnalyzer::new().analyze(&signal).unwrap();
        let (first, second) = spectrum.top_two().unwrap();

        let mut freqs = [first.frequency, second.frequency];
        freqs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((freqs[0] - 770.0).abs() <= 2.0, "low peak at {}", freqs[0]);
        assert!((freqs[1] - 1336.0).abs() <= 2.0, "high peak at {}", freqs[1]);
    }

    #[test]
    fn test_top_two_orders_by_magnitude() {
        let spectrum = Spectrum {
            bins: vec![
                SpectrumBin { frequency: 0.0, magnitude: 0.1 },
                SpectrumBin { frequency: 1.0, magnitude: 0.9 },
                SpectrumBin { frequency: 2.0, magnitude: 0.4 },
                SpectrumBin { frequency: 3.0, magnitude: 0.7 },
            ],
            resolution: 1.0,
        };
        let (best, second) = spectrum.top_two().unwrap();
        assert_eq!(best.frequency, 1.0);
        assert_eq!(second.frequency, 3.0);
    }

    #[test]
    fn test_top_two_tie_keeps_earliest_bin() {
        let spectrum = Spectrum {
            bins: vec![
                SpectrumBin { frequency: 0.0, magnitude: 0.5 },
                SpectrumBin { frequency: 1.0, magnitude: 0.5 },
                SpectrumBin { frequency: 2.0, magnitude: 0.5 },
            ],
            resolution: 1.0,
        };
        let (best, second) = spectrum.top_two().unwrap();
        assert_eq!(best.frequency, 0.0);
        assert_eq!(second.frequency, 1.0);
    }
}
