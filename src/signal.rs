//! Discrete-time signal buffers and DTMF tone synthesis

use std::f64::consts::PI;

use crate::tones::Key;
use crate::{Error, Result};

/// A sampled audio buffer and its sample rate.
///
/// Immutable once produced; owned solely by the call that created it.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Signal {
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::signal("sample rate must be positive"));
        }
        Ok(Self { samples, sample_rate })
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Time instant of sample `i`, `t_i = i / sample_rate`.
    pub fn time_at(&self, i: usize) -> f64 {
        i as f64 / self.sample_rate as f64
    }
}

/// Two-tone DTMF synthesizer for a fixed output sample rate.
///
/// Output is the unweighted superposition `sin(2π f_low t) + sin(2π f_high t)`,
/// so samples span [-2, 2]. Export adapters normalize for their container.
#[derive(Debug, Clone, Copy)]
pub struct ToneSynthesizer {
    sample_rate: u32,
}

impl ToneSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Generate `floor(sample_rate * duration_secs)` samples of the two-tone
    /// signal for `key`. Pure and deterministic.
    pub fn synthesize(&self, key: Key, duration_secs: f64) -> Result<Signal> {
        if self.sample_rate == 0 {
            return Err(Error::signal("sample rate must be positive"));
        }
        if !(duration_secs > 0.0) {
            return Err(Error::signal(format!(
                "duration must be positive, got {}",
                duration_secs
            )));
        }

        let pair = key.frequencies();
        let sample_count = (self.sample_rate as f64 * duration_secs).floor() as usize;
        let rate = self.sample_rate as f64;

        let mut samples = Vec::with_capacity(sample_count);
        for i in 0..sample_count {
            let t = i as f64 / rate;
            samples.push((2.0 * PI * pair.low * t).sin() + (2.0 * PI * pair.high * t).sin());
        }

        Signal::new(samples, self.sample_rate)
    }
}
