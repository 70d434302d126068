//! WAV container import/export
//!
//! Thin adapters between 16-bit PCM WAV files and the engine's `Signal`
//! buffers. Normalization and channel selection happen here, never in the
//! core.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::debug;

use crate::signal::Signal;
use crate::{Error, Result};

/// Write `signal` as a mono 16-bit PCM WAV file at its own sample rate.
///
/// Samples are peak-normalized with `round(s / max|s| * 32767)` and clamped
/// to the i16 range; an all-zero signal is written as silence.
pub fn export_wav<P: AsRef<Path>>(path: P, signal: &Signal) -> Result<()> {
    if signal.is_empty() {
        return Err(Error::invalid_buffer("cannot export an empty signal"));
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let peak = signal
        .samples()
        .iter()
        .fold(0.0f64, |acc, s| acc.max(s.abs()));
    let scale = if peak > 0.0 { i16::MAX as f64 / peak } else { 0.0 };

    let mut writer = WavWriter::create(&path, spec)
        .map_err(|e| Error::audio(format!("failed to create WAV file: {}", e)))?;
    for &sample in signal.samples() {
        let value = (sample * scale)
            .round()
            .clamp(i16::MIN as f64, i16::MAX as f64) as i16;
        writer
            .write_sample(value)
            .map_err(|e| Error::audio(format!("failed to write WAV sample: {}", e)))?;
    }
    writer
        .finalize()
        .map_err(|e| Error::audio(format!("failed to finalize WAV file: {}", e)))?;

    debug!(
        path = %path.as_ref().display(),
        samples = signal.len(),
        sample_rate = signal.sample_rate(),
        "exported WAV file"
    );
    Ok(())
}

/// Read channel 0 of a 16-bit PCM WAV file into a `Signal`.
pub fn import_wav<P: AsRef<Path>>(path: P) -> Result<Signal> {
    import_wav_channel(path, 0)
}

/// Read one channel of a 16-bit PCM WAV file into a `Signal`.
///
/// Multi-channel input is subsampled by stride: every `channels`-th sample
/// starting at `channel`, no mixing. Raw i16 values are widened to f64.
pub fn import_wav_channel<P: AsRef<Path>>(path: P, channel: u16) -> Result<Signal> {
    let mut reader = WavReader::open(&path)
        .map_err(|e| Error::audio(format!("failed to open WAV file: {}", e)))?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::audio(format!(
            "unsupported WAV format: {}-bit {:?}, expected 16-bit PCM",
            spec.bits_per_sample, spec.sample_format
        )));
    }
    if channel >= spec.channels {
        return Err(Error::audio(format!(
            "channel {} out of range for {}-channel file",
            channel, spec.channels
        )));
    }

    let stride = spec.channels as usize;
    let samples = reader
        .samples::<i16>()
        .skip(channel as usize)
        .step_by(stride)
        .map(|s| {
            s.map(f64::from)
                .map_err(|e| Error::audio(format!("corrupt WAV data: {}", e)))
        })
        .collect::<Result<Vec<f64>>>()?;

    debug!(
        path = %path.as_ref().display(),
        channels = spec.channels,
        channel,
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        "imported WAV file"
    );

    Signal::new(samples, spec.sample_rate)
}
