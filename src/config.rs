//! Configuration management for the DTMF engine

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub synthesis: SynthesisConfig,
    pub decode: DecodeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Default tone length in seconds.
    pub duration_secs: f64,
    /// Sample rate for the interactive playback path.
    pub playback_sample_rate: u32,
    /// Sample rate for exported WAV files.
    pub export_sample_rate: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Channel taken from multi-channel imports.
    pub channel: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "compact")]
    Compact,
    #[serde(rename = "full")]
    Full,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            duration_secs: 0.5,
            playback_sample_rate: 8000,
            export_sample_rate: 44100,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { channel: 0 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: LogFormat::Compact,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig =
            toml::from_str(&contents).map_err(|e| Error::parse(format!("Invalid TOML: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables with a `DTMF_` prefix.
    pub fn load_from_env() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("DTMF").separator("_"))
            .build()?;
        let engine_config = settings.try_deserialize()?;
        Ok(engine_config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.synthesis.duration_secs > 0.0) {
            return Err(Error::parse("Tone duration must be positive"));
        }
        if self.synthesis.playback_sample_rate == 0 || self.synthesis.export_sample_rate == 0 {
            return Err(Error::parse("Sample rates must be positive"));
        }
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::parse("Invalid log level")),
        }
        Ok(())
    }

    pub fn default_config() -> Self {
        Self {
            synthesis: SynthesisConfig::default(),
            decode: DecodeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
