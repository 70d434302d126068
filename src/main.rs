//! DTMF engine command line tool

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;

use dtmf_engine::{
    audio,
    config::EngineConfig,
    pipeline::DecodePipeline,
    report::{AnalysisReport, FileReport},
    signal::ToneSynthesizer,
    utils::setup_logging,
    Key, Result,
};

#[derive(Parser)]
#[command(name = "dtmf-engine")]
#[command(about = "DTMF tone synthesis and detection")]
#[command(version = dtmf_engine::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a key and write it as a WAV file
    Synth {
        /// DTMF key: 0-9, *, #, or the aliases "asterisk"/"hashtag"
        key: String,
        /// Output WAV path
        #[arg(short, long, default_value = "tone.wav")]
        output: PathBuf,
        /// Tone duration in seconds (configured default when omitted)
        #[arg(short, long)]
        duration: Option<f64>,
        /// Sample rate in Hz (configured export rate when omitted)
        #[arg(short = 'r', long)]
        sample_rate: Option<u32>,
    },
    /// Synthesize a key and report its spectrum and identity
    Analyze {
        /// DTMF key: 0-9, *, #, or the aliases "asterisk"/"hashtag"
        key: String,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode the dominant DTMF key in a WAV file
    Decode {
        /// Input WAV path
        file: PathBuf,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration
    ValidateConfig,
    /// Generate default configuration
    GenerateConfig {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_configuration(&cli)?;
    let _log_guard = setup_logging(&config.logging)?;

    info!("Starting {} v{}", dtmf_engine::NAME, dtmf_engine::VERSION);

    match &cli.command {
        Commands::Synth {
            key,
            output,
            duration,
            sample_rate,
        } => synthesize_to_file(&config, key, output, *duration, *sample_rate),
        Commands::Analyze { key, json } => analyze_key(&config, key, *json),
        Commands::Decode { file, json } => decode_file(&config, file, *json),
        Commands::ValidateConfig => validate_configuration(&config),
        Commands::GenerateConfig { output } => generate_default_config(output.clone()),
    }
}

fn load_configuration(cli: &Cli) -> Result<EngineConfig> {
    let config = if let Some(config_path) = &cli.config {
        EngineConfig::load_from_file(config_path)?
    } else {
        match EngineConfig::load_from_env() {
            Ok(config) => config,
            Err(_) => EngineConfig::default_config(),
        }
    };

    config.validate()?;
    Ok(config)
}

fn synthesize_to_file(
    config: &EngineConfig,
    raw_key: &str,
    output: &PathBuf,
    duration: Option<f64>,
    sample_rate: Option<u32>,
) -> Result<()> {
    let key: Key = raw_key.parse()?;
    let duration = duration.unwrap_or(config.synthesis.duration_secs);
    let rate = sample_rate.unwrap_or(config.synthesis.export_sample_rate);

    let signal = ToneSynthesizer::new(rate).synthesize(key, duration)?;
    audio::export_wav(output, &signal)?;

    let pair = key.frequencies();
    println!(
        "{} Wrote {} ({} samples at {} Hz, {} + {} Hz)",
        "✓".green(),
        output.display(),
        signal.len(),
        rate,
        pair.low,
        pair.high
    );
    Ok(())
}

fn analyze_key(config: &EngineConfig, raw_key: &str, json: bool) -> Result<()> {
    let key: Key = raw_key.parse()?;

    let mut pipeline = DecodePipeline::new();
    let result = pipeline.decode_synthetic(
        key,
        config.synthesis.duration_secs,
        config.synthesis.playback_sample_rate,
    )?;
    let report = AnalysisReport::from_result(&result)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Key:         {}", key.to_string().as_str().bold());
    println!(
        "Tone pair:   {} Hz + {} Hz",
        result.detected.low, result.detected.high
    );
    println!(
        "Spectrum:    {} bins, {} Hz resolution",
        result.spectrum.len(),
        result.spectrum.resolution()
    );
    let identified: Vec<String> = result.keys.iter().map(|k| k.to_string()).collect();
    println!("{} Identified: {}", "✓".green(), identified.join(", "));
    Ok(())
}

fn decode_file(config: &EngineConfig, file: &PathBuf, json: bool) -> Result<()> {
    let signal = audio::import_wav_channel(file, config.decode.channel)?;

    let mut pipeline = DecodePipeline::new();
    let result = pipeline.decode_sampled(&signal)?;
    let report = FileReport::from_result(&result);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File:        {}", file.display());
    println!(
        "Signal:      {} samples at {} Hz",
        signal.len(),
        signal.sample_rate()
    );
    println!(
        "Detected:    {:.1} Hz + {:.1} Hz",
        result.detected.low, result.detected.high
    );
    match result.keys.first() {
        Some(key) => println!("{} Key: {}", "✓".green(), key.to_string().as_str().bold()),
        None => println!("{} No key matched", "✗".red()),
    }
    Ok(())
}

fn validate_configuration(config: &EngineConfig) -> Result<()> {
    config.validate()?;

    println!("{} Configuration is valid", "✓".green());
    println!("  Tone duration: {} s", config.synthesis.duration_secs);
    println!(
        "  Playback sample rate: {} Hz",
        config.synthesis.playback_sample_rate
    );
    println!(
        "  Export sample rate: {} Hz",
        config.synthesis.export_sample_rate
    );
    println!("  Import channel: {}", config.decode.channel);
    println!("  Log level: {}", config.logging.level);
    Ok(())
}

fn generate_default_config(output_path: Option<PathBuf>) -> Result<()> {
    let config = EngineConfig::default_config();
    let toml_content = toml::to_string_pretty(&config)
        .map_err(|e| dtmf_engine::Error::internal(format!("Failed to serialize config: {}", e)))?;

    match output_path {
        Some(path) => {
            std::fs::write(&path, toml_content)?;
            println!(
                "{} Default configuration written to: {}",
                "✓".green(),
                path.display()
            );
        }
        None => {
            println!("{}", toml_content);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_generation() {
        assert!(generate_default_config(None).is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = EngineConfig::default_config();
        assert!(validate_configuration(&config).is_ok());
    }

    #[test]
    fn test_unknown_key_produces_no_file() {
        let config = EngineConfig::default_config();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("never.wav");

        let result = synthesize_to_file(&config, "X", &output, None, None);
        assert!(matches!(result, Err(dtmf_engine::Error::UnknownKey(_))));
        assert!(!output.exists());
    }
}
