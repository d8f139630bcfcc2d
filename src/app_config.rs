use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;
use crate::player::MorseTiming;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Audio output backend
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackend {
    // @backend: No sound, timing only
    Null,
    // @backend: Render to a WAV file
    Wav,
    // @backend: Sound card through cpal
    Cpal,
}

impl AudioBackend {
    // @returns: Lowercase backend identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Wav => "wav".to_string(),
            Self::Cpal => "cpal".to_string(),
        }
    }
}

impl Default for AudioBackend {
    fn default() -> Self {
        if cfg!(feature = "audio-cpal") {
            Self::Cpal
        } else {
            Self::Null
        }
    }
}

// Implement Display trait for AudioBackend
impl std::fmt::Display for AudioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for AudioBackend
impl std::str::FromStr for AudioBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "null" | "none" => Ok(Self::Null),
            "wav" => Ok(Self::Wav),
            "cpal" | "speaker" => Ok(Self::Cpal),
            _ => Err(anyhow::anyhow!("Invalid audio backend: {}", s)),
        }
    }
}

/// Playback settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// Morse unit in milliseconds (dot length)
    #[serde(default = "default_unit_ms")]
    pub unit_ms: u64,

    /// Tone frequency in Hz
    #[serde(default = "default_frequency_hz")]
    pub frequency_hz: u32,

    /// Output sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Peak amplitude as a fraction of full scale (0.0 to 1.0)
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,

    /// Length of the anti-click ramp at each end of a tone
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,

    /// Where the audio goes
    #[serde(default)]
    pub backend: AudioBackend,

    /// Output file for the WAV backend
    #[serde(default = "default_wav_path")]
    pub wav_path: String,
}

impl PlaybackConfig {
    /// Unit length for a speed in words per minute
    pub fn unit_from_wpm(wpm: u32) -> u64 {
        MorseTiming::unit_ms_for_wpm(wpm)
    }

    /// Approximate speed of the configured unit
    pub fn wpm(&self) -> u64 {
        MorseTiming::wpm_for_unit_ms(self.unit_ms)
    }

    /// Validate the playback settings
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(1..=10_000).contains(&self.unit_ms) {
            return Err(invalid("unit_ms", format!("{} is outside 1..=10000 ms", self.unit_ms)));
        }
        if !(8_000..=192_000).contains(&self.sample_rate) {
            return Err(invalid("sample_rate", format!("{} is outside 8000..=192000 Hz", self.sample_rate)));
        }
        if !(20..=20_000).contains(&self.frequency_hz) {
            return Err(invalid("frequency_hz", format!("{} is outside 20..=20000 Hz", self.frequency_hz)));
        }
        if self.frequency_hz * 2 >= self.sample_rate {
            return Err(invalid(
                "frequency_hz",
                format!("{} Hz is above the Nyquist limit of {} Hz", self.frequency_hz, self.sample_rate / 2),
            ));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(invalid("amplitude", format!("{} is outside (0, 1]", self.amplitude)));
        }
        if self.backend == AudioBackend::Wav && self.wav_path.trim().is_empty() {
            return Err(invalid("wav_path", "WAV backend needs an output path".to_string()));
        }
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            unit_ms: default_unit_ms(),
            frequency_hz: default_frequency_hz(),
            sample_rate: default_sample_rate(),
            amplitude: default_amplitude(),
            fade_ms: default_fade_ms(),
            backend: AudioBackend::default(),
            wav_path: default_wav_path(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn default_unit_ms() -> u64 {
    60 // 20 WPM
}

fn default_frequency_hz() -> u32 {
    700
}

fn default_sample_rate() -> u32 {
    44_100
}

fn default_amplitude() -> f32 {
    0.7 // Headroom against clipping
}

fn default_fade_ms() -> u64 {
    4
}

fn default_wav_path() -> String {
    "morse.wav".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.playback.validate()
    }

    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Load the configuration, creating a default file if none exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }
}
