/*!
 * Common test utilities for the morse translator test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use std::time::Duration;
use anyhow::Result;
use tempfile::TempDir;

use morse_translator::app_config::{AudioBackend, Config};

/// Initialize logging once for tests that want to see it
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Configuration rendering to a WAV file with a short unit
pub fn wav_config(path: &Path, unit_ms: u64) -> Config {
    let mut config = Config::default();
    config.playback.backend = AudioBackend::Wav;
    config.playback.wav_path = path.to_string_lossy().to_string();
    config.playback.unit_ms = unit_ms;
    config
}

/// Shorthand for millisecond durations
pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Little-endian u32 at the given byte offset
pub fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

/// Little-endian u16 at the given byte offset
pub fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}
