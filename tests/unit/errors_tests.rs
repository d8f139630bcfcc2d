/*!
 * Tests for error types and conversions
 */

use morse_translator::errors::{AppError, AudioError, ConfigError};

#[test]
fn test_audioError_unavailable_shouldDisplayCorrectly() {
    let error = AudioError::Unavailable("no default output device".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Audio output unavailable"));
    assert!(display.contains("no default output device"));
    assert!(error.is_unavailable());
}

#[test]
fn test_audioError_device_shouldNotCountAsUnavailable() {
    let error = AudioError::Device("stream stalled".to_string());
    assert!(!error.is_unavailable());
    assert!(format!("{}", error).contains("stream stalled"));
}

#[test]
fn test_audioError_fromIoError_shouldWrapCorrectly() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    let error: AudioError = io_error.into();
    assert!(matches!(error, AudioError::Io(_)));
    assert!(format!("{}", error).contains("disk full"));
}

#[test]
fn test_configError_invalid_shouldNameTheField() {
    let error = ConfigError::Invalid { field: "unit_ms", reason: "0 is outside 1..=10000 ms".to_string() };
    let display = format!("{}", error);
    assert!(display.contains("unit_ms"));
    assert!(display.contains("outside"));
}

#[test]
fn test_appError_fromAudioError_shouldWrapCorrectly() {
    let app_error: AppError = AudioError::Format("8-bit".to_string()).into();
    assert!(matches!(app_error, AppError::Audio(AudioError::Format(_))));
    assert!(format!("{}", app_error).contains("Audio error"));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(_)));
    assert!(format!("{}", app_error).contains("something odd"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "morse.json");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}

#[test]
fn test_audioError_throughAnyhow_shouldDowncast() {
    let error = anyhow::Error::new(AudioError::Unavailable("busy".to_string()));
    let audio_error = error.downcast_ref::<AudioError>();
    assert!(audio_error.is_some_and(AudioError::is_unavailable));
}
