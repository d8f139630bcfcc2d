/*!
 * Audio output for Morse playback.
 *
 * This module contains the sink abstraction and its implementations:
 * - `tone`: sine tone synthesis into 16-bit PCM
 * - `wav`: sink that renders playback into a RIFF/WAVE file
 * - `cpal_backend`: sound card sink (feature `audio-cpal`)
 * - `NullSink`: no sound, only paces through the audio
 */

use std::time::Duration;
use log::debug;

use crate::app_config::{AudioBackend, PlaybackConfig};
use crate::errors::AudioError;

pub mod tone;
pub mod wav;

#[cfg(feature = "audio-cpal")]
mod cpal_backend;
#[cfg(feature = "audio-cpal")]
pub use cpal_backend::CpalSink;

pub use tone::ToneGenerator;
pub use wav::WavSink;

/// Bytes per 16-bit sample
pub const BYTES_PER_SAMPLE: usize = 2;

/// Raw PCM layout: mono, signed 16-bit little-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    /// Samples per second
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
}

impl PcmFormat {
    /// Mono 16-bit format at the given rate
    pub fn mono_16(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            channels: 1,
            bits_per_sample: 16,
        }
    }

    /// Bytes per second of audio in this format
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.channels) * u32::from(self.bits_per_sample / 8)
    }

    /// Number of frames needed for a duration, truncated to whole frames
    pub fn frames_for(&self, duration: Duration) -> usize {
        (duration.as_millis() as u64 * u64::from(self.sample_rate) / 1000) as usize
    }

    /// Playback duration of a PCM buffer in this format
    pub fn duration_of(&self, pcm: &[u8]) -> Duration {
        let frame_bytes = usize::from(self.channels) * usize::from(self.bits_per_sample / 8);
        if frame_bytes == 0 || self.sample_rate == 0 {
            return Duration::ZERO;
        }
        let frames = (pcm.len() / frame_bytes) as u64;
        Duration::from_micros(frames * 1_000_000 / u64::from(self.sample_rate))
    }
}

/// Destination for rendered PCM audio
pub trait AudioSink {
    /// Acquire the output resource for the given format
    fn open(&mut self, format: PcmFormat) -> Result<(), AudioError>;

    /// Play a buffer of little-endian PCM, blocking until it has been played
    fn play_pcm(&mut self, pcm: &[u8]) -> Result<(), AudioError>;

    /// Release the output resource
    fn close(&mut self) -> Result<(), AudioError>;

    /// Whether silences must be written as zero samples instead of waited out
    fn renders_silence(&self) -> bool {
        false
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn open(&mut self, format: PcmFormat) -> Result<(), AudioError> {
        (**self).open(format)
    }

    fn play_pcm(&mut self, pcm: &[u8]) -> Result<(), AudioError> {
        (**self).play_pcm(pcm)
    }

    fn close(&mut self) -> Result<(), AudioError> {
        (**self).close()
    }

    fn renders_silence(&self) -> bool {
        (**self).renders_silence()
    }
}

/// Null backend (no sound, sleeps through each buffer so timing feels real)
#[derive(Debug, Default)]
pub struct NullSink {
    format: Option<PcmFormat>,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for NullSink {
    fn open(&mut self, format: PcmFormat) -> Result<(), AudioError> {
        self.format = Some(format);
        Ok(())
    }

    fn play_pcm(&mut self, pcm: &[u8]) -> Result<(), AudioError> {
        let format = self.format
            .ok_or_else(|| AudioError::Device("null sink is not open".to_string()))?;
        std::thread::sleep(format.duration_of(pcm));
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        self.format = None;
        Ok(())
    }
}

/// Convert normalized samples between rates by linear interpolation.
///
/// Used when an output device cannot run at the rate a tone was rendered at.
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }

    let out_len = (samples.len() as u64 * u64::from(to_rate) / u64::from(from_rate)) as usize;
    let step = f64::from(from_rate) / f64::from(to_rate);
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let position = i as f64 * step;
            let index = (position as usize).min(last);
            let next = (index + 1).min(last);
            let frac = (position - index as f64) as f32;
            samples[index] + (samples[next] - samples[index]) * frac
        })
        .collect()
}

/// Factory: build the sink selected by the playback configuration
pub fn create_sink(config: &PlaybackConfig) -> Result<Box<dyn AudioSink>, AudioError> {
    debug!("Creating {} audio sink", config.backend);
    match config.backend {
        AudioBackend::Null => Ok(Box::new(NullSink::new())),
        AudioBackend::Wav => Ok(Box::new(WavSink::new(&config.wav_path))),
        AudioBackend::Cpal => {
            #[cfg(feature = "audio-cpal")]
            {
                Ok(Box::new(CpalSink::new()))
            }
            #[cfg(not(feature = "audio-cpal"))]
            {
                log::warn!("Sound card output requested but this build has no 'audio-cpal' support");
                Err(AudioError::Unavailable(
                    "sound card support was not compiled in (enable the 'audio-cpal' feature)".to_string(),
                ))
            }
        }
    }
}
