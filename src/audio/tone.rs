//! Sine tone synthesis for Morse playback
//!
//! Lookup table sine with a 32-bit phase accumulator, scaled to a fixed
//! amplitude and shaped by a short linear fade at both ends of every tone
//! to avoid key clicks. Output is mono signed 16-bit PCM.

use std::time::Duration;
use once_cell::sync::Lazy;

use super::{PcmFormat, BYTES_PER_SAMPLE};
use crate::app_config::PlaybackConfig;

/// Number of entries in the sine LUT (power of two)
pub const LUT_SIZE: usize = 4096;

/// Bits of the phase accumulator used as LUT index
const LUT_BITS: u32 = 12;

/// One full sine cycle at full i16 scale
static SINE_LUT: Lazy<Vec<f32>> = Lazy::new(|| {
    (0..LUT_SIZE)
        .map(|i| (i as f64 * std::f64::consts::TAU / LUT_SIZE as f64).sin() as f32)
        .collect()
});

/// Default tone frequency in Hz
pub const DEFAULT_FREQUENCY_HZ: u32 = 700;

/// Default sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default amplitude as a fraction of full scale
pub const DEFAULT_AMPLITUDE: f32 = 0.7;

/// Tone generator
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    /// Output sample rate
    sample_rate: u32,
    /// Phase increment per sample (determines frequency)
    phase_inc: u32,
    /// Peak amplitude in i16 units
    peak: f32,
    /// Fade length in samples at each end of a tone
    fade_samples: usize,
}

impl ToneGenerator {
    /// Create a new tone generator
    ///
    /// # Arguments
    /// * `freq_hz` - Tone frequency in Hz
    /// * `sample_rate` - Output sample rate in Hz
    /// * `amplitude` - Peak level as a fraction of full scale, clamped to 0..=1
    /// * `fade` - Ramp length at the start and end of each tone
    pub fn new(freq_hz: u32, sample_rate: u32, amplitude: f32, fade: Duration) -> Self {
        let sample_rate = sample_rate.max(1);
        Self {
            sample_rate,
            phase_inc: Self::calc_phase_inc(freq_hz, sample_rate),
            peak: amplitude.clamp(0.0, 1.0) * f32::from(i16::MAX),
            fade_samples: PcmFormat::mono_16(sample_rate).frames_for(fade),
        }
    }

    /// Build a generator from the playback settings
    pub fn from_config(config: &PlaybackConfig) -> Self {
        Self::new(
            config.frequency_hz,
            config.sample_rate,
            config.amplitude,
            Duration::from_millis(config.fade_ms),
        )
    }

    /// phase_inc = (freq * 2^32) / sample_rate
    #[inline]
    fn calc_phase_inc(freq_hz: u32, sample_rate: u32) -> u32 {
        ((u64::from(freq_hz) << 32) / u64::from(sample_rate)) as u32
    }

    /// PCM format produced by this generator
    pub fn format(&self) -> PcmFormat {
        PcmFormat::mono_16(self.sample_rate)
    }

    /// Number of samples in a tone of the given duration
    pub fn samples_for(&self, duration: Duration) -> usize {
        self.format().frames_for(duration)
    }

    /// Render a tone starting at phase zero
    pub fn render(&self, duration: Duration) -> Vec<i16> {
        let count = self.samples_for(duration);
        // The ramp never takes more than half of a tone
        let fade = self.fade_samples.min(count / 2);
        let mut phase: u32 = 0;

        (0..count)
            .map(|i| {
                let index = (phase >> (32 - LUT_BITS)) as usize;
                phase = phase.wrapping_add(self.phase_inc);

                let envelope = if fade == 0 {
                    1.0
                } else if i < fade {
                    i as f32 / fade as f32
                } else if i >= count - fade {
                    (count - 1 - i) as f32 / fade as f32
                } else {
                    1.0
                };

                (SINE_LUT[index] * self.peak * envelope) as i16
            })
            .collect()
    }

    /// Render a tone as little-endian PCM bytes
    pub fn render_pcm(&self, duration: Duration) -> Vec<u8> {
        let samples = self.render(duration);
        let mut pcm = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE);
        for sample in samples {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
        pcm
    }

    /// Render silence as little-endian PCM bytes
    pub fn silence_pcm(&self, duration: Duration) -> Vec<u8> {
        vec![0u8; self.samples_for(duration) * BYTES_PER_SAMPLE]
    }
}

impl Default for ToneGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY_HZ, DEFAULT_SAMPLE_RATE, DEFAULT_AMPLITUDE, Duration::ZERO)
    }
}
