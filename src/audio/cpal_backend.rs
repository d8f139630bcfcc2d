//! Sound card sink on top of cpal
//!
//! The output stream pulls from a shared sample queue. `play_pcm` pushes a
//! buffer and blocks until the callback has drained it.
//!
//! The device runs at the tone's rate when it supports it. Otherwise it runs
//! at its default rate and buffers are resampled on the way in.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use log::{debug, error, info};
use parking_lot::Mutex;

use super::{resample_linear, AudioSink, PcmFormat};
use crate::errors::AudioError;

/// Poll interval while waiting for the queue to drain
const DRAIN_POLL: Duration = Duration::from_millis(2);

type SampleQueue = Arc<Mutex<VecDeque<f32>>>;

/// Sink playing through the default output device
pub struct CpalSink {
    queue: SampleQueue,
    stream: Option<cpal::Stream>,
    // (tone rate, device rate) while open
    rates: Option<(u32, u32)>,
}

impl CpalSink {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            stream: None,
            rates: None,
        }
    }

    // Prefer a config running at the tone's own rate, f32 first
    fn choose_config(device: &cpal::Device, sample_rate: u32) -> Result<cpal::SupportedStreamConfig, AudioError> {
        let matching = device
            .supported_output_configs()
            .ok()
            .and_then(|configs| {
                configs
                    .filter(|range| {
                        range.min_sample_rate().0 <= sample_rate && sample_rate <= range.max_sample_rate().0
                    })
                    .filter(|range| {
                        matches!(range.sample_format(), SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16)
                    })
                    .max_by_key(|range| range.sample_format() == SampleFormat::F32)
            })
            .map(|range| range.with_sample_rate(cpal::SampleRate(sample_rate)));

        match matching {
            Some(config) => Ok(config),
            None => device
                .default_output_config()
                .map_err(|e| AudioError::Unavailable(e.to_string())),
        }
    }

    fn build_stream<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        queue: SampleQueue,
    ) -> Result<cpal::Stream, cpal::BuildStreamError>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = usize::from(config.channels);
        device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let mut queue = queue.lock();
                for frame in data.chunks_mut(channels) {
                    let sample = T::from_sample(queue.pop_front().unwrap_or(0.0));
                    for out in frame.iter_mut() {
                        *out = sample;
                    }
                }
            },
            move |err| error!("Audio stream error: {}", err),
            None,
        )
    }
}

impl Default for CpalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for CpalSink {
    fn open(&mut self, format: PcmFormat) -> Result<(), AudioError> {
        if format.channels != 1 || format.bits_per_sample != 16 {
            return Err(AudioError::Format("cpal sink expects mono 16-bit PCM".to_string()));
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::Unavailable("no default output device".to_string()))?;
        let supported = Self::choose_config(&device, format.sample_rate)?;
        let config = supported.config();
        let device_rate = config.sample_rate.0;

        let queue = Arc::clone(&self.queue);
        let stream = match supported.sample_format() {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, queue),
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, queue),
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, queue),
            other => {
                return Err(AudioError::Unavailable(format!("unsupported device sample format {:?}", other)));
            }
        }
        .map_err(|e| AudioError::Unavailable(e.to_string()))?;

        stream.play().map_err(|e| AudioError::Unavailable(e.to_string()))?;

        if device_rate != format.sample_rate {
            info!("Sound card runs at {} Hz, resampling from {} Hz", device_rate, format.sample_rate);
        }
        debug!("Opened sound card output ({} Hz, {} channel(s), {:?})",
               device_rate, config.channels, supported.sample_format());
        self.stream = Some(stream);
        self.rates = Some((format.sample_rate, device_rate));
        Ok(())
    }

    fn play_pcm(&mut self, pcm: &[u8]) -> Result<(), AudioError> {
        let Some((tone_rate, device_rate)) = self.rates else {
            return Err(AudioError::Device("cpal sink is not open".to_string()));
        };

        let samples: Vec<f32> = pcm
            .chunks_exact(2)
            .map(|b| f32::from(i16::from_le_bytes([b[0], b[1]])) / f32::from(i16::MAX))
            .collect();
        let samples = resample_linear(&samples, tone_rate, device_rate);

        self.queue.lock().extend(samples);

        while !self.queue.lock().is_empty() {
            std::thread::sleep(DRAIN_POLL);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        self.rates = None;
        if let Some(stream) = self.stream.take() {
            // Let the device play out what it already pulled
            std::thread::sleep(DRAIN_POLL * 10);
            stream.pause().map_err(|e| AudioError::Device(e.to_string()))?;
        }
        self.queue.lock().clear();
        Ok(())
    }
}
