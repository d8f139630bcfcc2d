/*!
 * Test doubles for playback.
 *
 * - `RecordingSink` and `RecordingPacer` append to a shared `Timeline`, so
 *   tests see tones and silences in the order they were emitted without
 *   waiting in real time
 * - `FailingSink` refuses to open, like a missing sound device
 */

use std::sync::Arc;
use std::time::Duration;
use parking_lot::Mutex;

use super::pacer::{CancelToken, Pacer, Pause};
use crate::audio::{AudioSink, PcmFormat};
use crate::errors::AudioError;

/// A recorded emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    Tone(Duration),
    Silence(Duration),
}

impl Emission {
    pub fn duration(&self) -> Duration {
        match self {
            Self::Tone(d) | Self::Silence(d) => *d,
        }
    }
}

#[derive(Debug, Default)]
struct TimelineState {
    emissions: Vec<Emission>,
    opens: usize,
    closes: usize,
}

/// Shared, ordered record of what a playback emitted
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    state: Arc<Mutex<TimelineState>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink recording into this timeline
    pub fn sink(&self) -> RecordingSink {
        RecordingSink {
            timeline: self.clone(),
            format: None,
        }
    }

    /// Pacer recording into this timeline
    pub fn pacer(&self) -> RecordingPacer {
        RecordingPacer {
            timeline: self.clone(),
            token: CancelToken::new(),
            cancel_after: None,
        }
    }

    /// Everything emitted so far
    pub fn emissions(&self) -> Vec<Emission> {
        self.state.lock().emissions.clone()
    }

    pub fn tones(&self) -> Vec<Duration> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                Emission::Tone(d) => Some(d),
                Emission::Silence(_) => None,
            })
            .collect()
    }

    /// Simulated elapsed time
    pub fn elapsed(&self) -> Duration {
        self.state.lock().emissions.iter().map(Emission::duration).sum()
    }

    /// Number of times a sink was opened
    pub fn opens(&self) -> usize {
        self.state.lock().opens
    }

    /// Number of times a sink was closed
    pub fn closes(&self) -> usize {
        self.state.lock().closes
    }

    fn record(&self, emission: Emission) {
        self.state.lock().emissions.push(emission);
    }

    fn silences(&self) -> usize {
        self.state
            .lock()
            .emissions
            .iter()
            .filter(|e| matches!(e, Emission::Silence(_)))
            .count()
    }
}

/// Sink that records tone durations instead of playing them
#[derive(Debug)]
pub struct RecordingSink {
    timeline: Timeline,
    format: Option<PcmFormat>,
}

impl AudioSink for RecordingSink {
    fn open(&mut self, format: PcmFormat) -> Result<(), AudioError> {
        self.format = Some(format);
        self.timeline.state.lock().opens += 1;
        Ok(())
    }

    fn play_pcm(&mut self, pcm: &[u8]) -> Result<(), AudioError> {
        let format = self.format
            .ok_or_else(|| AudioError::Device("recording sink is not open".to_string()))?;
        self.timeline.record(Emission::Tone(format.duration_of(pcm)));
        Ok(())
    }

    fn close(&mut self) -> Result<(), AudioError> {
        self.format = None;
        self.timeline.state.lock().closes += 1;
        Ok(())
    }
}

/// Pacer that records silences and returns immediately
#[derive(Debug)]
pub struct RecordingPacer {
    timeline: Timeline,
    token: CancelToken,
    cancel_after: Option<usize>,
}

impl RecordingPacer {
    /// Cancel once this many silences have been recorded
    pub fn cancel_after(mut self, silences: usize) -> Self {
        self.cancel_after = Some(silences);
        self
    }

    /// Token the pacer reports cancellation from
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, duration: Duration) -> Pause {
        if self.token.is_cancelled() {
            return Pause::Cancelled;
        }
        if !duration.is_zero() {
            self.timeline.record(Emission::Silence(duration));
        }
        if let Some(limit) = self.cancel_after {
            if self.timeline.silences() >= limit {
                self.token.cancel();
                return Pause::Cancelled;
            }
        }
        Pause::Elapsed
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Sink whose output resource can never be acquired
#[derive(Debug, Default)]
pub struct FailingSink;

impl AudioSink for FailingSink {
    fn open(&mut self, _format: PcmFormat) -> Result<(), AudioError> {
        Err(AudioError::Unavailable("mock device is busy".to_string()))
    }

    fn play_pcm(&mut self, _pcm: &[u8]) -> Result<(), AudioError> {
        Err(AudioError::Device("mock device is not open".to_string()))
    }

    fn close(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}
