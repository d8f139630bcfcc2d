/*!
 * Tone sequencer.
 *
 * Turns a Morse document into a playback plan and drives it through an
 * audio sink, waiting out silences with a pacer. Playback is sequential and
 * blocks the calling thread for as long as the message lasts.
 */

use std::collections::HashMap;
use std::time::Duration;
use log::{debug, info, warn};

use super::pacer::{Pacer, Pause};
use super::timing::{MorseTiming, PlaybackPlan, Segment};
use crate::app_config::PlaybackConfig;
use crate::audio::{AudioSink, ToneGenerator};
use crate::codec::MorseDocument;
use crate::errors::AudioError;

/// How a playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every segment was emitted
    Completed,
    /// Stopped early on request
    Cancelled,
}

/// Sequential Morse player
pub struct ToneSequencer<S: AudioSink, P: Pacer> {
    timing: MorseTiming,
    generator: ToneGenerator,
    sink: S,
    pacer: P,
    // Rendered tones by duration; a message only ever uses two
    tone_cache: HashMap<Duration, Vec<u8>>,
}

impl<S: AudioSink, P: Pacer> ToneSequencer<S, P> {
    /// Create a sequencer with the default tone and the given unit
    pub fn new(unit_ms: u64, sink: S, pacer: P) -> Self {
        Self::with_generator(MorseTiming::from_millis(unit_ms), ToneGenerator::default(), sink, pacer)
    }

    /// Create a sequencer with explicit timing and tone
    pub fn with_generator(timing: MorseTiming, generator: ToneGenerator, sink: S, pacer: P) -> Self {
        if timing.unit().is_zero() {
            warn!("Morse unit is zero, playback will be silent");
        }
        Self {
            timing,
            generator,
            sink,
            pacer,
            tone_cache: HashMap::new(),
        }
    }

    /// Create a sequencer from playback settings
    pub fn from_config(config: &PlaybackConfig, sink: S, pacer: P) -> Self {
        Self::with_generator(
            MorseTiming::from_millis(config.unit_ms),
            ToneGenerator::from_config(config),
            sink,
            pacer,
        )
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Plan the emissions for a Morse string without playing anything
    pub fn plan(&self, morse: &str) -> PlaybackPlan {
        PlaybackPlan::build(&MorseDocument::parse(morse), &self.timing)
    }

    /// Play a Morse string to completion or cancellation
    pub fn play(&mut self, morse: &str) -> Result<PlaybackOutcome, AudioError> {
        self.play_observed(morse, |_, _| {})
    }

    /// Play a Morse string, calling `observer` after each emitted segment
    pub fn play_observed<F>(&mut self, morse: &str, observer: F) -> Result<PlaybackOutcome, AudioError>
    where
        F: FnMut(usize, &Segment),
    {
        let plan = self.plan(morse);
        self.play_plan(&plan, observer)
    }

    /// Play a prepared plan
    pub fn play_plan<F>(&mut self, plan: &PlaybackPlan, mut observer: F) -> Result<PlaybackOutcome, AudioError>
    where
        F: FnMut(usize, &Segment),
    {
        if plan.is_empty() {
            debug!("Nothing to play");
            return Ok(PlaybackOutcome::Completed);
        }
        if self.pacer.is_cancelled() {
            return Ok(PlaybackOutcome::Cancelled);
        }

        if let Err(e) = self.sink.open(self.generator.format()) {
            warn!("Could not acquire audio output: {}", e);
            return Err(e);
        }

        info!("Playing {} tone(s) over {:?}", plan.tone_count(), plan.total_duration());
        let result = self.emit(plan, &mut observer);
        let closed = self.sink.close();

        let outcome = result?;
        closed?;

        if outcome == PlaybackOutcome::Cancelled {
            info!("Playback cancelled");
        }
        Ok(outcome)
    }

    fn emit<F>(&mut self, plan: &PlaybackPlan, observer: &mut F) -> Result<PlaybackOutcome, AudioError>
    where
        F: FnMut(usize, &Segment),
    {
        for (index, segment) in plan.segments().iter().enumerate() {
            if self.pacer.is_cancelled() {
                return Ok(PlaybackOutcome::Cancelled);
            }

            match *segment {
                Segment::Tone(duration) => {
                    let generator = &self.generator;
                    let pcm = self.tone_cache
                        .entry(duration)
                        .or_insert_with(|| generator.render_pcm(duration));
                    self.sink.play_pcm(pcm)?;
                }
                Segment::Silence(duration) => {
                    if self.sink.renders_silence() {
                        let pcm = self.generator.silence_pcm(duration);
                        self.sink.play_pcm(&pcm)?;
                    } else if self.pacer.pause(duration) == Pause::Cancelled {
                        return Ok(PlaybackOutcome::Cancelled);
                    }
                }
            }

            observer(index, segment);
        }

        Ok(PlaybackOutcome::Completed)
    }
}
