/*!
 * Morse timing and playback plans.
 *
 * All durations derive from a single unit:
 * - dot: 1 unit, dash: 3 units
 * - gap between elements of a character: 1 unit
 * - gap between characters: 3 units (1 already spent after the element + 2)
 * - gap between words: 7 units (1 already spent after the element + 6)
 */

use std::time::Duration;
use log::debug;

use crate::codec::{MorseDocument, DASH, DOT};

/// Standard PARIS word length in units, used to convert WPM to a unit
pub const PARIS_UNITS_PER_MINUTE: u64 = 1200;

/// Timing derived from a base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorseTiming {
    unit: Duration,
}

impl MorseTiming {
    /// Timing for a unit in milliseconds
    pub fn from_millis(unit_ms: u64) -> Self {
        Self { unit: Duration::from_millis(unit_ms) }
    }

    /// Timing for a speed in words per minute (PARIS standard)
    pub fn from_wpm(wpm: u32) -> Self {
        Self::from_millis(Self::unit_ms_for_wpm(wpm))
    }

    /// Unit length in milliseconds for a speed in words per minute
    pub fn unit_ms_for_wpm(wpm: u32) -> u64 {
        PARIS_UNITS_PER_MINUTE / u64::from(wpm.max(1))
    }

    /// Speed in words per minute for a unit in milliseconds
    pub fn wpm_for_unit_ms(unit_ms: u64) -> u64 {
        PARIS_UNITS_PER_MINUTE / unit_ms.max(1)
    }

    /// Base unit
    pub fn unit(&self) -> Duration {
        self.unit
    }

    pub fn dot(&self) -> Duration {
        self.unit
    }

    pub fn dash(&self) -> Duration {
        self.unit * 3
    }

    /// Silence after every element
    pub fn element_gap(&self) -> Duration {
        self.unit
    }

    /// Silence added after a character's element gap
    pub fn char_gap_extra(&self) -> Duration {
        self.unit * 2
    }

    /// Silence added after a word's element gap
    pub fn word_gap_extra(&self) -> Duration {
        self.unit * 6
    }

    /// Tone duration for a symbol glyph, `None` for anything unplayable
    pub fn tone_for(&self, symbol: char) -> Option<Duration> {
        match symbol {
            DOT => Some(self.dot()),
            DASH => Some(self.dash()),
            _ => None,
        }
    }
}

/// A single emission of a playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Tone at the playback frequency
    Tone(Duration),
    /// Silence
    Silence(Duration),
}

impl Segment {
    /// Length of the segment
    pub fn duration(&self) -> Duration {
        match self {
            Self::Tone(d) | Self::Silence(d) => *d,
        }
    }

    pub fn is_tone(&self) -> bool {
        matches!(self, Self::Tone(_))
    }
}

/// Ordered tone/silence emissions for a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackPlan {
    segments: Vec<Segment>,
}

impl PlaybackPlan {
    /// Build the plan for a tokenized document.
    ///
    /// Adjacent silences are merged, zero-length segments are dropped and the
    /// plan never starts or ends with a silence.
    pub fn build(document: &MorseDocument, timing: &MorseTiming) -> Self {
        let mut plan = Self::default();
        let words = document.words();

        for (word_index, word) in words.iter().enumerate() {
            for (char_index, token) in word.iter().enumerate() {
                for symbol in token.chars() {
                    if let Some(tone) = timing.tone_for(symbol) {
                        plan.push(Segment::Tone(tone));
                        plan.push(Segment::Silence(timing.element_gap()));
                    }
                }
                if char_index + 1 < word.len() {
                    plan.push(Segment::Silence(timing.char_gap_extra()));
                }
            }
            if word_index + 1 < words.len() {
                plan.push(Segment::Silence(timing.word_gap_extra()));
            }
        }

        while matches!(plan.segments.last(), Some(Segment::Silence(_))) {
            plan.segments.pop();
        }

        debug!("Built playback plan: {} segment(s), {:?} total",
               plan.segments.len(), plan.total_duration());

        plan
    }

    fn push(&mut self, segment: Segment) {
        if segment.duration().is_zero() {
            return;
        }
        match (self.segments.last_mut(), segment) {
            // Nothing to wait for before the first tone
            (None, Segment::Silence(_)) => {}
            (Some(Segment::Silence(current)), Segment::Silence(extra)) => *current += extra,
            _ => self.segments.push(segment),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of tone segments
    pub fn tone_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_tone()).count()
    }

    /// Sum of all segment durations
    pub fn total_duration(&self) -> Duration {
        self.segments.iter().map(Segment::duration).sum()
    }
}
