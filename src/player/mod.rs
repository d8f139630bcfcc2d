/*!
 * Morse playback.
 *
 * - `timing`: unit ratios and the tone/silence plan for a document
 * - `pacer`: the waiting primitive and cancellation
 * - `sequencer`: drives a plan through an audio sink
 * - `mock`: recording sink and pacer for tests
 */

// Re-export main types for easier usage
pub use self::pacer::{CancelToken, Pacer, Pause, ThreadPacer};
pub use self::sequencer::{PlaybackOutcome, ToneSequencer};
pub use self::timing::{MorseTiming, PlaybackPlan, Segment};

// Submodules
pub mod mock;
pub mod pacer;
pub mod sequencer;
pub mod timing;
