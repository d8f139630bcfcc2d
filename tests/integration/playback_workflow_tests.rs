/*!
 * Integration tests for the encode, plan and play workflow
 */

use std::thread;
use std::time::Instant;
use anyhow::Result;
use morse_translator::app_controller::Controller;
use morse_translator::audio::{NullSink, WavSink};
use morse_translator::codec::encode;
use morse_translator::player::mock::Timeline;
use morse_translator::player::{CancelToken, PlaybackOutcome, ThreadPacer, ToneSequencer};
use crate::common::{self, ms, read_u32_le};

/// Rendering SOS to a WAV file keeps the exact message length, silences included
#[test]
fn test_controller_withWavBackend_shouldRenderWholeMessage() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("sos.wav");
    let controller = Controller::with_config(common::wav_config(&path, 10))?.with_progress(false);

    let morse = controller.encode("sos");
    let outcome = tokio_test::block_on(controller.play(&morse, CancelToken::new()))?;

    assert_eq!(outcome, PlaybackOutcome::Completed);
    let bytes = std::fs::read(&path)?;
    // 27 units of 441 samples, two bytes each
    let expected_data = 27 * 441 * 2;
    assert_eq!(read_u32_le(&bytes, 40), expected_data);
    assert_eq!(bytes.len() as u32, 44 + expected_data);
    Ok(())
}

#[test]
fn test_wavSink_withRecordingPacer_shouldNeverAskThePacerToWait() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(10, WavSink::new(temp_dir.path().join("e.wav")), timeline.pacer());

    sequencer.play(". / .")?;

    // Silences went into the file instead
    assert!(timeline.emissions().is_empty());
    assert_eq!(sequencer.sink().data_len(), (1 + 7 + 1) * 441 * 2);
    Ok(())
}

#[test]
fn test_encodedText_throughRecordingTimeline_shouldMatchUnitArithmetic() {
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(20, timeline.sink(), timeline.pacer());

    // "E T" as two words: dot, word gap, dash
    sequencer.play(&encode("E T")).unwrap();

    assert_eq!(timeline.elapsed(), ms(20 + 7 * 20 + 3 * 20));
}

/// Cancelling from another thread stops a real-time playback early
#[test]
fn test_threadPacer_cancelledFromAnotherThread_shouldStopEarly() {
    let token = CancelToken::new();
    let mut sequencer = ToneSequencer::new(20, NullSink::new(), ThreadPacer::new(token.clone()));

    let canceller = thread::spawn(move || {
        thread::sleep(ms(100));
        token.cancel();
    });

    let started = Instant::now();
    // Close to 2 s when played to the end
    let outcome = sequencer.play(&encode("paris paris")).unwrap();
    canceller.join().unwrap();

    assert_eq!(outcome, PlaybackOutcome::Cancelled);
    assert!(started.elapsed() < ms(1_000));
}
