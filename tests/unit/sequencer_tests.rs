/*!
 * Tests for Morse timing, playback plans and the tone sequencer
 */

use morse_translator::codec::MorseDocument;
use morse_translator::player::mock::{Emission, FailingSink, Timeline};
use morse_translator::player::{MorseTiming, PlaybackOutcome, PlaybackPlan, Segment, ToneSequencer};
use crate::common::ms;

#[test]
fn test_play_withThreeDotsAt60ms_shouldAlternateWithoutTrailingSilence() {
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(60, timeline.sink(), timeline.pacer());

    let outcome = sequencer.play("...").unwrap();

    assert_eq!(outcome, PlaybackOutcome::Completed);
    assert_eq!(timeline.tones(), vec![ms(60), ms(60), ms(60)]);
    assert_eq!(timeline.emissions().last(), Some(&Emission::Tone(ms(60))));
    assert_eq!(timeline.emissions().len(), 5);
}

#[test]
fn test_play_withEAndT_shouldTakeSevenUnits() {
    let unit = 60;
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(unit, timeline.sink(), timeline.pacer());

    sequencer.play(". -").unwrap();

    // dot + element gap + extra character gap + dash
    let expected = unit + unit + 2 * unit + 3 * unit;
    assert_eq!(timeline.elapsed(), ms(expected));
    assert_eq!(timeline.elapsed(), ms(420));
    assert_eq!(timeline.emissions(), vec![
        Emission::Tone(ms(60)),
        Emission::Silence(ms(180)),
        Emission::Tone(ms(180)),
    ]);
}

#[test]
fn test_play_withTwoWords_shouldWaitSevenUnitsBetweenThem() {
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(10, timeline.sink(), timeline.pacer());

    sequencer.play(". / .").unwrap();

    assert_eq!(timeline.emissions(), vec![
        Emission::Tone(ms(10)),
        Emission::Silence(ms(70)),
        Emission::Tone(ms(10)),
    ]);
}

#[test]
fn test_play_withUnknownGlyphs_shouldSkipThemSilently() {
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(10, timeline.sink(), timeline.pacer());

    sequencer.play(".x-").unwrap();

    assert_eq!(timeline.tones(), vec![ms(10), ms(30)]);
    assert_eq!(timeline.elapsed(), ms(50));
}

#[test]
fn test_play_withSeparatorsOnly_shouldNotTouchTheSink() {
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(60, timeline.sink(), timeline.pacer());

    assert_eq!(sequencer.play(" / / ").unwrap(), PlaybackOutcome::Completed);
    assert_eq!(sequencer.play("").unwrap(), PlaybackOutcome::Completed);
    assert_eq!(timeline.opens(), 0);
    assert!(timeline.emissions().is_empty());
}

#[test]
fn test_play_withFailingSink_shouldReturnUnavailable() {
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(60, FailingSink, timeline.pacer());

    let error = sequencer.play("... --- ...").unwrap_err();

    assert!(error.is_unavailable());
    assert!(error.to_string().contains("unavailable"));
    assert!(timeline.emissions().is_empty());
}

#[test]
fn test_play_withCancellationMidMessage_shouldStopAndCloseSink() {
    let timeline = Timeline::new();
    let pacer = timeline.pacer().cancel_after(2);
    let mut sequencer = ToneSequencer::new(60, timeline.sink(), pacer);

    let outcome = sequencer.play("... --- ...").unwrap();

    assert_eq!(outcome, PlaybackOutcome::Cancelled);
    assert_eq!(timeline.tones().len(), 2);
    assert_eq!(timeline.opens(), 1);
    assert_eq!(timeline.closes(), 1);
}

#[test]
fn test_play_withCancelledToken_shouldNotStart() {
    let timeline = Timeline::new();
    let pacer = timeline.pacer();
    pacer.token().cancel();
    let mut sequencer = ToneSequencer::new(60, timeline.sink(), pacer);

    assert_eq!(sequencer.play("...").unwrap(), PlaybackOutcome::Cancelled);
    assert_eq!(timeline.opens(), 0);
}

#[test]
fn test_play_calledTwice_shouldOpenAndCloseEachTime() {
    let timeline = Timeline::new();
    let mut sequencer = ToneSequencer::new(10, timeline.sink(), timeline.pacer());

    sequencer.play(".").unwrap();
    sequencer.play("-").unwrap();

    assert_eq!(timeline.opens(), 2);
    assert_eq!(timeline.closes(), 2);
    assert_eq!(timeline.tones(), vec![ms(10), ms(30)]);
}

#[test]
fn test_plan_withSos_shouldTotalTwentySevenUnits() {
    let timing = MorseTiming::from_millis(10);
    let plan = PlaybackPlan::build(&MorseDocument::parse("... --- ..."), &timing);

    assert_eq!(plan.tone_count(), 9);
    assert_eq!(plan.total_duration(), ms(270));
    assert!(plan.segments().first().is_some_and(Segment::is_tone));
    assert!(plan.segments().last().is_some_and(Segment::is_tone));
}

#[test]
fn test_timing_fromWpm_shouldFollowParis() {
    assert_eq!(MorseTiming::from_wpm(20).unit(), ms(60));
    assert_eq!(MorseTiming::from_wpm(12).unit(), ms(100));
    assert_eq!(MorseTiming::from_wpm(0).unit(), ms(1200));
}

#[test]
fn test_timing_fromWpm_shouldAgreeWithPlaybackConfig() {
    use morse_translator::app_config::PlaybackConfig;

    for wpm in [1, 5, 12, 15, 20, 25, 40] {
        let unit_ms = PlaybackConfig::unit_from_wpm(wpm);
        assert_eq!(MorseTiming::from_wpm(wpm).unit(), ms(unit_ms));

        let config = PlaybackConfig { unit_ms, ..PlaybackConfig::default() };
        assert_eq!(config.wpm(), MorseTiming::wpm_for_unit_ms(unit_ms));
    }
    assert_eq!(PlaybackConfig { unit_ms: 60, ..PlaybackConfig::default() }.wpm(), 20);
}
