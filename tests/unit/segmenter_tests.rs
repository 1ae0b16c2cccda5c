/*!
 * Tests for pause-based scene segmentation
 */

use scenesage::errors::SceneError;
use scenesage::scenes::{segment, SceneSegmenter, SegmenterState, DEFAULT_PAUSE_THRESHOLD_SECS};
use scenesage::subtitle_processor::{SrtParser, SubtitleEntry};
use crate::common;

#[test]
fn test_segment_withPlan9Opening_shouldProduceSingleScene() {
    let cues = SrtParser::parse_str(common::PLAN9_OPENING_SRT);

    let scenes = segment(&cues, DEFAULT_PAUSE_THRESHOLD_SECS).unwrap();

    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].start_ms, 22_719);
    assert_eq!(scenes[0].end_ms, 48_072);
    assert_eq!(scenes[0].cue_count, 5);
    assert_eq!(
        scenes[0].transcript,
        "Greetings, my friend. We are all interested in the future, for that is where you and I \
are going to spend the rest of our lives. And remember, my friend, future events such as these \
will affect you in the future."
    );
}

#[test]
fn test_segment_withFiveSecondGap_shouldSplitIntoTwoScenes() {
    let cues = SrtParser::parse_str(common::TWO_SCENES_SRT);

    let scenes = segment(&cues, 4.0).unwrap();

    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].transcript, "Who goes there? A friend.");
    assert_eq!((scenes[0].start_ms, scenes[0].end_ms), (1_000, 5_000));
    assert_eq!(scenes[1].transcript, "Ils sont arrivés à l'aube. Nobody saw them land.");
    assert_eq!((scenes[1].start_ms, scenes[1].end_ms), (10_000, 14_000));
}

#[test]
fn test_segment_withGapEqualToThreshold_shouldSplit() {
    let scenes = segment(&common::cues_with_gaps(&[4_000]), 4.0).unwrap();
    assert_eq!(scenes.len(), 2);

    let scenes = segment(&common::cues_with_gaps(&[3_999]), 4.0).unwrap();
    assert_eq!(scenes.len(), 1);
}

#[test]
fn test_segment_withNoCues_shouldReturnNoScenes() {
    assert!(segment(&[], 4.0).unwrap().is_empty());
}

#[test]
fn test_segment_withOverlappingCues_shouldNeverSplit() {
    let cues = common::cues(&[(0, 5_000, "a"), (2_000, 3_000, "b"), (3_200, 4_000, "c")]);

    let scenes = segment(&cues, 0.5).unwrap();

    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].transcript, "a b c");
    // End comes from the last cue folded in, not the latest end seen
    assert_eq!(scenes[0].end_ms, 4_000);
}

#[test]
fn test_segment_withVariousGaps_shouldPartitionEveryCue() {
    let gaps: Vec<u64> = (0..60).map(|i| (i * 7_919) % 9_000).collect();
    let cues = common::cues_with_gaps(&gaps);

    for threshold in [0.5, 1.0, 2.5, 4.0, 6.0, 10.0] {
        let scenes = segment(&cues, threshold).unwrap();
        let threshold_ms = (threshold * 1000.0) as u64;

        // Each cue lands in exactly one scene, in order
        let total: usize = scenes.iter().map(|s| s.cue_count).sum();
        assert_eq!(total, cues.len());
        let expected = 1 + gaps.iter().filter(|gap| **gap >= threshold_ms).count();
        assert_eq!(scenes.len(), expected, "threshold {}", threshold);

        let mut idx = 0;
        for scene in &scenes {
            let members = &cues[idx..idx + scene.cue_count];
            assert_eq!(scene.start_ms, members[0].start_time_ms);
            assert_eq!(scene.end_ms, members[members.len() - 1].end_time_ms);
            for pair in members.windows(2) {
                assert!(pair[1].start_time_ms - pair[0].end_time_ms < threshold_ms);
            }
            let texts: Vec<String> = members.iter().map(|cue| cue.normalized_text()).collect();
            assert_eq!(scene.transcript, texts.join(" "));
            idx += scene.cue_count;
        }

        // Consecutive scenes are separated by at least the threshold
        for pair in scenes.windows(2) {
            assert!(pair[1].start_ms - pair[0].end_ms >= threshold_ms);
        }
    }
}

#[test]
fn test_segment_withLargerThreshold_shouldNotIncreaseSceneCount() {
    let gaps: Vec<u64> = (0..40).map(|i| (i * 3_301) % 12_000).collect();
    let cues = common::cues_with_gaps(&gaps);

    let counts: Vec<usize> = [0.25, 1.0, 3.0, 4.0, 8.0, 20.0]
        .iter()
        .map(|threshold| segment(&cues, *threshold).unwrap().len())
        .collect();

    assert!(counts.windows(2).all(|pair| pair[1] <= pair[0]), "{:?}", counts);
}

#[test]
fn test_segment_withBlankCueText_shouldStillCountCue() {
    let cues = vec![
        SubtitleEntry::new(1, 0, 1_000, "Hello"),
        SubtitleEntry::new(2, 1_100, 2_000, "   "),
        SubtitleEntry::new(3, 9_000, 9_500, "Later"),
    ];

    let scenes = segment(&cues, 4.0).unwrap();

    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].cue_count, 2);
    assert_eq!(scenes[0].end_ms, 2_000);
}

#[test]
fn test_sceneSegmenter_withInvalidThreshold_shouldFail() {
    for threshold in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(SceneSegmenter::new(threshold), Err(SceneError::InvalidThreshold(_))));
    }
    assert_eq!(SceneSegmenter::default().pause_threshold().as_millis(), 4_000);
}

#[test]
fn test_segment_withThresholdJustAboveGap_shouldNotSplit() {
    let cues = common::cues(&[(0, 1_000, "a"), (5_000, 6_000, "b")]);

    assert_eq!(segment(&cues, 4.0004).unwrap().len(), 1);
    assert_eq!(segment(&cues, 4.0).unwrap().len(), 2);
}

#[test]
fn test_segment_withSubMillisecondThreshold_shouldSplitOnAnyPause() {
    let cues = common::cues(&[(0, 1_000, "a"), (1_000, 2_000, "b"), (2_001, 3_000, "c")]);

    let scenes = segment(&cues, 0.0004).unwrap();

    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].transcript, "a b");
    assert_eq!(scenes[1].transcript, "c");
}

#[test]
fn test_segmenterState_shouldEmitClosedScenesIncrementally() {
    let cues = common::cues_with_gaps(&[100, 6_000, 100]);
    let mut state = SegmenterState::new(4_000);

    let emitted: Vec<Option<usize>> = cues
        .iter()
        .map(|cue| state.advance(cue).map(|scene| scene.cue_count))
        .collect();

    assert_eq!(emitted, vec![None, None, Some(2), None]);
    assert_eq!(state.finish().map(|scene| scene.cue_count), Some(2));
}
