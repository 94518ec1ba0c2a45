mod common;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tt_coach::{
    DeviationDirection, Frame, MovementAnalysis, MovementQualityConfig, MovementQualityService,
    PoseLandmark, Side,
};

use common::{drill_frames, init_test_logging, set, shift_x};

#[test]
fn test_too_few_frames_yields_empty_result() {
    init_test_logging();
    let service = MovementQualityService::default();

    let frames: Vec<Frame> = drill_frames(3, 10, |_, _| {}).into_iter().take(4).collect();
    let analysis = service.analyze(&frames);

    assert!(analysis.is_empty());
    assert_eq!(analysis, MovementAnalysis::empty());
    assert!(service.analyze(&[]).is_empty());
}

#[test]
fn test_missing_body_index_yields_empty_result() {
    let config = MovementQualityConfig {
        body_index: 1,
        ..Default::default()
    };
    let analysis = MovementQualityService::new(config).analyze(&drill_frames(4, 10, |_, _| {}));

    assert!(analysis.is_empty());
}

#[test]
fn test_frames_without_detection_are_skipped() {
    let mut frames = drill_frames(4, 10, |_, _| {});
    // Only four frames still carry a body
    for frame in frames.iter_mut().skip(4) {
        frame.bodies.clear();
    }

    assert!(MovementQualityService::default().analyze(&frames).is_empty());
}

#[test]
fn test_steady_drill() {
    init_test_logging();
    let frames = drill_frames(6, 10, |_, _| {});

    let analysis = MovementQualityService::default().analyze(&frames);

    assert_eq!(analysis.repetitions.len(), 6);
    let frame_indices: Vec<usize> = analysis.repetitions.iter().map(|r| r.frame_index).collect();
    assert_eq!(frame_indices, vec![5, 15, 25, 35, 45, 55]);
    assert!(analysis
        .repetitions
        .iter()
        .all(|r| r.consistency_score == Some(100) && r.deviations.is_empty()));
    assert!(analysis.repetitions.iter().all(|r| r.dominant_side == Side::Right));
    assert!((analysis.repetitions[1].timestamp_seconds - 0.5).abs() < 1e-9);

    let summary = analysis.summary.expect("summary for a scored session");
    assert_eq!(summary.total_repetitions, 6);
    assert_eq!(summary.average_consistency, 100);
    assert_eq!(summary.best_score, 100);
    assert_eq!(summary.worst_score, 100);
    assert_eq!(summary.score_std_dev, 0.0);
    assert_eq!(summary.dominant_side, Side::Right);
    assert!(!summary.fatigue_detected);
    assert!(summary.common_deviations.is_empty());

    assert_eq!(analysis.fatigue_curve.len(), 6);
    assert!(analysis.fatigue_curve.iter().all(|p| p.score == 100 && p.trend == 0));
}

#[test]
fn test_fatigue_from_drifting_stance() {
    init_test_logging();
    // From the fifth repetition on the whole body drifts 0.12 to the right
    let frames = drill_frames(8, 10, |repetition, pose| {
        if repetition >= 4 {
            shift_x(pose, 0.12);
        }
    });

    let analysis = MovementQualityService::default().analyze(&frames);

    let scores: Vec<Option<u8>> = analysis.repetitions.iter().map(|r| r.consistency_score).collect();
    assert_eq!(
        scores,
        vec![
            Some(100),
            Some(100),
            Some(100),
            Some(100),
            Some(60),
            Some(60),
            Some(60),
            Some(60)
        ]
    );

    let trends: Vec<i32> = analysis.fatigue_curve.iter().map(|p| p.trend).collect();
    assert_eq!(trends, vec![0, 0, 0, -13, -27, -40, -40, -40]);

    let summary = analysis.summary.unwrap();
    assert!(summary.fatigue_detected);
    assert_eq!(summary.average_consistency, 80);
    assert_eq!(summary.best_score, 100);
    assert_eq!(summary.worst_score, 60);
    assert!((summary.score_std_dev - 20.0).abs() < 1e-9);

    let drifted = &analysis.repetitions[5];
    assert_eq!(drifted.deviations.len(), 5);
    assert!(drifted
        .deviations
        .iter()
        .all(|d| d.direction == DeviationDirection::FurtherRight
            && d.description.ends_with("ist weiter rechts als die Referenz")));

    assert_eq!(summary.common_deviations.len(), 3);
    assert!(summary
        .common_deviations
        .iter()
        .all(|c| c.count == 4 && c.frequency == 50));
}

#[test]
fn test_single_elbow_deviation() {
    let frames = drill_frames(5, 10, |repetition, pose| {
        if repetition == 3 {
            set(pose, PoseLandmark::RightElbow, 0.62, 0.48);
        }
    });

    let analysis = MovementQualityService::default().analyze(&frames);

    let deviations = &analysis.repetitions[3].deviations;
    assert_eq!(deviations.len(), 1);
    assert_eq!(deviations[0].landmark_name, "Rechter Ellbogen");
    assert_eq!(deviations[0].direction, DeviationDirection::Lower);
    assert_eq!(
        deviations[0].description,
        "Rechter Ellbogen ist tiefer als die Referenz"
    );
    assert!((deviations[0].amount - 0.06).abs() < 1e-9);
    // 11 of 12 landmarks identical, the elbow at 0.06 keeps 80% similarity
    assert_eq!(analysis.repetitions[3].consistency_score, Some(98));

    let summary = analysis.summary.unwrap();
    assert_eq!(summary.common_deviations.len(), 1);
    assert_eq!(summary.common_deviations[0].frequency, 20);
}

#[test]
fn test_single_repetition_is_not_scored() {
    let frames = drill_frames(1, 10, |_, _| {});

    let analysis = MovementQualityService::default().analyze(&frames);

    assert_eq!(analysis.repetitions.len(), 1);
    assert_eq!(analysis.repetitions[0].consistency_score, None);
    assert!(analysis.summary.is_none());
    assert!(analysis.fatigue_curve.is_empty());
}

#[test]
fn test_short_sessions_never_flag_fatigue() {
    let frames = drill_frames(3, 10, |repetition, pose| {
        if repetition == 2 {
            shift_x(pose, 0.25);
        }
    });

    let analysis = MovementQualityService::default().analyze(&frames);

    assert_eq!(analysis.fatigue_curve.len(), 3);
    assert!(!analysis.summary.unwrap().fatigue_detected);
}

#[test]
fn test_still_player_has_no_repetitions() {
    let frames = drill_frames(4, 10, |_, pose| {
        set(pose, PoseLandmark::RightWrist, 0.6, 0.6);
    });

    let analysis = MovementQualityService::default().analyze(&frames);

    assert!(analysis.repetitions.is_empty());
    assert!(analysis.summary.is_none());
}

#[test]
fn test_analysis_serializes_camel_case() {
    let analysis = MovementQualityService::default().analyze(&drill_frames(4, 10, |_, _| {}));
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["summary"]["totalRepetitions"], 4);
    assert_eq!(json["repetitions"][0]["dominantSide"], "right");
    assert_eq!(json["repetitions"][0]["consistencyScore"], 100);
    assert!(json["fatigueCurve"].is_array());
}

proptest! {
    #[test]
    fn prop_consistency_scores_stay_in_range(
        shifts in proptest::collection::vec(-0.3f64..0.3, 6)
    ) {
        let frames = drill_frames(6, 10, |repetition, pose| shift_x(pose, shifts[repetition]));

        let analysis = MovementQualityService::default().analyze(&frames);

        for repetition in &analysis.repetitions {
            if let Some(score) = repetition.consistency_score {
                prop_assert!(score <= 100);
            }
        }
        if let Some(summary) = analysis.summary {
            prop_assert!(summary.worst_score <= summary.average_consistency);
            prop_assert!(summary.average_consistency <= summary.best_score);
        }
    }
}
