/// Movement Quality Service
///
/// Analyses a repetitive stroke drill (e.g. ball bucket training):
/// - repetition detection from the dominant wrist's height
/// - reference pose from the first repetitions
/// - per-repetition consistency score and deviations
/// - fatigue curve and session summary

use statrs::statistics::Statistics;
use tracing::debug;

use crate::config::MovementQualityConfig;
use crate::models::{
    CommonDeviation, DeviationDirection, DeviationRecord, FatiguePoint, Frame, Landmark,
    MovementAnalysis, MovementSummary, PlayerFrame, PoseLandmark, Repetition, Side,
    STROKE_LANDMARKS,
};

use super::keypoint_processor::{find_troughs, moving_average, KeypointProcessor};
use super::scoring::{mean, round_half_up, to_percent};

/// Wrist height used when the landmark is absent from a frame
const MISSING_WRIST_Y: f64 = 0.5;

/// Fewest scored repetitions that get a fatigue curve, whatever the window
const MIN_FATIGUE_REPETITIONS: usize = 3;

/// Points checked for deviations, with their display names
const CHECK_POINTS: [(PoseLandmark, &str); 10] = [
    (PoseLandmark::LeftElbow, "Linker Ellbogen"),
    (PoseLandmark::RightElbow, "Rechter Ellbogen"),
    (PoseLandmark::LeftWrist, "Linkes Handgelenk"),
    (PoseLandmark::RightWrist, "Rechtes Handgelenk"),
    (PoseLandmark::LeftShoulder, "Linke Schulter"),
    (PoseLandmark::RightShoulder, "Rechte Schulter"),
    (PoseLandmark::LeftHip, "Linke Hüfte"),
    (PoseLandmark::RightHip, "Rechte Hüfte"),
    (PoseLandmark::LeftKnee, "Linkes Knie"),
    (PoseLandmark::RightKnee, "Rechtes Knie"),
];

/// Movement quality analyzer
#[derive(Debug, Clone)]
pub struct MovementQualityService {
    config: MovementQualityConfig,
    processor: KeypointProcessor,
}

impl MovementQualityService {
    pub fn new(config: MovementQualityConfig) -> Self {
        let processor = KeypointProcessor::new().with_min_visibility(config.min_visibility);
        Self { config, processor }
    }

    pub fn config(&self) -> &MovementQualityConfig {
        &self.config
    }

    /// Analyse one recording session.
    ///
    /// Never fails: short or noisy input yields an empty or partially
    /// filled [`MovementAnalysis`].
    pub fn analyze(&self, frames: &[Frame]) -> MovementAnalysis {
        if frames.len() < self.config.min_frames {
            debug!("Movement analysis skipped: only {} frames", frames.len());
            return MovementAnalysis::empty();
        }

        let player_frames = self
            .processor
            .extract_player_frames(frames, self.config.body_index);
        if player_frames.len() < self.config.min_frames {
            debug!(
                "Movement analysis skipped: body {} present in {} frames",
                self.config.body_index,
                player_frames.len()
            );
            return MovementAnalysis::empty();
        }

        let dominant_side = self.processor.dominant_side(&player_frames);
        let mut repetitions = self.detect_repetitions(&player_frames, dominant_side);
        debug!(
            "Detected {} repetitions ({} side) in {} frames",
            repetitions.len(),
            dominant_side.as_str(),
            player_frames.len()
        );

        if repetitions.len() < 2 {
            return MovementAnalysis {
                repetitions,
                summary: None,
                fatigue_curve: Vec::new(),
            };
        }

        let reference_count = self.config.reference_repetitions.min(repetitions.len());
        let reference = self.reference_pose(&repetitions[..reference_count]);

        for repetition in &mut repetitions {
            repetition.consistency_score =
                Some(self.consistency_score(&repetition.peak_pose, &reference));
            repetition.deviations = self.identify_deviations(&repetition.peak_pose, &reference);
        }

        let fatigue_curve = self.fatigue_curve(&repetitions);
        let summary = self.summarize(&repetitions, &fatigue_curve, dominant_side);

        MovementAnalysis {
            repetitions,
            summary: Some(summary),
            fatigue_curve,
        }
    }

    /// One repetition per prominent trough of the smoothed wrist height.
    /// A trough is the wrist's highest point since y grows downward.
    fn detect_repetitions(&self, frames: &[PlayerFrame<'_>], dominant_side: Side) -> Vec<Repetition> {
        let wrist = dominant_side.wrist();
        let wrist_y: Vec<f64> = frames
            .iter()
            .map(|frame| frame.landmark(wrist).map_or(MISSING_WRIST_Y, |lm| lm.y))
            .collect();

        let smoothed = moving_average(&wrist_y, self.config.smoothing_window);

        find_troughs(&smoothed, self.config.min_prominence)
            .into_iter()
            .map(|frame_index| {
                let frame = frames[frame_index];
                Repetition {
                    timestamp_seconds: frame.timestamp_seconds,
                    frame_index,
                    peak_pose: frame.landmarks.to_vec(),
                    dominant_side,
                    consistency_score: None,
                    deviations: Vec::new(),
                }
            })
            .collect()
    }

    /// Per-landmark average over the given repetitions, counting only
    /// visible landmarks. Visibility becomes the share of repetitions that
    /// contributed.
    fn reference_pose(&self, repetitions: &[Repetition]) -> Vec<Landmark> {
        let landmark_count = repetitions.first().map_or(0, |rep| rep.peak_pose.len());

        (0..landmark_count)
            .map(|idx| {
                let visible: Vec<&Landmark> = repetitions
                    .iter()
                    .filter_map(|rep| rep.peak_pose.get(idx))
                    .filter(|lm| lm.is_visible(self.config.min_visibility))
                    .collect();

                if visible.is_empty() {
                    return Landmark::default();
                }

                let count = visible.len() as f64;
                Landmark {
                    x: visible.iter().map(|lm| lm.x).sum::<f64>() / count,
                    y: visible.iter().map(|lm| lm.y).sum::<f64>() / count,
                    z: visible.iter().map(|lm| lm.z).sum::<f64>() / count,
                    visibility: count / repetitions.len() as f64,
                }
            })
            .collect()
    }

    fn visible_pair<'a>(
        &self,
        pose: &'a [Landmark],
        reference: &'a [Landmark],
        landmark: PoseLandmark,
    ) -> Option<(&'a Landmark, &'a Landmark)> {
        let min_visibility = self.config.min_visibility;
        let current = pose
            .get(landmark.index())
            .filter(|lm| lm.is_visible(min_visibility))?;
        let reference = reference
            .get(landmark.index())
            .filter(|lm| lm.is_visible(min_visibility))?;
        Some((current, reference))
    }

    /// Mean positional similarity over the stroke landmarks, 0-100
    fn consistency_score(&self, pose: &[Landmark], reference: &[Landmark]) -> u8 {
        let similarities: Vec<f64> = STROKE_LANDMARKS
            .iter()
            .filter_map(|&landmark| self.visible_pair(pose, reference, landmark))
            .map(|(current, reference)| {
                (1.0 - current.distance_2d(reference) / self.config.similarity_cutoff).max(0.0)
            })
            .collect();

        mean(&similarities).map_or(0, |similarity| to_percent(similarity * 100.0))
    }

    /// Axis-wise offsets beyond the threshold, largest first
    fn identify_deviations(&self, pose: &[Landmark], reference: &[Landmark]) -> Vec<DeviationRecord> {
        let threshold = self.config.deviation_threshold;
        let mut deviations = Vec::new();

        for &(landmark, name) in &CHECK_POINTS {
            let Some((current, reference)) = self.visible_pair(pose, reference, landmark) else {
                continue;
            };

            let dy = current.y - reference.y;
            let dx = current.x - reference.x;

            if dy.abs() > threshold {
                deviations.push(deviation(name, DeviationDirection::vertical(dy), dy.abs()));
            }
            if dx.abs() > threshold {
                deviations.push(deviation(name, DeviationDirection::horizontal(dx), dx.abs()));
            }
        }

        deviations.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        deviations.truncate(self.config.max_deviations_per_repetition);
        deviations
    }

    /// Windowed consistency per repetition and its drift from the opening
    /// repetitions
    fn fatigue_curve(&self, repetitions: &[Repetition]) -> Vec<FatiguePoint> {
        if repetitions.len() < MIN_FATIGUE_REPETITIONS {
            return Vec::new();
        }
        let window = self.config.fatigue_window;

        let scores: Vec<f64> = repetitions.iter().map(score_of).collect();
        let baseline = mean(&scores[..window.min(scores.len())]).unwrap_or(0.0);

        moving_average(&scores, window)
            .into_iter()
            .zip(repetitions)
            .enumerate()
            .map(|(index, (average, repetition))| FatiguePoint {
                index,
                timestamp_seconds: repetition.timestamp_seconds,
                score: round_half_up(average) as i32,
                trend: round_half_up(average - baseline) as i32,
            })
            .collect()
    }

    fn summarize(
        &self,
        repetitions: &[Repetition],
        fatigue_curve: &[FatiguePoint],
        dominant_side: Side,
    ) -> MovementSummary {
        let scores: Vec<f64> = repetitions.iter().map(score_of).collect();

        let average = mean(&scores).unwrap_or(0.0);
        let best = scores.iter().copied().fold(f64::MIN, f64::max);
        let worst = scores.iter().copied().fold(f64::MAX, f64::min);

        let fatigue_detected = fatigue_curve.len() > 3
            && fatigue_curve
                .last()
                .is_some_and(|point| point.trend < self.config.fatigue_trend_threshold);

        if fatigue_detected {
            debug!("Fatigue detected after {} repetitions", repetitions.len());
        }

        MovementSummary {
            total_repetitions: repetitions.len(),
            average_consistency: to_percent(average),
            best_score: to_percent(best),
            worst_score: to_percent(worst),
            score_std_dev: scores.iter().population_std_dev(),
            dominant_side,
            fatigue_detected,
            common_deviations: self.common_deviations(repetitions),
        }
    }

    /// Most frequent landmark/direction pairs across the session
    fn common_deviations(&self, repetitions: &[Repetition]) -> Vec<CommonDeviation> {
        let mut grouped: Vec<CommonDeviation> = Vec::new();

        for record in repetitions.iter().flat_map(|rep| &rep.deviations) {
            let existing = grouped.iter_mut().find(|common| {
                common.landmark_name == record.landmark_name && common.direction == record.direction
            });

            match existing {
                Some(common) => common.count += 1,
                None => grouped.push(CommonDeviation {
                    landmark_name: record.landmark_name,
                    direction: record.direction,
                    description: record.description.clone(),
                    count: 1,
                    frequency: 0,
                }),
            }
        }

        grouped.sort_by(|a, b| b.count.cmp(&a.count));
        grouped.truncate(self.config.common_deviation_count);

        let total = repetitions.len() as f64;
        for common in &mut grouped {
            common.frequency = round_half_up(common.count as f64 / total * 100.0) as u32;
        }

        grouped
    }
}

impl Default for MovementQualityService {
    fn default() -> Self {
        Self::new(MovementQualityConfig::default())
    }
}

fn score_of(repetition: &Repetition) -> f64 {
    repetition.consistency_score.map_or(0.0, f64::from)
}

fn deviation(name: &'static str, direction: DeviationDirection, amount: f64) -> DeviationRecord {
    DeviationRecord {
        landmark_name: name,
        direction,
        amount,
        description: format!("{} ist {} als die Referenz", name, direction.as_str()),
    }
}
