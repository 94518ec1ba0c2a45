/// Shot Classifier Service
///
/// Rule-based stroke recognition from wrist trajectories:
/// - stroke events from dominant-wrist speed bursts
/// - forehand/backhand from wrist position relative to the shoulders
/// - topspin/push/block from the vertical wrist path around the peak
/// - serve from a ball toss of the free hand

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ShotClassifierConfig;
use crate::models::{
    Frame, HandSource, PlayerFrame, PoseLandmark, ShotAnalysis, ShotAnalysisMeta, ShotEvent,
    ShotSide, ShotStats, ShotType, Side, StrokeType,
};

use super::keypoint_processor::KeypointProcessor;
use super::scoring::{mean, round_half_up, to_percent};

/// Number of frames sampled for the shoulder width estimate
const BODY_SCALE_SAMPLES: usize = 10;
const MIN_BODY_SCALE: f64 = 0.5;
const MAX_BODY_SCALE: f64 = 2.0;

/// A burst of wrist speed, before classification
#[derive(Debug, Clone, Copy, PartialEq)]
struct StrokeEvent {
    /// Peak-speed frame
    frame_index: usize,
    peak_speed: f64,
    /// Frames meeting the speed criterion, trigger included
    stroke_frames: usize,
    /// Last frame that belonged to the stroke
    last_frame: usize,
    confidence: f64,
}

/// Shot classifier
#[derive(Debug, Clone)]
pub struct ShotClassifierService {
    config: ShotClassifierConfig,
    processor: KeypointProcessor,
}

impl ShotClassifierService {
    pub fn new(config: ShotClassifierConfig) -> Self {
        let processor = KeypointProcessor::new().with_min_visibility(config.min_visibility);
        Self { config, processor }
    }

    pub fn config(&self) -> &ShotClassifierConfig {
        &self.config
    }

    /// Detect and classify every stroke of one body.
    ///
    /// Fewer than the minimum number of usable frames yields
    /// `{shots: [], stats: None}`.
    pub fn classify(&self, frames: &[Frame]) -> ShotAnalysis {
        if frames.len() < self.config.min_frames {
            debug!("Shot classification skipped: only {} frames", frames.len());
            return ShotAnalysis::empty();
        }

        let player_frames = self
            .processor
            .extract_player_frames(frames, self.config.body_index);
        if player_frames.len() < self.config.min_frames {
            debug!(
                "Shot classification skipped: body {} present in {} frames",
                self.config.body_index,
                player_frames.len()
            );
            return ShotAnalysis::empty();
        }

        let (dominant_side, hand_source) = match self.config.handedness {
            Some(side) => (side, HandSource::Profile),
            None => (self.processor.dominant_side(&player_frames), HandSource::Auto),
        };

        let body_scale = if self.config.body_scale_normalization {
            self.body_scale(&player_frames)
        } else {
            1.0
        };
        let speed_threshold = self.config.stroke_speed_threshold * body_scale;

        let events = self.detect_stroke_events(&player_frames, dominant_side, speed_threshold);
        debug!(
            "Detected {} stroke events ({} hand, scale {:.2})",
            events.len(),
            dominant_side.as_str(),
            body_scale
        );

        let shots: Vec<ShotEvent> = events
            .iter()
            .filter(|event| event.confidence >= self.config.min_confidence)
            .map(|event| self.classify_event(event, &player_frames, dominant_side, body_scale))
            .collect();

        ShotAnalysis {
            stats: compute_stats(&shots),
            shots,
            meta: Some(ShotAnalysisMeta {
                dominant_side,
                hand_source,
                body_scale: round_half_up(body_scale * 100.0) / 100.0,
                stroke_speed_threshold: round_half_up(speed_threshold * 10_000.0) / 10_000.0,
            }),
        }
    }

    fn classify_event(
        &self,
        event: &StrokeEvent,
        frames: &[PlayerFrame<'_>],
        dominant_side: Side,
        body_scale: f64,
    ) -> ShotEvent {
        let side = self.classify_side(&frames[event.frame_index], dominant_side);
        let stroke_type = if self.detect_serve(event, frames, dominant_side, body_scale) {
            StrokeType::Serve
        } else {
            self.classify_stroke_type(event, frames, dominant_side, body_scale)
        };

        ShotEvent {
            timestamp_seconds: frames[event.frame_index].timestamp_seconds,
            frame_index: event.frame_index,
            shot_type: ShotType::new(side, stroke_type),
            side,
            stroke_type,
            confidence: event.confidence,
            wrist_speed: event.peak_speed,
        }
    }

    /// Mean shoulder width over evenly spaced frames, relative to an adult
    /// at the reference distance
    fn body_scale(&self, frames: &[PlayerFrame<'_>]) -> f64 {
        let step = (frames.len() / BODY_SCALE_SAMPLES).max(1);
        let min_visibility = self.config.min_visibility;

        let widths: Vec<f64> = frames
            .iter()
            .step_by(step)
            .filter_map(|frame| {
                let left = frame.visible_landmark(PoseLandmark::LeftShoulder, min_visibility)?;
                let right = frame.visible_landmark(PoseLandmark::RightShoulder, min_visibility)?;
                Some((right.x - left.x).abs())
            })
            .collect();

        mean(&widths).map_or(1.0, |width| {
            (width / self.config.reference_shoulder_width).clamp(MIN_BODY_SCALE, MAX_BODY_SCALE)
        })
    }

    /// Euclidean displacement of `landmark` between frames `idx - 1` and
    /// `idx`, when visible in both
    fn speed_at(&self, frames: &[PlayerFrame<'_>], idx: usize, landmark: PoseLandmark) -> Option<f64> {
        let min_visibility = self.config.min_visibility;
        let prev = frames[idx.checked_sub(1)?].visible_landmark(landmark, min_visibility)?;
        let curr = frames.get(idx)?.visible_landmark(landmark, min_visibility)?;
        Some(curr.distance_2d(prev))
    }

    /// Scan for speed bursts of the dominant wrist.
    ///
    /// After an accepted stroke scanning resumes only once the cooldown
    /// has passed the stroke's last frame, so anchors of consecutive
    /// strokes are always more than `cooldown_frames` apart.
    fn detect_stroke_events(
        &self,
        frames: &[PlayerFrame<'_>],
        dominant_side: Side,
        speed_threshold: f64,
    ) -> Vec<StrokeEvent> {
        let wrist = dominant_side.wrist();
        let continuation_speed = speed_threshold * self.config.continuation_ratio;
        let mut events = Vec::new();
        let mut i = 1;

        while i < frames.len() {
            let Some(speed) = self.speed_at(frames, i, wrist) else {
                i += 1;
                continue;
            };
            if speed < speed_threshold {
                i += 1;
                continue;
            }

            let mut event = StrokeEvent {
                frame_index: i,
                peak_speed: speed,
                stroke_frames: 1,
                last_frame: i,
                confidence: 0.0,
            };

            let lookahead_end = (i + 1)
                .saturating_add(self.config.lookahead_frames)
                .min(frames.len());
            for j in i + 1..lookahead_end {
                match self.speed_at(frames, j, wrist) {
                    Some(next_speed) if next_speed >= continuation_speed => {
                        event.stroke_frames += 1;
                        event.last_frame = j;
                        if next_speed > event.peak_speed {
                            event.peak_speed = next_speed;
                            event.frame_index = j;
                        }
                    }
                    _ => break,
                }
            }

            if event.stroke_frames < self.config.min_stroke_frames {
                i += 1;
                continue;
            }

            event.confidence = (event.peak_speed / (speed_threshold * 3.0)).min(1.0);
            i = event
                .last_frame
                .saturating_add(self.config.cooldown_frames)
                .saturating_add(1);
            events.push(event);
        }

        events
    }

    /// Forehand when the playing wrist is on its own side of the shoulder
    /// midpoint. Missing data counts as forehand.
    fn classify_side(&self, frame: &PlayerFrame<'_>, dominant_side: Side) -> ShotSide {
        let min_visibility = self.config.min_visibility;
        let shoulders = frame
            .visible_landmark(PoseLandmark::LeftShoulder, min_visibility)
            .zip(frame.visible_landmark(PoseLandmark::RightShoulder, min_visibility));
        let Some((left, right)) = shoulders else {
            return ShotSide::Forehand;
        };
        let Some(wrist) = frame.visible_landmark(dominant_side.wrist(), min_visibility) else {
            return ShotSide::Forehand;
        };

        let center_x = (left.x + right.x) / 2.0;
        let on_own_side = match dominant_side {
            Side::Right => wrist.x > center_x,
            Side::Left => wrist.x < center_x,
        };

        if on_own_side {
            ShotSide::Forehand
        } else {
            ShotSide::Backhand
        }
    }

    /// Topspin, push or block from the wrist's vertical path a few frames
    /// around the anchor
    fn classify_stroke_type(
        &self,
        event: &StrokeEvent,
        frames: &[PlayerFrame<'_>],
        dominant_side: Side,
        body_scale: f64,
    ) -> StrokeType {
        let wrist = dominant_side.wrist();
        let min_visibility = self.config.min_visibility;
        let window = self.config.type_window_frames;
        let idx = event.frame_index;

        let Some(at) = frames[idx].visible_landmark(wrist, min_visibility) else {
            return StrokeType::Topspin;
        };

        let before = idx
            .checked_sub(window)
            .and_then(|b| frames[b].visible_landmark(wrist, min_visibility));
        let after = frames
            .get(idx + window)
            .and_then(|frame| frame.visible_landmark(wrist, min_visibility));

        let mut vertical_movement = 0.0;
        let mut amplitude = 0.0;
        if let Some(before) = before {
            // Positive when the wrist rises into the anchor
            vertical_movement = before.y - at.y;
            amplitude += (before.y - at.y).abs();
        }
        if let Some(after) = after {
            amplitude += (at.y - after.y).abs();
        }

        if vertical_movement > self.config.topspin_rise * body_scale
            && amplitude > self.config.topspin_amplitude * body_scale
        {
            StrokeType::Topspin
        } else if amplitude < self.config.block_amplitude * body_scale
            && event.stroke_frames <= self.config.block_max_frames
        {
            StrokeType::Block
        } else if amplitude < self.config.push_amplitude * body_scale {
            StrokeType::Push
        } else {
            StrokeType::Topspin
        }
    }

    /// Ball toss: the free hand rising quickly in the frames before the anchor
    fn detect_serve(
        &self,
        event: &StrokeEvent,
        frames: &[PlayerFrame<'_>],
        dominant_side: Side,
        body_scale: f64,
    ) -> bool {
        let free_wrist = dominant_side.opposite().wrist();
        let min_visibility = self.config.min_visibility;
        let idx = event.frame_index;

        let start = idx.saturating_sub(self.config.serve_window_frames) + 1;
        let end = idx.saturating_sub(1);

        let max_upward = (start..=end)
            .filter_map(|i| {
                let prev = frames[i - 1].visible_landmark(free_wrist, min_visibility)?;
                let curr = frames[i].visible_landmark(free_wrist, min_visibility)?;
                Some(prev.y - curr.y)
            })
            .fold(0.0, f64::max);

        max_upward >= self.config.serve_toss_threshold * body_scale
    }
}

impl Default for ShotClassifierService {
    fn default() -> Self {
        Self::new(ShotClassifierConfig::default())
    }
}

/// Tallies per label, side and type; `None` without shots
fn compute_stats(shots: &[ShotEvent]) -> Option<ShotStats> {
    if shots.is_empty() {
        return None;
    }

    let mut shot_type_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut side_distribution: BTreeMap<ShotSide, usize> = [ShotSide::Forehand, ShotSide::Backhand]
        .into_iter()
        .map(|side| (side, 0))
        .collect();
    let mut type_distribution: BTreeMap<StrokeType, usize> =
        StrokeType::ALL.into_iter().map(|stroke| (stroke, 0)).collect();

    for shot in shots {
        *shot_type_counts.entry(shot.shot_type.label()).or_default() += 1;
        *side_distribution.entry(shot.side).or_default() += 1;
        *type_distribution.entry(shot.stroke_type).or_default() += 1;
    }

    let confidences: Vec<f64> = shots.iter().map(|shot| shot.confidence).collect();
    let avg_confidence = mean(&confidences).map_or(0, |avg| to_percent(avg * 100.0));
    let forehands = side_distribution[&ShotSide::Forehand];

    Some(ShotStats {
        total_shots: shots.len(),
        shot_type_counts,
        side_distribution,
        type_distribution,
        avg_confidence,
        forehand_share: to_percent(forehands as f64 / shots.len() as f64 * 100.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Landmark, LANDMARK_COUNT};

    /// Right-handed player facing the camera, wrists resting low
    fn base_pose() -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.9); LANDMARK_COUNT];
        landmarks[PoseLandmark::LeftShoulder.index()] = Landmark::new(0.42, 0.3, 0.9);
        landmarks[PoseLandmark::RightShoulder.index()] = Landmark::new(0.58, 0.3, 0.9);
        landmarks[PoseLandmark::LeftWrist.index()] = Landmark::new(0.4, 0.6, 0.9);
        landmarks[PoseLandmark::RightWrist.index()] = Landmark::new(0.6, 0.6, 0.9);
        landmarks
    }

    fn with_right_wrist(x: f64, y: f64) -> Vec<Landmark> {
        let mut landmarks = base_pose();
        landmarks[PoseLandmark::RightWrist.index()] = Landmark::new(x, y, 0.9);
        landmarks
    }

    fn player_frames(poses: &[Vec<Landmark>]) -> Vec<PlayerFrame<'_>> {
        poses
            .iter()
            .enumerate()
            .map(|(i, landmarks)| PlayerFrame {
                timestamp_seconds: i as f64 / 30.0,
                landmarks,
            })
            .collect()
    }

    fn event_at(frame_index: usize, stroke_frames: usize) -> StrokeEvent {
        StrokeEvent {
            frame_index,
            peak_speed: 0.03,
            stroke_frames,
            last_frame: frame_index,
            confidence: 0.67,
        }
    }

    #[test]
    fn test_single_swing_is_one_event() {
        // Still, then a fast swing over four frames, then still again
        let xs = [0.6, 0.6, 0.6, 0.63, 0.67, 0.71, 0.74, 0.74, 0.74, 0.74, 0.74, 0.74];
        let poses: Vec<_> = xs.iter().map(|&x| with_right_wrist(x, 0.6)).collect();
        let frames = player_frames(&poses);

        let service = ShotClassifierService::default();
        let events = service.detect_stroke_events(&frames, Side::Right, 0.015);

        assert_eq!(events.len(), 1);
        let event = events[0];
        assert_eq!(event.stroke_frames, 4);
        assert_eq!(event.last_frame, 6);
        assert!(event.frame_index == 4 || event.frame_index == 5);
        assert!((event.peak_speed - 0.04).abs() < 1e-9);
        assert!((event.confidence - 0.04 / 0.045).abs() < 1e-9);
    }

    #[test]
    fn test_huge_cooldown_and_lookahead_do_not_overflow() {
        let xs = [0.6, 0.6, 0.6, 0.63, 0.67, 0.71, 0.74, 0.74, 0.74];
        let poses: Vec<_> = xs.iter().map(|&x| with_right_wrist(x, 0.6)).collect();
        let frames = player_frames(&poses);

        let service = ShotClassifierService::new(ShotClassifierConfig {
            cooldown_frames: usize::MAX,
            lookahead_frames: usize::MAX,
            ..ShotClassifierConfig::default()
        });
        let events = service.detect_stroke_events(&frames, Side::Right, 0.015);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].stroke_frames, 4);
        assert_eq!(events[0].last_frame, 6);
    }

    #[test]
    fn test_single_fast_frame_is_rejected() {
        let xs = [0.6, 0.6, 0.6, 0.65, 0.65, 0.65, 0.65];
        let poses: Vec<_> = xs.iter().map(|&x| with_right_wrist(x, 0.6)).collect();
        let frames = player_frames(&poses);

        let events = ShotClassifierService::default().detect_stroke_events(&frames, Side::Right, 0.015);
        assert!(events.is_empty());
    }

    #[test]
    fn test_hidden_wrist_breaks_stroke() {
        let mut poses: Vec<_> = [0.6, 0.6, 0.64, 0.68, 0.72]
            .iter()
            .map(|&x| with_right_wrist(x, 0.6))
            .collect();
        poses[3][PoseLandmark::RightWrist.index()].visibility = 0.1;
        let frames = player_frames(&poses);

        let events = ShotClassifierService::default().detect_stroke_events(&frames, Side::Right, 0.015);
        assert!(events.is_empty());
    }

    #[test]
    fn test_confidence_saturates() {
        let xs = [0.6, 0.6, 0.7, 0.8, 0.8, 0.8];
        let poses: Vec<_> = xs.iter().map(|&x| with_right_wrist(x, 0.6)).collect();
        let frames = player_frames(&poses);

        let events = ShotClassifierService::default().detect_stroke_events(&frames, Side::Right, 0.015);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].confidence, 1.0);
    }

    #[test]
    fn test_classify_side() {
        let service = ShotClassifierService::default();
        let forehand = with_right_wrist(0.65, 0.5);
        let backhand = with_right_wrist(0.45, 0.5);
        let poses = [forehand, backhand];
        let frames = player_frames(&poses);

        assert_eq!(service.classify_side(&frames[0], Side::Right), ShotSide::Forehand);
        assert_eq!(service.classify_side(&frames[1], Side::Right), ShotSide::Backhand);
    }

    #[test]
    fn test_classify_side_left_handed_is_mirrored() {
        let service = ShotClassifierService::default();
        let mut crossing = base_pose();
        crossing[PoseLandmark::LeftWrist.index()] = Landmark::new(0.55, 0.5, 0.9);
        let frames = player_frames(std::slice::from_ref(&crossing));

        assert_eq!(service.classify_side(&frames[0], Side::Left), ShotSide::Backhand);
    }

    #[test]
    fn test_classify_side_defaults_to_forehand() {
        let service = ShotClassifierService::default();
        let mut hidden = with_right_wrist(0.45, 0.5);
        hidden[PoseLandmark::LeftShoulder.index()].visibility = 0.0;
        let frames = player_frames(std::slice::from_ref(&hidden));

        assert_eq!(service.classify_side(&frames[0], Side::Right), ShotSide::Forehand);
    }

    #[test]
    fn test_stroke_types_from_vertical_path() {
        let service = ShotClassifierService::default();
        let classify = |ys: [f64; 5], stroke_frames: usize| {
            let poses: Vec<_> = ys.iter().map(|&y| with_right_wrist(0.6, y)).collect();
            let frames = player_frames(&poses);
            service.classify_stroke_type(&event_at(2, stroke_frames), &frames, Side::Right, 1.0)
        };

        // Wrist rises 0.05 into the anchor and keeps going
        assert_eq!(classify([0.6, 0.58, 0.55, 0.53, 0.52], 3), StrokeType::Topspin);
        // Nearly flat and short
        assert_eq!(classify([0.6, 0.6, 0.595, 0.6, 0.6], 2), StrokeType::Block);
        // Nearly flat but long
        assert_eq!(classify([0.6, 0.6, 0.595, 0.6, 0.6], 5), StrokeType::Push);
        // Moderate drop
        assert_eq!(classify([0.6, 0.61, 0.62, 0.63, 0.63], 4), StrokeType::Push);
        // Large downward chop
        assert_eq!(classify([0.5, 0.55, 0.6, 0.65, 0.7], 4), StrokeType::Topspin);
    }

    #[test]
    fn test_serve_needs_ball_toss() {
        let service = ShotClassifierService::default();
        let toss_heights = [0.6, 0.6, 0.55, 0.5, 0.48, 0.48, 0.48];
        let poses: Vec<_> = toss_heights
            .iter()
            .map(|&y| {
                let mut pose = base_pose();
                pose[PoseLandmark::LeftWrist.index()] = Landmark::new(0.4, y, 0.9);
                pose
            })
            .collect();
        let frames = player_frames(&poses);

        assert!(service.detect_serve(&event_at(5, 3), &frames, Side::Right, 1.0));
        // Toss lies outside the window before frame 1
        assert!(!service.detect_serve(&event_at(1, 3), &frames, Side::Right, 1.0));
        // Left-handed player tosses with the right hand, which stays still
        assert!(!service.detect_serve(&event_at(5, 3), &frames, Side::Left, 1.0));
    }

    #[test]
    fn test_body_scale_is_clamped() {
        let service = ShotClassifierService::default();

        let narrow: Vec<_> = (0..20)
            .map(|_| {
                let mut pose = base_pose();
                pose[PoseLandmark::LeftShoulder.index()].x = 0.48;
                pose[PoseLandmark::RightShoulder.index()].x = 0.52;
                pose
            })
            .collect();
        assert_eq!(service.body_scale(&player_frames(&narrow)), MIN_BODY_SCALE);

        let regular: Vec<_> = (0..20).map(|_| base_pose()).collect();
        let scale = service.body_scale(&player_frames(&regular));
        assert!((scale - 0.16 / 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_stats() {
        let shot = |side, stroke_type, confidence| ShotEvent {
            timestamp_seconds: 0.0,
            frame_index: 0,
            shot_type: ShotType::new(side, stroke_type),
            side,
            stroke_type,
            confidence,
            wrist_speed: 0.03,
        };
        let shots = vec![
            shot(ShotSide::Forehand, StrokeType::Topspin, 0.9),
            shot(ShotSide::Forehand, StrokeType::Topspin, 0.7),
            shot(ShotSide::Backhand, StrokeType::Push, 0.5),
        ];

        let stats = compute_stats(&shots).unwrap();

        assert_eq!(stats.total_shots, 3);
        assert_eq!(stats.shot_type_counts["forehand_topspin"], 2);
        assert_eq!(stats.shot_type_counts["backhand_push"], 1);
        assert_eq!(stats.side_distribution[&ShotSide::Backhand], 1);
        assert_eq!(stats.type_distribution[&StrokeType::Serve], 0);
        assert_eq!(stats.type_distribution.len(), 4);
        assert_eq!(stats.avg_confidence, 70);
        assert_eq!(stats.forehand_share, 67);
        assert!(compute_stats(&[]).is_none());
    }
}
