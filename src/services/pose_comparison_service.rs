/// Pose Comparison Service
///
/// Compares a pose against a reference after torso-relative normalisation,
/// so player size and position in the image do not count as deviations.

use tracing::debug;

use crate::config::PoseComparisonConfig;
use crate::models::{Landmark, Offset, PoseComparison, PoseDeviation, STROKE_LANDMARKS};

use super::keypoint_processor::KeypointProcessor;
use super::scoring::{mean, to_percent};

#[derive(Debug, Clone)]
pub struct PoseComparisonService {
    config: PoseComparisonConfig,
    processor: KeypointProcessor,
}

impl PoseComparisonService {
    pub fn new(config: PoseComparisonConfig) -> Self {
        let processor = KeypointProcessor::new().with_min_visibility(config.min_visibility);
        Self { config, processor }
    }

    pub fn config(&self) -> &PoseComparisonConfig {
        &self.config
    }

    /// Compare `pose` against `reference` over the stroke landmarks.
    ///
    /// Returns `None` when either pose lacks visible shoulders and hips.
    pub fn compare(&self, pose: &[Landmark], reference: &[Landmark]) -> Option<PoseComparison> {
        let Some(pose) = self.processor.normalize_torso_relative(pose) else {
            debug!("Pose comparison skipped: torso not visible in pose");
            return None;
        };
        let Some(reference) = self.processor.normalize_torso_relative(reference) else {
            debug!("Pose comparison skipped: torso not visible in reference");
            return None;
        };

        let min_visibility = self.config.min_visibility;
        let mut similarities = Vec::new();
        let mut deviations = Vec::new();

        for landmark in STROKE_LANDMARKS {
            let idx = landmark.index();
            let (Some(current), Some(target)) = (pose.get(idx), reference.get(idx)) else {
                continue;
            };
            if !current.is_visible(min_visibility) || !target.is_visible(min_visibility) {
                continue;
            }

            let distance = current.distance_2d(target);
            similarities.push((1.0 - distance / self.config.similarity_cutoff).max(0.0));

            if distance > self.config.deviation_tolerance {
                deviations.push(PoseDeviation {
                    landmark: idx,
                    group: landmark.group(),
                    distance,
                    direction: Offset {
                        x: current.x - target.x,
                        y: current.y - target.y,
                    },
                });
            }
        }

        deviations.sort_by(|a, b| b.distance.total_cmp(&a.distance));

        Some(PoseComparison {
            similarity: mean(&similarities).map_or(0, |s| to_percent(s * 100.0)),
            compared_landmarks: similarities.len(),
            deviations,
        })
    }
}

impl Default for PoseComparisonService {
    fn default() -> Self {
        Self::new(PoseComparisonConfig::default())
    }
}

/// One-off comparison with an explicit configuration
pub fn compare_poses(
    pose: &[Landmark],
    reference: &[Landmark],
    config: &PoseComparisonConfig,
) -> Option<PoseComparison> {
    PoseComparisonService::new(config.clone()).compare(pose, reference)
}
