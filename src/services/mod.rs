// Analysis services

pub mod keypoint_processor;
pub mod movement_quality_service;
pub mod pose_comparison_service;
pub mod rank_service;
pub mod scoring;
pub mod shot_classifier_service;

pub use keypoint_processor::KeypointProcessor;
pub use movement_quality_service::MovementQualityService;
pub use pose_comparison_service::PoseComparisonService;
pub use shot_classifier_service::ShotClassifierService;
