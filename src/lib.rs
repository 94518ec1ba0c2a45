//! Rank progression and pose-based movement analysis for table-tennis club training.
//!
//! The crate holds the parts of the club app that are pure computation:
//! - the rank engine (Elo + XP tiers, progress, leaderboard grouping)
//! - the movement quality analyzer for repetitive drills
//! - the rule-based shot classifier
//! - torso-normalised pose comparison
//!
//! Every entry point consumes plain in-memory values and degrades to empty
//! results on short or noisy input instead of failing.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{AnalysisConfig, MovementQualityConfig, PoseComparisonConfig, ShotClassifierConfig};
pub use error::ConfigError;
pub use models::*;
pub use services::{
    keypoint_processor::KeypointProcessor,
    movement_quality_service::MovementQualityService,
    pose_comparison_service::{compare_poses, PoseComparisonService},
    rank_service::{
        calculate_rank, format_rank, get_rank_by_id, get_rank_by_name, get_rank_progress,
        group_players_by_rank, next_rank,
    },
    shot_classifier_service::ShotClassifierService,
};
