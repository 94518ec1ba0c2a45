// Plain data structures shared by the services

pub mod landmark;
pub mod movement_quality;
pub mod player;
pub mod pose_comparison;
pub mod rank;
pub mod shot;

pub use landmark::*;
pub use movement_quality::*;
pub use player::*;
pub use pose_comparison::*;
pub use rank::*;
pub use shot::*;
