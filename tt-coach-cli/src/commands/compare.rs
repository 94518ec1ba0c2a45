use anyhow::{Context as _, Result};
use clap::Args;
use std::path::PathBuf;

use tt_coach::{PoseComparisonService, PoseLandmark};

use super::Context;
use crate::input::{body_landmarks, load_frames};
use crate::output::{colored_score, print_header, print_json};

#[derive(Args)]
pub struct CompareCommand {
    /// JSON file with the pose frames of the recording
    frames: PathBuf,

    /// Frame holding the pose to check
    #[arg(long)]
    frame: usize,

    /// Frame holding the reference pose
    #[arg(long, default_value_t = 0)]
    reference: usize,

    /// Index of the body to compare
    #[arg(long, default_value_t = 0)]
    body: usize,
}

impl CompareCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let frames = load_frames(&self.frames)
            .with_context(|| format!("Could not load recording {}", self.frames.display()))?;

        let pose = body_landmarks(&frames, self.frame, self.body)?;
        let reference = body_landmarks(&frames, self.reference, self.body)?;

        let service = PoseComparisonService::new(ctx.config.analysis.comparison.clone());
        let comparison = service.compare(pose, reference);

        if ctx.json {
            return print_json(&comparison);
        }

        print_header(&format!(
            "Pose comparison (frame {} vs {})",
            self.frame, self.reference
        ));

        let Some(comparison) = comparison else {
            println!("Torso not visible in both poses, nothing to compare.");
            return Ok(());
        };

        println!(
            "Similarity: {}% over {} landmarks",
            colored_score(comparison.similarity),
            comparison.compared_landmarks
        );

        for deviation in &comparison.deviations {
            let name = PoseLandmark::from_index(deviation.landmark)
                .map_or("?", PoseLandmark::name);
            println!(
                "  {:<20} {:.3}  (dx {:+.3}, dy {:+.3})",
                name, deviation.distance, deviation.direction.x, deviation.direction.y
            );
        }

        Ok(())
    }
}
