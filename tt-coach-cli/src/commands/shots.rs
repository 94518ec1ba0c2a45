use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use tt_coach::{ShotAnalysis, ShotClassifierService, ShotStats, Side};

use super::Context;
use crate::input::load_frames;
use crate::output::{print_header, print_json};

#[derive(Clone, Copy, ValueEnum)]
pub enum Hand {
    Left,
    Right,
}

impl From<Hand> for Side {
    fn from(hand: Hand) -> Self {
        match hand {
            Hand::Left => Side::Left,
            Hand::Right => Side::Right,
        }
    }
}

#[derive(Args)]
pub struct ShotsCommand {
    /// JSON file with the pose frames of the recording
    frames: PathBuf,

    /// Index of the body to analyse when several are tracked
    #[arg(long)]
    body: Option<usize>,

    /// Playing hand from the player profile (detected from wrist activity otherwise)
    #[arg(long, value_enum)]
    hand: Option<Hand>,

    /// Scale speed thresholds by the player's apparent shoulder width
    #[arg(long)]
    scale: bool,
}

impl ShotsCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let frames = load_frames(&self.frames)
            .with_context(|| format!("Could not load recording {}", self.frames.display()))?;

        let mut config = ctx.config.analysis.shots.clone();
        if let Some(body) = self.body {
            config.body_index = body;
        }
        if let Some(hand) = self.hand {
            config.handedness = Some(hand.into());
        }
        if self.scale {
            config.body_scale_normalization = true;
        }

        let analysis = ShotClassifierService::new(config).classify(&frames);
        tracing::info!(
            "Shot classification found {} shots in {} frames",
            analysis.shots.len(),
            frames.len()
        );

        if ctx.json {
            return print_json(&analysis);
        }

        print_report(&analysis);
        Ok(())
    }
}

fn print_report(analysis: &ShotAnalysis) {
    print_header("Shots");

    if let Some(meta) = &analysis.meta {
        println!(
            "{}",
            format!(
                "hand {} ({:?}), body scale {:.2}, threshold {:.4}",
                meta.dominant_side.as_str(),
                meta.hand_source,
                meta.body_scale,
                meta.stroke_speed_threshold
            )
            .dimmed()
        );
    }

    if analysis.shots.is_empty() {
        println!("No shots detected.");
        return;
    }

    for shot in &analysis.shots {
        println!(
            "  {:>7.2}s  {:<14} {:>3.0}%",
            shot.timestamp_seconds,
            shot.shot_type.display_label(),
            shot.confidence * 100.0
        );
    }

    if let Some(stats) = &analysis.stats {
        print_stats(stats);
    }
}

fn print_stats(stats: &ShotStats) {
    println!();
    println!("{}", "Statistics".bold());
    println!("  Total shots:    {}", stats.total_shots);
    println!("  Forehand share: {}%", stats.forehand_share);
    println!("  Avg confidence: {}%", stats.avg_confidence);

    for (label, count) in stats.shot_type_counts.iter().filter(|(_, count)| **count > 0) {
        println!("  {:<20} {}", label, count);
    }
}
