use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use tt_coach::{MovementAnalysis, MovementQualityService, MovementSummary};

use super::Context;
use crate::input::load_frames;
use crate::output::{colored_score, print_header, print_json};

#[derive(Args)]
pub struct MovementCommand {
    /// JSON file with the pose frames of the drill
    frames: PathBuf,

    /// Index of the body to analyse when several are tracked
    #[arg(long)]
    body: Option<usize>,
}

impl MovementCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let frames = load_frames(&self.frames)
            .with_context(|| format!("Could not load recording {}", self.frames.display()))?;

        let mut config = ctx.config.analysis.movement.clone();
        if let Some(body) = self.body {
            config.body_index = body;
        }

        let analysis = MovementQualityService::new(config).analyze(&frames);
        tracing::info!(
            "Movement analysis found {} repetitions in {} frames",
            analysis.repetitions.len(),
            frames.len()
        );

        if ctx.json {
            return print_json(&analysis);
        }

        print_report(&analysis);
        Ok(())
    }
}

fn print_report(analysis: &MovementAnalysis) {
    print_header("Movement Quality");

    if analysis.repetitions.is_empty() {
        println!("No repetitions detected.");
        return;
    }

    for (number, rep) in analysis.repetitions.iter().enumerate() {
        let score = rep
            .consistency_score
            .map_or_else(|| "-".to_string(), colored_score);
        println!(
            "  #{:<3} {:>7.2}s  score {:>3}",
            number + 1,
            rep.timestamp_seconds,
            score
        );
        for deviation in &rep.deviations {
            println!("         {}", deviation.description.dimmed());
        }
    }

    match &analysis.summary {
        Some(summary) => print_summary(summary),
        None => {
            println!();
            println!("Too few repetitions to score consistency.");
        }
    }

    if !analysis.fatigue_curve.is_empty() {
        println!();
        println!("{}", "Fatigue curve".bold());
        for point in &analysis.fatigue_curve {
            println!(
                "  {:>7.2}s  {:>3}  ({:+})",
                point.timestamp_seconds, point.score, point.trend
            );
        }
    }
}

fn print_summary(summary: &MovementSummary) {
    println!();
    println!("{}", "Summary".bold());
    println!("  Repetitions:   {}", summary.total_repetitions);
    println!("  Dominant side: {}", summary.dominant_side.as_str());
    println!(
        "  Consistency:   {} (best {}, worst {}, σ {:.1})",
        colored_score(summary.average_consistency),
        summary.best_score,
        summary.worst_score,
        summary.score_std_dev
    );

    if summary.fatigue_detected {
        println!("  {}", "Fatigue detected".red());
    }

    if !summary.common_deviations.is_empty() {
        println!();
        println!("{}", "Common deviations".bold());
        for deviation in &summary.common_deviations {
            println!(
                "  {:>3}%  {} ({}x)",
                deviation.frequency, deviation.description, deviation.count
            );
        }
    }
}
