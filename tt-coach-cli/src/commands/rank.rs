use anyhow::Result;
use clap::Args;
use colored::Colorize;

use tt_coach::{get_rank_progress, RankProgress};

use super::Context;
use crate::output::{print_json, progress_bar};

#[derive(Args)]
pub struct RankCommand {
    /// Elo rating
    #[arg(allow_negative_numbers = true)]
    elo: i64,

    /// Experience points
    #[arg(allow_negative_numbers = true)]
    xp: i64,
}

impl RankCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let progress = get_rank_progress(Some(self.elo), Some(self.xp));

        if ctx.json {
            return print_json(&progress);
        }

        println!(
            "{}  (Elo {}, XP {})",
            progress.current_rank.to_string().bold(),
            self.elo,
            self.xp
        );
        println!("  {}", progress.current_rank.description.dimmed());
        println!();
        print_progress(&progress);

        Ok(())
    }
}

fn print_progress(progress: &RankProgress) {
    let Some(next) = progress.next_rank else {
        println!("{}", "Highest rank reached".green());
        return;
    };

    println!("Next rank: {}", next);
    println!(
        "  Elo {} {:>3}%  ({} needed)",
        progress_bar(progress.elo_progress),
        progress.elo_progress,
        progress.elo_needed
    );
    println!(
        "  XP  {} {:>3}%  ({} needed)",
        progress_bar(progress.xp_progress),
        progress.xp_progress,
        progress.xp_needed
    );
}
