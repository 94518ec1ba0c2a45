use anyhow::{Context as _, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::path::PathBuf;

use tt_coach::{group_players_by_rank, PlayerRecord, RankedPlayer, RANK_ORDER};

use super::Context;
use crate::input::load_players;
use crate::output::{print_header, print_json};

#[derive(Args)]
pub struct LeaderboardCommand {
    /// JSON file with an array of player records
    players: PathBuf,
}

impl LeaderboardCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let players = load_players(&self.players)
            .with_context(|| format!("Could not load roster {}", self.players.display()))?;
        let grouped = group_players_by_rank(&players);

        if ctx.json {
            return print_json(&grouped);
        }

        print_header(&format!("Leaderboard ({} players)", players.len()));

        for rank in RANK_ORDER.iter().rev() {
            let Some(members) = grouped.get(&rank.id) else {
                continue;
            };
            if members.is_empty() {
                continue;
            }

            println!();
            println!("{} {}", rank.to_string().bold(), format!("({})", members.len()).dimmed());
            for (position, member) in members.iter().enumerate() {
                println!("  {:>2}. {}", position + 1, describe(member));
            }
        }

        Ok(())
    }
}

fn describe(member: &RankedPlayer<PlayerRecord>) -> String {
    let player = &member.player;
    let elo = player
        .elo_rating
        .map_or_else(|| "-".to_string(), |elo| elo.to_string());
    let xp = player.xp.map_or_else(|| "-".to_string(), |xp| xp.to_string());

    format!("{:<24} Elo {:>5}  XP {:>6}", display_name(player), elo, xp)
}

/// Best human-readable name from the pass-through fields
fn display_name(player: &PlayerRecord) -> String {
    let field = |key: &str| player.extra.get(key).and_then(Value::as_str);

    if let Some(name) = field("name") {
        return name.to_string();
    }

    let full = [field("firstName"), field("lastName")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if !full.is_empty() {
        return full;
    }

    match player.extra.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(id) => id.to_string(),
        None => "?".to_string(),
    }
}
