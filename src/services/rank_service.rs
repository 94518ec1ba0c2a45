/// Rank Engine
///
/// Pure lookups over the static tier table:
/// - rank for an (Elo, XP) pair, both requirements must hold
/// - progress toward the next tier
/// - lookup by id or name, display formatting
/// - leaderboard grouping

use std::collections::BTreeMap;

use crate::models::{
    RankProgress, RankedPlayer, RatedPlayer, Rank, DEFAULT_ELO, DEFAULT_XP, RANK_ORDER,
    UNRANKED_DISPLAY,
};

use super::scoring::round_half_up;

/// Highest tier whose Elo AND XP minimums are both met.
///
/// Missing values count as 800 Elo / 0 XP. Anything below the lowest tier
/// (negative or sub-800 Elo) still lands on the lowest tier.
pub fn calculate_rank(elo_rating: Option<i64>, xp: Option<i64>) -> &'static Rank {
    let elo = elo_rating.unwrap_or(DEFAULT_ELO);
    let xp = xp.unwrap_or(DEFAULT_XP);

    RANK_ORDER
        .iter()
        .rev()
        .find(|rank| rank.is_reached_by(elo, xp))
        .unwrap_or(&RANK_ORDER[0])
}

/// Tier directly above `rank`, `None` at the top
pub fn next_rank(rank: &Rank) -> Option<&'static Rank> {
    RANK_ORDER.get(usize::from(rank.id) + 1)
}

/// Current tier plus how far the player is from the next one.
///
/// The tier itself uses the same defaults as [`calculate_rank`], but a
/// missing value counts as 0 for the progress toward the next tier.
pub fn get_rank_progress(elo_rating: Option<i64>, xp: Option<i64>) -> RankProgress {
    let current_rank = calculate_rank(elo_rating, xp);

    let Some(next) = next_rank(current_rank) else {
        return RankProgress {
            current_rank,
            next_rank: None,
            elo_progress: 100,
            xp_progress: 100,
            elo_needed: 0,
            xp_needed: 0,
            is_max_rank: true,
        };
    };

    // Unrated players start the progress bars from zero
    let elo = elo_rating.unwrap_or(0);
    let xp = xp.unwrap_or(0);

    RankProgress {
        current_rank,
        next_rank: Some(next),
        elo_progress: progress_percent(elo, next.min_elo),
        xp_progress: progress_percent(xp, next.min_xp),
        elo_needed: next.min_elo.saturating_sub(elo).max(0),
        xp_needed: next.min_xp.saturating_sub(xp).max(0),
        is_max_rank: false,
    }
}

/// Rounded share of `threshold` reached by `current`, 0-100.
/// A zero threshold counts as fully reached once `current` is positive.
fn progress_percent(current: i64, threshold: i64) -> u8 {
    if threshold == 0 {
        return if current > 0 { 100 } else { 0 };
    }

    let percent = round_half_up(current as f64 / threshold as f64 * 100.0);
    percent.clamp(0.0, 100.0) as u8
}

/// Tier with the given id, `None` outside 0..=5
pub fn get_rank_by_id(id: i64) -> Option<&'static Rank> {
    RANK_ORDER.iter().find(|rank| i64::from(rank.id) == id)
}

/// Tier with the given name, compared case-insensitively
pub fn get_rank_by_name(name: &str) -> Option<&'static Rank> {
    if name.is_empty() {
        return None;
    }

    RANK_ORDER
        .iter()
        .find(|rank| rank.name.to_lowercase() == name.to_lowercase())
}

/// `"{emoji} {name}"`, or a neutral placeholder when the rank is unknown
pub fn format_rank(rank: Option<&Rank>) -> String {
    match rank {
        Some(rank) => rank.to_string(),
        None => UNRANKED_DISPLAY.to_string(),
    }
}

/// Bucket a roster by tier id.
///
/// All six tiers are present in the result, empty or not. Players keep
/// their input order inside a bucket.
pub fn group_players_by_rank<P>(players: &[P]) -> BTreeMap<u8, Vec<RankedPlayer<P>>>
where
    P: RatedPlayer + Clone,
{
    let mut grouped: BTreeMap<u8, Vec<RankedPlayer<P>>> =
        RANK_ORDER.iter().map(|rank| (rank.id, Vec::new())).collect();

    for player in players {
        let rank = calculate_rank(player.elo_rating(), player.xp());
        grouped.entry(rank.id).or_default().push(RankedPlayer {
            player: player.clone(),
            rank,
        });
    }

    grouped
}
