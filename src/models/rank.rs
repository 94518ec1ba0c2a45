/// Rank tiers and derived progression data
///
/// A rank is reached when BOTH the Elo rating and the XP total meet the
/// tier's minimums. The tier table is static; everything else is derived
/// on demand.
use serde::Serialize;
use std::fmt;

/// Elo assumed for players without a rating
pub const DEFAULT_ELO: i64 = 800;

/// XP assumed for players without an XP total
pub const DEFAULT_XP: i64 = 0;

/// Display string used when no rank is known at all
pub const UNRANKED_DISPLAY: &str = "🎖️ Rekrut";

/// A single rank tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    /// Tier id, 0 (lowest) to 5 (highest)
    pub id: u8,
    /// Symbolic name, also the display name
    pub name: &'static str,
    pub emoji: &'static str,
    /// 6-digit hex color, e.g. `#CD7F32`
    pub color: &'static str,
    pub min_elo: i64,
    #[serde(rename = "minXP")]
    pub min_xp: i64,
    pub description: &'static str,
}

impl Rank {
    pub const REKRUT: Rank = Rank {
        id: 0,
        name: "Rekrut",
        emoji: "🔰",
        color: "#9CA3AF",
        min_elo: 800,
        min_xp: 0,
        description: "Willkommen! Absolviere die Grundlagen-Übungen.",
    };

    pub const BRONZE: Rank = Rank {
        id: 1,
        name: "Bronze",
        emoji: "🥉",
        color: "#CD7F32",
        min_elo: 850,
        min_xp: 50,
        description: "Du hast die Grundlagen gemeistert!",
    };

    pub const SILBER: Rank = Rank {
        id: 2,
        name: "Silber",
        emoji: "🥈",
        color: "#C0C0C0",
        min_elo: 1000,
        min_xp: 200,
        description: "Du bist auf dem besten Weg!",
    };

    pub const GOLD: Rank = Rank {
        id: 3,
        name: "Gold",
        emoji: "🥇",
        color: "#FFD700",
        min_elo: 1200,
        min_xp: 500,
        description: "Ein echter Champion!",
    };

    pub const PLATIN: Rank = Rank {
        id: 4,
        name: "Platin",
        emoji: "💎",
        color: "#E5E4E2",
        min_elo: 1400,
        min_xp: 1000,
        description: "Du gehörst zur Elite!",
    };

    pub const CHAMPION: Rank = Rank {
        id: 5,
        name: "Champion",
        emoji: "👑",
        color: "#9333EA",
        min_elo: 1600,
        min_xp: 1800,
        description: "Ein wahrer Meister des Tischtennissports!",
    };

    /// Whether both requirements of this tier are met
    pub fn is_reached_by(&self, elo: i64, xp: i64) -> bool {
        elo >= self.min_elo && xp >= self.min_xp
    }

    pub fn is_max_rank(&self) -> bool {
        usize::from(self.id) == RANK_ORDER.len() - 1
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji, self.name)
    }
}

/// All tiers ordered by ascending id. Rank lookup walks this from the end.
pub static RANK_ORDER: [Rank; 6] = [
    Rank::REKRUT,
    Rank::BRONZE,
    Rank::SILBER,
    Rank::GOLD,
    Rank::PLATIN,
    Rank::CHAMPION,
];

/// Progress toward the next tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankProgress {
    pub current_rank: &'static Rank,
    /// `None` exactly when `is_max_rank` is set
    pub next_rank: Option<&'static Rank>,
    /// Percent of the next tier's Elo requirement, 0-100
    pub elo_progress: u8,
    /// Percent of the next tier's XP requirement, 0-100
    pub xp_progress: u8,
    pub elo_needed: i64,
    pub xp_needed: i64,
    pub is_max_rank: bool,
}
