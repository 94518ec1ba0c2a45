use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::rank::Rank;

/// Anything that carries an Elo rating and an XP total
pub trait RatedPlayer {
    fn elo_rating(&self) -> Option<i64>;
    fn xp(&self) -> Option<i64>;
}

/// Player record as delivered by the club datastore.
///
/// Only `eloRating` and `xp` are interpreted; every other field is kept
/// verbatim in `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(default)]
    pub elo_rating: Option<i64>,
    #[serde(default)]
    pub xp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlayerRecord {
    pub fn new(elo_rating: Option<i64>, xp: Option<i64>) -> Self {
        Self {
            elo_rating,
            xp,
            extra: Map::new(),
        }
    }

    /// Attach a pass-through field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl RatedPlayer for PlayerRecord {
    fn elo_rating(&self) -> Option<i64> {
        self.elo_rating
    }

    fn xp(&self) -> Option<i64> {
        self.xp
    }
}

/// A copy of a player augmented with its computed rank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer<P> {
    #[serde(flatten)]
    pub player: P,
    pub rank: &'static Rank,
}
