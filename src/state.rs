use serde::{Deserialize, Serialize};

use crate::chess::config::GameConfig;
use crate::chess::piece::Player;
use crate::game::GameResult;
use crate::history::TurnHistory;
use crate::multiverse::Timeline;

/// Everything needed to rebuild an equivalent [`crate::game::Game`].
///
/// Produced by `Game::representation` and consumed by `Game::from_representation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Timelines in ascending dimension order.
    pub timelines: Vec<Timeline>,
    pub current_player: Player,
    pub config: GameConfig,
    pub history: TurnHistory,
    pub result: Option<GameResult>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Snapshot> {
        serde_json::from_str(s)
    }
}
