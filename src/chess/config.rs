use serde::{Deserialize, Serialize};

use crate::chess::piece::Player;

/// Game configuration (pure Rust, no files).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Who moves on the boards at even times.
    pub first_player: Player,

    /// Keep the whole turn history. When false, only the last two turns are retained, which is
    /// still enough to roll back a king capture for terminal evaluation.
    pub save_moves: bool,
}

impl GameConfig {
    pub fn new(first_player: Player, save_moves: bool) -> Self {
        Self {
            first_player,
            save_moves,
        }
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    pub fn with_save_moves(mut self, save: bool) -> Self {
        self.save_moves = save;
        self
    }

    /// History capacity implied by `save_moves`.
    pub fn history_limit(&self) -> Option<usize> {
        if self.save_moves {
            None
        } else {
            Some(2)
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(Player::P0, true)
    }
}
