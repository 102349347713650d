use tracing::trace;

use crate::chess::board::Board;
use crate::chess::piece::{Piece, Player};
use crate::core::coord::{PieceMove, TimeDim};
use crate::core::square::Square;
use crate::error::Result;
use crate::multiverse::Multiverse;

/// The multiverse together with who moves at which time.
///
/// Everything the rules need lives here; turn bookkeeping (current player, history) belongs to
/// [`crate::game::Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub multiverse: Multiverse,
    pub first_player: Player,
}

/// What [`Position::apply`] did: the captured piece and, in order, the dimensions that received a
/// new board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub captured: Piece,
    pub spawned: Vec<i32>,
}

impl Position {
    pub fn new(multiverse: Multiverse, first_player: Player) -> Self {
        Self {
            multiverse,
            first_player,
        }
    }

    /// The player who moves on boards at `time`.
    #[inline]
    pub fn player_at(&self, time: i32) -> Player {
        Player::from_index((time + self.first_player.index() as i32).rem_euclid(2) as usize)
    }

    /// Earliest leaf time over the active timelines.
    pub fn present(&self) -> i32 {
        self.multiverse
            .leaves()
            .filter(|td| self.multiverse.is_active(td.dim))
            .map(|td| td.time)
            .min()
            .unwrap_or(0)
    }

    #[inline]
    pub fn is_active(&self, dim: i32) -> bool {
        self.multiverse.is_active(dim)
    }

    /// Leaves `player` moves on, active or not, in dimension order.
    pub fn leaves_of(&self, player: Player) -> impl Iterator<Item = TimeDim> + '_ {
        self.multiverse
            .leaves()
            .filter(move |td| self.player_at(td.time) == player)
    }

    /// Adds `board` as the child of `parent`, branching if `parent` already has one.
    pub fn add_child(&mut self, parent: TimeDim, board: Board) -> i32 {
        let mover = self.player_at(parent.time);
        self.multiverse.add_board(parent.next(), board, mover)
    }

    /// Plays a piece move without any legality check.
    ///
    /// A move within one board creates a single child. A move between boards leaves a child behind
    /// on the source and drops the piece into a child of the target.
    pub fn apply(&mut self, mv: PieceMove) -> Result<AppliedMove> {
        let (from_td, to_td) = (mv.from.td(), mv.to.td());
        let from_sq = Square::try_new(mv.from.rank, mv.from.file)?;
        let to_sq = Square::try_new(mv.to.rank, mv.to.file)?;
        let source = self.multiverse.try_board_at(from_td)?;

        if from_td == to_td {
            let (mut next, _, captured) = source.move_piece(from_sq, to_sq);
            next.clear_stale_en_passant(Some(to_sq));
            let dim = self.add_child(from_td, next);
            return Ok(AppliedMove {
                captured,
                spawned: vec![dim],
            });
        }

        let mut left = source.clone();
        let piece = left.remove_piece(from_sq).moved();
        left.clear_stale_en_passant(None);

        let mut landed = self.multiverse.try_board_at(to_td)?.clone();
        let captured = landed.add_piece(to_sq, piece);
        landed.clear_stale_en_passant(None);

        let left_dim = self.add_child(from_td, left);
        let landed_dim = self.add_child(to_td, landed);
        trace!(?mv, left_dim, landed_dim, "cross-board move");
        Ok(AppliedMove {
            captured,
            spawned: vec![left_dim, landed_dim],
        })
    }

    /// Removes the boards a move added, newest first.
    pub fn revert(&mut self, spawned: &[i32]) {
        for &dim in spawned.iter().rev() {
            self.multiverse.remove_board(dim);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(Multiverse::default(), Player::P0)
    }
}
