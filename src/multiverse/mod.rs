//! The multiverse: every timeline of both players, keyed by signed dimension.
//!
//! Boards live in an arena of timelines rather than pointing at their parents:
//! - a timeline is addressed by its dimension index (`BTreeMap`, so iteration is ordered),
//! - a board is addressed by `(time, dim)` via the timeline's start offset,
//! - only leaf boards (the last board of a timeline) may source moves.

pub mod timeline;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::chess::board::Board;
use crate::chess::piece::{Piece, Player};
use crate::core::coord::{Coord, TimeDim};
use crate::error::{GameError, Result};

pub use timeline::Timeline;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multiverse {
    timelines: BTreeMap<i32, Timeline>,
}

impl Multiverse {
    pub fn new(main: Timeline) -> Self {
        let mut timelines = BTreeMap::new();
        timelines.insert(main.dim(), main);
        Self { timelines }
    }

    /// A single timeline at dimension 0 starting at time 0.
    pub fn from_board(board: Board) -> Self {
        Self::new(Timeline::new(0, 0, board))
    }

    pub fn from_timelines(timelines: impl IntoIterator<Item = Timeline>) -> Result<Self> {
        let timelines: BTreeMap<i32, Timeline> = timelines
            .into_iter()
            .filter(|tl| !tl.is_empty())
            .map(|tl| (tl.dim(), tl))
            .collect();
        if timelines.is_empty() {
            return Err(GameError::EmptyMultiverse);
        }
        Ok(Self { timelines })
    }

    pub fn timeline(&self, dim: i32) -> Option<&Timeline> {
        self.timelines.get(&dim)
    }

    /// Timelines in ascending dimension order.
    pub fn timelines(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.values()
    }

    pub fn board_at(&self, td: TimeDim) -> Option<&Board> {
        self.timelines.get(&td.dim)?.board_at(td.time)
    }

    /// Like [`Multiverse::board_at`], but a miss is an error.
    pub fn try_board_at(&self, td: TimeDim) -> Result<&Board> {
        self.board_at(td).ok_or(GameError::MissingBoard {
            time: td.time,
            dim: td.dim,
        })
    }

    /// True iff the square is on the board and the board exists.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.square().is_some() && self.board_at(c.td()).is_some()
    }

    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        let sq = c.square()?;
        Some(self.board_at(c.td())?.get(sq))
    }

    /// True iff `td` exists and nothing has been played from it yet.
    pub fn is_leaf(&self, td: TimeDim) -> bool {
        self.timelines
            .get(&td.dim)
            .is_some_and(|tl| !tl.is_empty() && tl.end_time() == td.time)
    }

    /// `(min_dim, max_dim)` over all timelines.
    pub fn dim_range(&self) -> (i32, i32) {
        let lo = self.timelines.keys().next().copied().unwrap_or(0);
        let hi = self.timelines.keys().next_back().copied().unwrap_or(0);
        (lo, hi)
    }

    /// How far from dimension 0 both players have branched: `min(max_dim, -min_dim)`.
    pub fn active_range(&self) -> i32 {
        active_range_of(self.dim_range())
    }

    /// A dimension is active if it is within reach of the present; the side that has branched
    /// further may lead by one timeline.
    #[inline]
    pub fn is_active(&self, dim: i32) -> bool {
        dim_is_active(dim, self.dim_range())
    }

    /// `(time, dim)` of every leaf board, in ascending dimension order.
    pub fn leaves(&self) -> impl Iterator<Item = TimeDim> + '_ {
        self.timelines
            .values()
            .filter(|tl| !tl.is_empty())
            .map(|tl| TimeDim::new(tl.end_time(), tl.dim()))
    }

    /// One past the latest time on any timeline.
    pub fn max_length(&self) -> i32 {
        self.timelines
            .values()
            .map(|tl| tl.end_time() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Stores `board` at `at`, appending to timeline `at.dim` if it ends at `at.time - 1`.
    /// Otherwise a new timeline is spawned on `mover`'s side of the multiverse.
    ///
    /// Returns the dimension the board landed in.
    pub fn add_board(&mut self, at: TimeDim, board: Board, mover: Player) -> i32 {
        if let Some(tl) = self.timelines.get_mut(&at.dim) {
            if tl.end_time() + 1 == at.time {
                tl.push(board);
                return at.dim;
            }
        }
        let dim = mover.spawn_dim(self.dim_range());
        trace!(time = at.time, from = at.dim, dim, "spawning timeline");
        self.timelines.insert(dim, Timeline::new(dim, at.time, board));
        dim
    }

    /// Raw insertion at exactly `at`, used when rebuilding a multiverse piecewise.
    pub fn insert_board(&mut self, at: TimeDim, board: Board) -> Result<()> {
        match self.timelines.get_mut(&at.dim) {
            Some(tl) => {
                let expected = tl.end_time() + 1;
                if expected != at.time {
                    return Err(GameError::NotContiguous {
                        time: at.time,
                        dim: at.dim,
                        expected,
                    });
                }
                tl.push(board);
            }
            None => {
                self.timelines
                    .insert(at.dim, Timeline::new(at.dim, at.time, board));
            }
        }
        Ok(())
    }

    /// Pops the leaf of timeline `dim`, deleting the timeline once it is empty.
    pub fn remove_board(&mut self, dim: i32) -> Option<Board> {
        let tl = self.timelines.get_mut(&dim)?;
        let board = tl.pop();
        if tl.is_empty() {
            self.timelines.remove(&dim);
        }
        board
    }

    /// Mirror image for the other player: dimensions negated, boards rotated.
    pub fn flipped(&self) -> Multiverse {
        Multiverse {
            timelines: self
                .timelines
                .values()
                .map(|tl| {
                    let f = tl.flipped();
                    (f.dim(), f)
                })
                .collect(),
        }
    }
}

impl Default for Multiverse {
    fn default() -> Self {
        Multiverse::from_board(Board::standard())
    }
}

#[inline]
pub(crate) fn active_range_of((lo, hi): (i32, i32)) -> i32 {
    hi.min(-lo)
}

#[inline]
pub(crate) fn dim_is_active(dim: i32, range: (i32, i32)) -> bool {
    dim.abs() <= active_range_of(range) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_board_appends_then_branches_by_mover() {
        let mut mv = Multiverse::default();
        assert_eq!(mv.add_board(TimeDim::new(1, 0), Board::empty(), Player::P0), 0);
        // (1, 0) is taken now, so a second child of (0, 0) branches.
        assert_eq!(mv.add_board(TimeDim::new(1, 0), Board::empty(), Player::P0), -1);
        assert_eq!(mv.add_board(TimeDim::new(1, 0), Board::empty(), Player::P1), 1);
        assert_eq!(mv.dim_range(), (-1, 1));
        assert_eq!(mv.timeline(-1).map(Timeline::start_time), Some(1));

        let leaves: Vec<TimeDim> = mv.leaves().collect();
        assert_eq!(
            leaves,
            vec![TimeDim::new(1, -1), TimeDim::new(1, 0), TimeDim::new(1, 1)]
        );
    }

    #[test]
    fn remove_board_deletes_emptied_timeline() {
        let mut mv = Multiverse::default();
        let dim = mv.add_board(TimeDim::new(0, 0), Board::empty(), Player::P1);
        assert_eq!(dim, 1);
        assert!(mv.remove_board(dim).is_some());
        assert!(mv.timeline(dim).is_none());
        assert!(mv.remove_board(dim).is_none());
        assert_eq!(mv, Multiverse::default());
    }

    #[test]
    fn active_range_allows_one_timeline_lead() {
        let mut mv = Multiverse::default();
        assert_eq!(mv.active_range(), 0);
        mv.add_board(TimeDim::new(0, 0), Board::empty(), Player::P0);
        mv.add_board(TimeDim::new(0, 0), Board::empty(), Player::P0);
        assert_eq!(mv.dim_range(), (-2, 0));
        assert!(mv.is_active(-1));
        assert!(!mv.is_active(-2));
    }

    #[test]
    fn insert_board_rejects_gaps() {
        let mut mv = Multiverse::default();
        assert!(mv.insert_board(TimeDim::new(1, 0), Board::empty()).is_ok());
        assert_eq!(
            mv.insert_board(TimeDim::new(3, 0), Board::empty()),
            Err(GameError::NotContiguous {
                time: 3,
                dim: 0,
                expected: 2
            })
        );
        assert!(mv.contains(Coord::new(1, 0, 7, 7)));
        assert!(!mv.contains(Coord::new(1, 0, 8, 7)));
        assert!(!mv.contains(Coord::new(2, 0, 0, 0)));
    }
}
