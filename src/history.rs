//! Undo history: a bounded ring buffer of turns.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::coord::PieceMove;

/// A committed piece move and the dimensions that received its new boards, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub mv: PieceMove,
    pub spawned: Vec<i32>,
}

/// One step back through the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popped {
    Move(RecordedMove),
    /// The end of the previous turn.
    Boundary,
}

/// Turns oldest-first; the last entry is the turn in progress.
///
/// With a limit, ending a turn drops the oldest turns beyond it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnHistory {
    turns: VecDeque<Vec<RecordedMove>>,
    limit: Option<usize>,
}

impl TurnHistory {
    pub fn new(limit: Option<usize>) -> Self {
        let mut turns = VecDeque::new();
        turns.push_back(Vec::new());
        Self { turns, limit }
    }

    pub fn record(&mut self, mv: PieceMove, spawned: Vec<i32>) {
        if let Some(turn) = self.turns.back_mut() {
            turn.push(RecordedMove { mv, spawned });
        } else {
            self.turns.push_back(vec![RecordedMove { mv, spawned }]);
        }
    }

    pub fn end_turn(&mut self) {
        self.turns.push_back(Vec::new());
        if let Some(limit) = self.limit {
            while self.turns.len() > limit {
                self.turns.pop_front();
            }
        }
    }

    /// Pops the latest move, or the latest turn boundary if the current turn is empty.
    /// `None` once nothing is left to undo.
    pub fn pop(&mut self) -> Option<Popped> {
        let len = self.turns.len();
        let current = self.turns.back_mut()?;
        if let Some(rec) = current.pop() {
            return Some(Popped::Move(rec));
        }
        if len > 1 {
            self.turns.pop_back();
            return Some(Popped::Boundary);
        }
        None
    }

    /// Number of moves in the turn in progress.
    pub fn current_turn_len(&self) -> usize {
        self.turns.back().map_or(0, Vec::len)
    }

    pub fn turns(&self) -> impl Iterator<Item = &[RecordedMove]> {
        self.turns.iter().map(Vec::as_slice)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.iter().all(Vec::is_empty)
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// The history of the colour-mirrored game.
    pub fn flipped(&self) -> TurnHistory {
        TurnHistory {
            turns: self
                .turns
                .iter()
                .map(|turn| {
                    turn.iter()
                        .map(|rec| RecordedMove {
                            mv: rec.mv.flipped(),
                            spawned: rec.spawned.iter().map(|d| -d).collect(),
                        })
                        .collect()
                })
                .collect(),
            limit: self.limit,
        }
    }
}

impl Default for TurnHistory {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coord::Coord;

    fn mv(time: i32) -> PieceMove {
        PieceMove::new(Coord::new(time, 0, 1, 0), Coord::new(time, 0, 2, 0))
    }

    #[test]
    fn pop_walks_back_through_boundaries() {
        let mut h = TurnHistory::new(None);
        h.record(mv(0), vec![0]);
        h.end_turn();
        h.record(mv(1), vec![0]);

        assert_eq!(h.current_turn_len(), 1);
        assert!(matches!(h.pop(), Some(Popped::Move(r)) if r.mv == mv(1)));
        assert_eq!(h.pop(), Some(Popped::Boundary));
        assert!(matches!(h.pop(), Some(Popped::Move(r)) if r.mv == mv(0)));
        assert_eq!(h.pop(), None);
        assert!(h.is_empty());
    }

    #[test]
    fn limit_keeps_last_two_turns() {
        let mut h = TurnHistory::new(Some(2));
        for t in 0..4 {
            h.record(mv(t), vec![0]);
            h.end_turn();
        }
        assert_eq!(h.len(), 2);
        let kept: Vec<usize> = h.turns().map(<[RecordedMove]>::len).collect();
        assert_eq!(kept, vec![1, 0]);
        assert_eq!(h.turns().next().unwrap()[0].mv, mv(3));
    }

    #[test]
    fn flipped_negates_spawned_dims() {
        let mut h = TurnHistory::default();
        h.record(mv(2), vec![0, -1]);
        let f = h.flipped();
        let rec = &f.turns().next().unwrap()[0];
        assert_eq!(rec.spawned, vec![0, 1]);
        assert_eq!(f.flipped(), h);
    }
}
