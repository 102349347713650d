use serde::{Deserialize, Serialize};

use crate::chess::board::Board;

/// One branch of play: `boards[k]` is the board at time `start_time + k`.
///
/// Only the last board (the leaf) may source a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    dim: i32,
    start_time: i32,
    boards: Vec<Board>,
}

impl Timeline {
    pub fn new(dim: i32, start_time: i32, board: Board) -> Self {
        Self::from_boards(dim, start_time, vec![board])
    }

    pub fn from_boards(dim: i32, start_time: i32, boards: Vec<Board>) -> Self {
        Self {
            dim,
            start_time,
            boards,
        }
    }

    #[inline]
    pub fn dim(&self) -> i32 {
        self.dim
    }

    #[inline]
    pub fn start_time(&self) -> i32 {
        self.start_time
    }

    /// Time of the leaf board. Equals `start_time - 1` for an empty timeline.
    #[inline]
    pub fn end_time(&self) -> i32 {
        self.start_time + self.boards.len() as i32 - 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn board_at(&self, time: i32) -> Option<&Board> {
        if time < self.start_time {
            return None;
        }
        self.boards.get((time - self.start_time) as usize)
    }

    pub fn leaf(&self) -> Option<&Board> {
        self.boards.last()
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn push(&mut self, board: Board) {
        self.boards.push(board);
    }

    pub fn pop(&mut self) -> Option<Board> {
        self.boards.pop()
    }

    /// Mirror image for the other player's point of view.
    pub fn flipped(&self) -> Timeline {
        Timeline {
            dim: -self.dim,
            start_time: self.start_time,
            boards: self.boards.iter().map(Board::rotated).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_are_offset_by_start() {
        let mut tl = Timeline::new(-2, 3, Board::standard());
        tl.push(Board::empty());
        assert_eq!(tl.end_time(), 4);
        assert!(tl.board_at(2).is_none());
        assert_eq!(tl.board_at(3), Some(&Board::standard()));
        assert_eq!(tl.board_at(4), Some(&Board::empty()));
        assert!(tl.board_at(5).is_none());
        assert_eq!(tl.pop(), Some(Board::empty()));
        assert_eq!(tl.end_time(), 3);
    }
}
