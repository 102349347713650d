use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Side length of every board.
pub const BOARD_SIZE: i32 = 8;

/// A square on one 8x8 board.
///
/// Constructing one validates the range, so board accessors taking a `Square` never go out of
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    #[inline]
    pub fn new(rank: i32, file: i32) -> Option<Square> {
        if (0..BOARD_SIZE).contains(&rank) && (0..BOARD_SIZE).contains(&file) {
            Some(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            None
        }
    }

    /// Like [`Square::new`], but reports the offending pair.
    pub fn try_new(rank: i32, file: i32) -> Result<Square> {
        Square::new(rank, file).ok_or(GameError::InvalidSquare { rank, file })
    }

    #[inline]
    pub const fn rank(self) -> i32 {
        self.rank as i32
    }

    #[inline]
    pub const fn file(self) -> i32 {
        self.file as i32
    }

    /// The square seen from the other side of the board.
    #[inline]
    pub const fn rotated(self) -> Square {
        Square {
            rank: (BOARD_SIZE as u8) - 1 - self.rank,
            file: (BOARD_SIZE as u8) - 1 - self.file,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> (usize, usize) {
        (self.rank as usize, self.file as usize)
    }

    /// All 64 squares, rank-major.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square::at(rank, file)))
    }

    // Only for callers that iterate inside the board.
    #[inline]
    const fn at(rank: i32, file: i32) -> Square {
        Square {
            rank: rank as u8,
            file: file as u8,
        }
    }
}
