use serde::{Deserialize, Serialize};

use crate::core::square::{Square, BOARD_SIZE};

/// Number of axes a piece can move along.
pub const AXES: usize = 4;

pub const TIME: usize = 0;
pub const DIM: usize = 1;
pub const RANK: usize = 2;
pub const FILE: usize = 3;

/// A square in the multiverse: `(time, dim, rank, file)`.
///
/// Axis order is fixed (time, dimension, rank, file) and drives enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub time: i32,
    pub dim: i32,
    pub rank: i32,
    pub file: i32,
}

impl Coord {
    #[inline]
    pub const fn new(time: i32, dim: i32, rank: i32, file: i32) -> Self {
        Self {
            time,
            dim,
            rank,
            file,
        }
    }

    #[inline]
    pub const fn from_axes(a: [i32; AXES]) -> Self {
        Self::new(a[TIME], a[DIM], a[RANK], a[FILE])
    }

    #[inline]
    pub const fn axes(self) -> [i32; AXES] {
        [self.time, self.dim, self.rank, self.file]
    }

    /// Copy moved by a whole 4-axis offset.
    #[inline]
    pub fn offset(self, delta: [i32; AXES]) -> Self {
        let mut a = self.axes();
        for (v, d) in a.iter_mut().zip(delta) {
            *v += d;
        }
        Self::from_axes(a)
    }

    /// Copy with one axis shifted by `delta`.
    #[inline]
    pub fn shifted(self, axis: usize, delta: i32) -> Self {
        let mut a = self.axes();
        a[axis] += delta;
        Self::from_axes(a)
    }

    #[inline]
    pub const fn td(self) -> TimeDim {
        TimeDim::new(self.time, self.dim)
    }

    /// The on-board part, if it lies inside the 8x8 board.
    #[inline]
    pub fn square(self) -> Option<Square> {
        Square::new(self.rank, self.file)
    }

    /// The same square in the colour-mirrored game.
    #[inline]
    pub const fn flipped(self) -> Self {
        Self::new(
            self.time,
            -self.dim,
            BOARD_SIZE - 1 - self.rank,
            BOARD_SIZE - 1 - self.file,
        )
    }
}

/// A board coordinate: `(time, dim)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeDim {
    pub time: i32,
    pub dim: i32,
}

impl TimeDim {
    #[inline]
    pub const fn new(time: i32, dim: i32) -> Self {
        Self { time, dim }
    }

    #[inline]
    pub const fn at(self, sq: Square) -> Coord {
        Coord::new(self.time, self.dim, sq.rank(), sq.file())
    }

    /// The board one ply later on the same timeline.
    #[inline]
    pub const fn next(self) -> Self {
        Self::new(self.time + 1, self.dim)
    }
}

/// A piece move between two squares of the multiverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceMove {
    pub from: Coord,
    pub to: Coord,
}

impl PieceMove {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    /// True iff the move leaves its board (time travel or a dimension jump).
    #[inline]
    pub fn is_cross_board(self) -> bool {
        self.from.td() != self.to.td()
    }

    #[inline]
    pub const fn flipped(self) -> Self {
        Self::new(self.from.flipped(), self.to.flipped())
    }
}

/// One step along `axis`: time counts double, since a full turn spans two plies.
#[inline]
pub const fn unit(axis: usize) -> i32 {
    if axis == TIME {
        2
    } else {
        1
    }
}
