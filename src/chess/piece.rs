use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Unicorn,
    Dragon,
    Princess,
    Empty,
    /// Filler for squares of boards that do not exist (observation projections only).
    Blocked,
}

impl PieceKind {
    /// Which axis counts a sliding piece may change at once, or `None` for non-sliders.
    #[inline]
    pub fn slide_axis_counts(self) -> Option<&'static [usize]> {
        use PieceKind::*;
        match self {
            Rook => Some(&[1]),
            Bishop => Some(&[2]),
            Unicorn => Some(&[3]),
            Dragon => Some(&[4]),
            Princess => Some(&[1, 2]),
            Queen | King => Some(&[1, 2, 3, 4]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    P0,
    P1,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::P0 => Player::P1,
            Player::P1 => Player::P0,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::P0 => 0,
            Player::P1 => 1,
        }
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        if idx % 2 == 0 {
            Player::P0
        } else {
            Player::P1
        }
    }

    /// Pawn direction along rank and dimension.
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Player::P0 => 1,
            Player::P1 => -1,
        }
    }

    /// Direction in which this player's new timelines are numbered.
    #[inline]
    pub fn spawn_direction(self) -> i32 {
        match self {
            Player::P0 => -1,
            Player::P1 => 1,
        }
    }

    /// Dimension of the next timeline this player spawns, given the current `(lo, hi)` range.
    #[inline]
    pub fn spawn_dim(self, (lo, hi): (i32, i32)) -> i32 {
        match self {
            Player::P0 => lo + self.spawn_direction(),
            Player::P1 => hi + self.spawn_direction(),
        }
    }

    /// Rank a pawn of this player promotes on.
    #[inline]
    pub fn last_rank(self) -> i32 {
        match self {
            Player::P0 => crate::core::square::BOARD_SIZE - 1,
            Player::P1 => 0,
        }
    }
}

/// A piece value. Never mutated in place: state changes produce a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Option<Player>,
    pub unmoved: bool,
    pub en_passantable: bool,
}

impl Piece {
    pub const EMPTY: Piece = Piece {
        kind: PieceKind::Empty,
        owner: None,
        unmoved: false,
        en_passantable: false,
    };

    pub const BLOCKED: Piece = Piece {
        kind: PieceKind::Blocked,
        owner: None,
        unmoved: false,
        en_passantable: false,
    };

    /// A fresh, unmoved piece.
    #[inline]
    pub const fn new(kind: PieceKind, owner: Player) -> Self {
        Self {
            kind,
            owner: Some(owner),
            unmoved: true,
            en_passantable: false,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.owner.is_none()
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.kind == PieceKind::King
    }

    /// The same piece after it has moved.
    #[inline]
    pub fn moved(self) -> Self {
        Self {
            unmoved: false,
            en_passantable: false,
            ..self
        }
    }

    #[inline]
    pub fn with_en_passant(self, en_passantable: bool) -> Self {
        Self {
            en_passantable,
            ..self
        }
    }

    #[inline]
    pub fn promoted(self, kind: PieceKind) -> Self {
        Self { kind, ..self }
    }

    /// The same piece owned by the other player (used when mirroring a game).
    #[inline]
    pub fn recoloured(self) -> Self {
        Self {
            owner: self.owner.map(Player::other),
            ..self
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::EMPTY
    }
}
