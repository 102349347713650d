use serde::{Deserialize, Serialize};

use crate::chess::piece::{Piece, PieceKind, Player};
use crate::core::square::{Square, BOARD_SIZE};
use crate::error::Result;

const N: usize = BOARD_SIZE as usize;

const BACK_RANK: [PieceKind; N] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// One 8x8 position.
///
/// Once a board has been placed into a timeline it is only read; every move produces a new board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Piece; N]; N],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Piece::EMPTY; N]; N],
        }
    }

    /// The classical start position, P0 on ranks 0-1 and P1 on ranks 6-7.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            board.cells[0][file] = Piece::new(kind, Player::P0);
            board.cells[1][file] = Piece::new(PieceKind::Pawn, Player::P0);
            board.cells[N - 2][file] = Piece::new(PieceKind::Pawn, Player::P1);
            board.cells[N - 1][file] = Piece::new(kind, Player::P1);
        }
        board
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Piece {
        let (r, f) = sq.index();
        self.cells[r][f]
    }

    /// Checked lookup by raw indices.
    pub fn piece_at(&self, rank: i32, file: i32) -> Result<Piece> {
        Ok(self.get(Square::try_new(rank, file)?))
    }

    /// Overwrites a square, returning what was there.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Piece) -> Piece {
        let (r, f) = sq.index();
        std::mem::replace(&mut self.cells[r][f], piece)
    }

    /// Drops `piece` onto `sq`, returning the captured occupant (empty if none).
    pub fn add_piece(&mut self, sq: Square, piece: Piece) -> Piece {
        self.set(sq, piece)
    }

    /// Clears `sq`, returning the removed piece.
    pub fn remove_piece(&mut self, sq: Square) -> Piece {
        self.set(sq, Piece::EMPTY)
    }

    /// Non-mutating move: returns `(new_board, moved_piece, captured_piece)`.
    pub fn move_piece(&self, from: Square, to: Square) -> (Board, Piece, Piece) {
        let mut next = self.clone();
        let (moved, captured) = next.move_piece_in_place(from, to);
        (next, moved, captured)
    }

    /// Moves a piece on this board, applying castling, en passant, double-step marking and
    /// promotion. Returns `(moved_piece, captured_piece)`.
    pub fn move_piece_in_place(&mut self, from: Square, to: Square) -> (Piece, Piece) {
        let piece = self.remove_piece(from);
        let mut moved = piece.moved();
        let mut captured = self.get(to);

        match piece.kind {
            PieceKind::Pawn => {
                if (to.rank() - from.rank()).abs() == 2 {
                    moved = moved.with_en_passant(true);
                }
                if to.file() != from.file() && captured.is_empty() {
                    if let Some(victim_sq) = Square::new(from.rank(), to.file()) {
                        let victim = self.get(victim_sq);
                        if victim.kind == PieceKind::Pawn
                            && victim.en_passantable
                            && victim.owner != piece.owner
                        {
                            captured = self.remove_piece(victim_sq);
                        }
                    }
                }
                if piece.owner.map(Player::last_rank) == Some(to.rank()) {
                    moved = moved.promoted(PieceKind::Queen);
                }
            }
            PieceKind::King if (to.file() - from.file()).abs() > 1 => {
                let dir = (to.file() - from.file()).signum();
                let rook_file = if dir < 0 { 0 } else { BOARD_SIZE - 1 };
                if let (Some(rook_from), Some(rook_to)) = (
                    Square::new(from.rank(), rook_file),
                    Square::new(from.rank(), to.file() - dir),
                ) {
                    self.move_piece_in_place(rook_from, rook_to);
                }
            }
            _ => {}
        }

        self.set(to, moved);
        (moved, captured)
    }

    /// Clears en-passant eligibility everywhere except on `just_moved`.
    pub fn clear_stale_en_passant(&mut self, just_moved: Option<Square>) {
        for sq in Square::all() {
            if Some(sq) == just_moved {
                continue;
            }
            let p = self.get(sq);
            if p.en_passantable {
                self.set(sq, p.with_en_passant(false));
            }
        }
    }

    /// Every square with its piece, rank-major.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().map(move |sq| (sq, self.get(sq)))
    }

    /// Squares holding `player`'s pieces, rank-major.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = Square> + '_ {
        self.iter()
            .filter(move |(_, p)| p.owner == Some(player))
            .map(|(sq, _)| sq)
    }

    /// The board seen from the other side: rotated 180 degrees with owners swapped.
    pub fn rotated(&self) -> Board {
        let mut out = Board::empty();
        for (sq, p) in self.iter() {
            out.set(sq.rotated(), p.recoloured());
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(rank: i32, file: i32) -> Square {
        Square::new(rank, file).unwrap()
    }

    #[test]
    fn standard_layout_is_mirrored_by_rank() {
        let b = Board::standard();
        assert_eq!(b.get(sq(0, 4)), Piece::new(PieceKind::King, Player::P0));
        assert_eq!(b.get(sq(7, 4)), Piece::new(PieceKind::King, Player::P1));
        assert_eq!(b.get(sq(0, 3)).kind, PieceKind::Queen);
        assert_eq!(b.pieces_of(Player::P0).count(), 16);
        assert_eq!(b.pieces_of(Player::P1).count(), 16);
        assert!(b.piece_at(8, 0).is_err());
    }

    #[test]
    fn move_is_non_mutating_and_marks_double_step() {
        let b = Board::standard();
        let (next, moved, captured) = b.move_piece(sq(1, 4), sq(3, 4));
        assert_eq!(b, Board::standard());
        assert!(captured.is_empty());
        assert!(moved.en_passantable);
        assert!(!moved.unmoved);
        assert_eq!(next.get(sq(3, 4)), moved);
        assert!(next.get(sq(1, 4)).is_empty());
    }

    #[test]
    fn castling_relocates_rook_in_same_call() {
        let mut b = Board::empty();
        b.set(sq(0, 4), Piece::new(PieceKind::King, Player::P0));
        b.set(sq(0, 0), Piece::new(PieceKind::Rook, Player::P0));
        b.set(sq(0, 7), Piece::new(PieceKind::Rook, Player::P0));

        let (short, _, _) = b.move_piece(sq(0, 4), sq(0, 6));
        assert_eq!(short.get(sq(0, 5)).kind, PieceKind::Rook);
        assert!(short.get(sq(0, 7)).is_empty());

        let (long, _, _) = b.move_piece(sq(0, 4), sq(0, 2));
        assert_eq!(long.get(sq(0, 3)).kind, PieceKind::Rook);
        assert!(long.get(sq(0, 0)).is_empty());
        assert!(!long.get(sq(0, 3)).unmoved);
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let mut b = Board::empty();
        b.set(sq(4, 4), Piece::new(PieceKind::Pawn, Player::P0).moved());
        b.set(
            sq(4, 3),
            Piece::new(PieceKind::Pawn, Player::P1).moved().with_en_passant(true),
        );
        let (next, _, captured) = b.move_piece(sq(4, 4), sq(5, 3));
        assert_eq!(captured.owner, Some(Player::P1));
        assert!(next.get(sq(4, 3)).is_empty());
        assert_eq!(next.get(sq(5, 3)).owner, Some(Player::P0));
    }

    #[test]
    fn pawn_promotes_on_last_rank() {
        let mut b = Board::empty();
        b.set(sq(1, 2), Piece::new(PieceKind::Pawn, Player::P1).moved());
        let (next, moved, _) = b.move_piece(sq(1, 2), sq(0, 2));
        assert_eq!(moved.kind, PieceKind::Queen);
        assert_eq!(next.get(sq(0, 2)).kind, PieceKind::Queen);
    }

    #[test]
    fn depassant_keeps_only_the_just_moved_pawn() {
        let mut b = Board::empty();
        let ep = Piece::new(PieceKind::Pawn, Player::P0).moved().with_en_passant(true);
        b.set(sq(3, 0), ep);
        b.set(sq(3, 5), ep);
        b.clear_stale_en_passant(Some(sq(3, 5)));
        assert!(!b.get(sq(3, 0)).en_passantable);
        assert!(b.get(sq(3, 5)).en_passantable);
        b.clear_stale_en_passant(None);
        assert!(!b.get(sq(3, 5)).en_passantable);
    }
}
