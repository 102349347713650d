use crate::chess::piece::{Piece, Player};
use crate::core::coord::{Coord, TimeDim};
use crate::core::position::Position;

use super::movegen::player_moves;

/// Every destination `player` could move to next, with repeats.
///
/// Castling is never included: it cannot capture, and its legality is itself computed from
/// attacked squares. With `time_travel = false`, moves leaving their board are skipped.
pub fn attacked_squares(pos: &Position, player: Player, time_travel: bool) -> Vec<Coord> {
    player_moves(pos, player, false)
        .into_iter()
        .filter(|mv| time_travel || !mv.is_cross_board())
        .map(|mv| mv.to)
        .collect()
}

/// True iff `player` could capture any king with one move.
pub fn attacks_king(pos: &Position, player: Player) -> bool {
    attacked_squares(pos, player, true)
        .into_iter()
        .any(|to| pos.multiverse.piece_at(to).is_some_and(Piece::is_king))
}

/// Whether the player to move at the present is in check.
///
/// Every active board at the present is passed first, so the opponent's attacks are scanned
/// from the position they would face. The passes are undone before returning.
pub fn present_player_in_check(pos: &mut Position) -> bool {
    let present = pos.present();
    let player = pos.player_at(present);

    let passed = pass_present_boards(pos, present);
    let in_check = attacks_king(pos, player.other());
    pos.revert(&passed);

    in_check
}

/// Whether the player to move at the present could capture a king right now.
pub fn present_player_can_win(pos: &Position) -> bool {
    attacks_king(pos, pos.player_at(pos.present()))
}

fn pass_present_boards(pos: &mut Position, present: i32) -> Vec<i32> {
    let boards: Vec<TimeDim> = pos
        .multiverse
        .leaves()
        .filter(|td| td.time == present && pos.is_active(td.dim))
        .collect();

    let mut passed = Vec::with_capacity(boards.len());
    for td in boards {
        if let Some(board) = pos.multiverse.board_at(td).cloned() {
            passed.push(pos.add_child(td, board));
        }
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::board::Board;
    use crate::chess::piece::PieceKind;
    use crate::core::square::Square;
    use crate::multiverse::Multiverse;

    fn board_with(pieces: &[(i32, i32, PieceKind, Player)]) -> Board {
        let mut b = Board::empty();
        for &(rank, file, kind, owner) in pieces {
            b.set(Square::new(rank, file).unwrap(), Piece::new(kind, owner));
        }
        b
    }

    #[test]
    fn rook_on_open_file_gives_check_and_pass_is_undone() {
        let board = board_with(&[
            (0, 0, PieceKind::King, Player::P0),
            (7, 4, PieceKind::King, Player::P1),
            (3, 0, PieceKind::Rook, Player::P1),
        ]);
        let mut pos = Position::new(Multiverse::from_board(board), Player::P0);
        let before = pos.clone();
        assert!(present_player_in_check(&mut pos));
        assert_eq!(pos, before);
        assert!(!present_player_can_win(&pos));
    }

    #[test]
    fn time_travel_filter_keeps_only_same_board_moves() {
        let pos = Position::default();
        let all = attacked_squares(&pos, Player::P0, true);
        let local = attacked_squares(&pos, Player::P0, false);
        assert_eq!(all, local);
        assert!(local.iter().all(|c| c.td() == TimeDim::new(0, 0)));
    }
}
