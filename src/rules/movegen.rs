use std::ops::ControlFlow;
use std::sync::OnceLock;

use crate::arena::enumerate::choose_k;
use crate::chess::board::Board;
use crate::chess::piece::{Piece, PieceKind, Player};
use crate::core::coord::{unit, Coord, PieceMove, TimeDim, AXES, DIM, FILE, RANK, TIME};
use crate::core::position::Position;
use crate::core::square::{Square, BOARD_SIZE};
use crate::multiverse::{Multiverse, Timeline};

use super::attacks::attacked_squares;

/// Unit offsets, in enumeration order.
struct StepTables {
    /// `slides[k]`: every signed direction changing exactly `k` axes at once.
    slides: [Vec<[i32; AXES]>; AXES + 1],
    knight: Vec<[i32; AXES]>,
}

impl StepTables {
    fn build() -> Self {
        let axes: Vec<usize> = (0..AXES).collect();
        let slides = std::array::from_fn(|k| {
            let mut dirs = Vec::new();
            if k == 0 {
                return dirs;
            }
            let mut chosen = Vec::with_capacity(k);
            let _ = choose_k(&axes, k, 0, &mut chosen, &mut |combo: &[usize]| {
                // Signs run from all-negative upwards, first axis slowest.
                for mask in 0..(1u32 << k) {
                    let mut dir = [0; AXES];
                    for (p, &axis) in combo.iter().enumerate() {
                        let sign = if (mask >> (k - 1 - p)) & 1 == 1 { 1 } else { -1 };
                        dir[axis] = sign * unit(axis);
                    }
                    dirs.push(dir);
                }
                ControlFlow::Continue(())
            });
            dirs
        });

        // One axis by one unit and another by two, over ordered axis pairs.
        let mut knight = Vec::with_capacity(48);
        for a in 0..AXES {
            for b in (0..AXES).filter(|&b| b != a) {
                for sa in [-1, 1] {
                    for sb in [-1, 1] {
                        let mut d = [0; AXES];
                        d[a] += sa * unit(a);
                        d[b] += 2 * sb * unit(b);
                        knight.push(d);
                    }
                }
            }
        }

        Self { slides, knight }
    }
}

fn tables() -> &'static StepTables {
    static TABLES: OnceLock<StepTables> = OnceLock::new();
    TABLES.get_or_init(StepTables::build)
}

/// Every square the piece at `from` may move to, in a fixed order.
///
/// Sliders first (by number of axes changed), then knight leaps, pawn moves and castling.
/// `castling = false` is used whenever the result feeds an attack scan.
pub fn piece_destinations(pos: &Position, from: Coord, castling: bool) -> Vec<Coord> {
    let mut out = Vec::new();
    let Some(piece) = pos.multiverse.piece_at(from) else {
        return out;
    };
    let Some(owner) = piece.owner else {
        return out;
    };

    if let Some(counts) = piece.kind.slide_axis_counts() {
        for &k in counts {
            for &dir in &tables().slides[k] {
                slide(&pos.multiverse, from, piece, dir, &mut out);
            }
        }
    }

    match piece.kind {
        PieceKind::Knight => {
            for &delta in &tables().knight {
                let to = from.offset(delta);
                if pos
                    .multiverse
                    .piece_at(to)
                    .is_some_and(|p| p.owner != piece.owner)
                {
                    out.push(to);
                }
            }
        }
        PieceKind::Pawn => pawn_destinations(&pos.multiverse, from, piece, owner, &mut out),
        PieceKind::King if castling && piece.unmoved => {
            castling_destinations(pos, from, owner, &mut out)
        }
        _ => {}
    }
    out
}

fn slide(mv: &Multiverse, from: Coord, piece: Piece, dir: [i32; AXES], out: &mut Vec<Coord>) {
    let mut to = from.offset(dir);
    while let Some(p) = mv.piece_at(to) {
        if p.owner == piece.owner {
            break;
        }
        out.push(to);
        if !p.is_empty() || piece.is_king() {
            break;
        }
        to = to.offset(dir);
    }
}

fn pawn_destinations(mv: &Multiverse, from: Coord, piece: Piece, owner: Player, out: &mut Vec<Coord>) {
    let dir = owner.forward();

    for axis in [RANK, DIM] {
        let mut to = from;
        for _ in 0..1 + usize::from(piece.unmoved) {
            to = to.shifted(axis, dir);
            match mv.piece_at(to) {
                Some(p) if p.is_empty() => out.push(to),
                _ => break,
            }
        }
    }

    // Diagonals capture only. The time diagonal reaches one ply back or forward.
    for (forward, side) in [(RANK, FILE), (DIM, TIME)] {
        for sign in [-1, 1] {
            let to = from.shifted(forward, dir).shifted(side, sign);
            if mv
                .piece_at(to)
                .is_some_and(|p| p.owner.is_some() && p.owner != piece.owner)
            {
                out.push(to);
            }
        }
    }

    for file in [from.file + 1, from.file - 1] {
        let beside = Coord { file, ..from };
        let passed = mv
            .piece_at(beside)
            .is_some_and(|p| p.en_passantable && p.owner != piece.owner);
        let to = Coord::new(from.time, from.dim, from.rank + dir, file);
        if passed && to.square().is_some() {
            out.push(to);
        }
    }
}

fn castling_destinations(pos: &Position, from: Coord, owner: Player, out: &mut Vec<Coord>) {
    let Some(board) = pos.multiverse.board_at(from.td()) else {
        return;
    };
    let mut attacked: Option<Vec<Square>> = None;

    for rook_file in [0, BOARD_SIZE - 1] {
        let Some(rook_sq) = Square::new(from.rank, rook_file) else {
            continue;
        };
        let rook = board.get(rook_sq);
        if rook.owner != Some(owner) || rook.kind != PieceKind::Rook || !rook.unmoved {
            continue;
        }
        let dir = (rook_file - from.file).signum();
        let dist = (rook_file - from.file).abs();
        // The king lands strictly between its square and the rook.
        if dist < 3 {
            continue;
        }
        let clear = (1..dist).all(|k| {
            Square::new(from.rank, from.file + dir * k).is_some_and(|sq| board.get(sq).is_empty())
        });
        if !clear {
            continue;
        }

        let attacked =
            attacked.get_or_insert_with(|| passed_board_attacks(pos, from.td(), board, owner.other()));
        let hops_attacked = (1..=2).any(|k| {
            attacked
                .iter()
                .any(|sq| sq.rank() == from.rank && sq.file() == from.file + dir * k)
        });
        if !hops_attacked {
            out.push(Coord {
                file: from.file + 2 * dir,
                ..from
            });
        }
    }
}

/// Squares `attacker` reaches on a passed copy of `board`, ignoring time travel.
fn passed_board_attacks(pos: &Position, td: TimeDim, board: &Board, attacker: Player) -> Vec<Square> {
    let mut timeline = Timeline::new(td.dim, td.time, board.clone());
    timeline.push(board.clone());
    let scratch = Position::new(Multiverse::new(timeline), pos.first_player);
    attacked_squares(&scratch, attacker, false)
        .into_iter()
        .filter_map(Coord::square)
        .collect()
}

/// All moves from one board, by the player who moves there. Pieces go rank-major.
pub fn board_moves(pos: &Position, td: TimeDim, castling: bool) -> Vec<PieceMove> {
    let Some(board) = pos.multiverse.board_at(td) else {
        return Vec::new();
    };
    let mover = pos.player_at(td.time);
    board
        .pieces_of(mover)
        .flat_map(|sq| {
            let from = td.at(sq);
            piece_destinations(pos, from, castling)
                .into_iter()
                .map(move |to| PieceMove::new(from, to))
        })
        .collect()
}

/// Every move from every leaf `player` moves on, inactive timelines included.
pub fn player_moves(pos: &Position, player: Player, castling: bool) -> Vec<PieceMove> {
    pos.leaves_of(player)
        .flat_map(|td| board_moves(pos, td, castling))
        .collect()
}

#[inline]
pub fn captures_king(pos: &Position, mv: PieceMove) -> bool {
    pos.multiverse.piece_at(mv.to).is_some_and(Piece::is_king)
}

/// The moves `player` may select from. If any move captures a king, only those are offered.
pub fn selection_moves(pos: &Position, player: Player, castling: bool) -> Vec<PieceMove> {
    let moves = player_moves(pos, player, castling);
    let king_captures: Vec<PieceMove> = moves
        .iter()
        .copied()
        .filter(|&mv| captures_king(pos, mv))
        .collect();
    if king_captures.is_empty() {
        moves
    } else {
        king_captures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_tables_have_expected_sizes() {
        let t = tables();
        // C(4, k) * 2^k
        assert_eq!(t.slides[1].len(), 8);
        assert_eq!(t.slides[2].len(), 24);
        assert_eq!(t.slides[3].len(), 32);
        assert_eq!(t.slides[4].len(), 16);
        assert_eq!(t.knight.len(), 48);
        assert_eq!(t.slides[1][0], [-2, 0, 0, 0]);
        assert_eq!(t.slides[1][1], [2, 0, 0, 0]);
        assert_eq!(t.slides[2][0], [-2, -1, 0, 0]);
    }

    #[test]
    fn single_board_start_has_twenty_moves() {
        let pos = Position::default();
        let moves = selection_moves(&pos, Player::P0, true);
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|mv| !mv.is_cross_board()));
        assert!(selection_moves(&pos, Player::P1, true).is_empty());
    }
}
