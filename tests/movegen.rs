use multiverse_chess::chess::board::Board;
use multiverse_chess::chess::config::GameConfig;
use multiverse_chess::chess::piece::{Piece, PieceKind, Player};
use multiverse_chess::core::coord::{Coord, PieceMove};
use multiverse_chess::core::square::Square;
use multiverse_chess::game::{Game, Move};

fn board_with(pieces: &[(i32, i32, Piece)]) -> Board {
    let mut b = Board::empty();
    for &(rank, file, piece) in pieces {
        b.set(Square::new(rank, file).unwrap(), piece);
    }
    b
}

fn white(kind: PieceKind) -> Piece {
    Piece::new(kind, Player::P0)
}

fn black(kind: PieceKind) -> Piece {
    Piece::new(kind, Player::P1)
}

fn pm(from: (i32, i32, i32, i32), to: (i32, i32, i32, i32)) -> PieceMove {
    PieceMove::new(
        Coord::new(from.0, from.1, from.2, from.3),
        Coord::new(to.0, to.1, to.2, to.3),
    )
}

#[test]
fn start_position_offers_twenty_moves_starting_with_knight() {
    let game = Game::default();
    let moves = game.global_selection_moves();
    assert_eq!(moves.len(), 20);
    // Rook on (0,0) is boxed in, so the queenside knight comes first.
    assert_eq!(moves[0], pm((0, 0, 0, 1), (0, 0, 2, 0)));
    assert!(moves.contains(&pm((0, 0, 1, 4), (0, 0, 3, 4))));
    assert_eq!(game.valid_special_moves(), Vec::<Move>::new());
}

#[test]
fn enumeration_is_deterministic() {
    let game = Game::default();
    assert_eq!(game.valid_selection_moves(), game.valid_selection_moves());
    assert_eq!(game.all_valid_moves(), game.all_valid_moves());
}

#[test]
fn castling_is_offered_when_hop_squares_are_safe() {
    let board = board_with(&[
        (0, 4, white(PieceKind::King)),
        (0, 7, white(PieceKind::Rook)),
        (0, 0, white(PieceKind::Rook)),
        (7, 4, black(PieceKind::King)),
    ]);
    let mut game = Game::from_board(board, GameConfig::default());
    let moves = game.global_selection_moves();
    let short = pm((0, 0, 0, 4), (0, 0, 0, 6));
    let long = pm((0, 0, 0, 4), (0, 0, 0, 2));
    assert!(moves.contains(&short));
    assert!(moves.contains(&long));

    game.apply_global(short.into()).unwrap();
    let king = game.piece_at(Coord::new(1, 0, 0, 6)).unwrap();
    let rook = game.piece_at(Coord::new(1, 0, 0, 5)).unwrap();
    assert_eq!(king.kind, PieceKind::King);
    assert_eq!(rook.kind, PieceKind::Rook);
    assert!(game.piece_at(Coord::new(1, 0, 0, 7)).unwrap().is_empty());
}

#[test]
fn castling_is_withheld_when_a_hop_square_is_attacked() {
    let board = board_with(&[
        (0, 4, white(PieceKind::King)),
        (0, 7, white(PieceKind::Rook)),
        (7, 4, black(PieceKind::King)),
        (7, 5, black(PieceKind::Rook)),
    ]);
    let game = Game::from_board(board, GameConfig::default());
    let moves = game.global_selection_moves();
    assert!(!moves.contains(&pm((0, 0, 0, 4), (0, 0, 0, 6))));
    // Stepping onto the attacked square is still a selection move.
    assert!(moves.contains(&pm((0, 0, 0, 4), (0, 0, 0, 5))));
}

#[test]
fn castling_needs_an_unmoved_rook() {
    let board = board_with(&[
        (0, 4, white(PieceKind::King)),
        (0, 7, white(PieceKind::Rook).moved()),
        (7, 4, black(PieceKind::King)),
    ]);
    let game = Game::from_board(board, GameConfig::default());
    assert!(!game
        .global_selection_moves()
        .contains(&pm((0, 0, 0, 4), (0, 0, 0, 6))));
}

#[test]
fn king_capture_is_forced_when_available() {
    let board = board_with(&[
        (0, 4, white(PieceKind::King)),
        (3, 4, white(PieceKind::Rook)),
        (7, 4, black(PieceKind::King)),
    ]);
    let game = Game::from_board(board, GameConfig::default());
    assert_eq!(
        game.global_selection_moves(),
        vec![pm((0, 0, 3, 4), (0, 0, 7, 4))]
    );
}

#[test]
fn en_passant_follows_a_double_step() {
    let board = board_with(&[
        (0, 0, white(PieceKind::King)),
        (4, 4, white(PieceKind::Pawn).moved()),
        (7, 7, black(PieceKind::King)),
        (6, 3, black(PieceKind::Pawn)),
    ]);
    let mut game = Game::from_board(board, GameConfig::default());
    for mv in [
        pm((0, 0, 0, 0), (0, 0, 0, 1)).into(),
        Move::EndTurn,
        pm((1, 0, 6, 3), (1, 0, 4, 3)).into(),
        Move::EndTurn,
    ] {
        game.apply_global(mv).unwrap();
    }

    let capture = pm((2, 0, 4, 4), (2, 0, 5, 3));
    assert!(game.global_selection_moves().contains(&capture));

    let outcome = game.apply_global(capture.into()).unwrap();
    assert_eq!(outcome.captured.kind, PieceKind::Pawn);
    assert_eq!(outcome.captured.owner, Some(Player::P1));
    assert!(game.piece_at(Coord::new(3, 0, 4, 3)).unwrap().is_empty());
}

#[test]
fn knights_can_jump_back_in_time() {
    let mut game = Game::default();
    for mv in [
        pm((0, 0, 0, 1), (0, 0, 2, 2)).into(),
        Move::EndTurn,
        pm((1, 0, 6, 0), (1, 0, 5, 0)).into(),
        Move::EndTurn,
    ] {
        game.apply_global(mv).unwrap();
    }
    let moves = game.global_selection_moves();
    assert!(moves.contains(&pm((2, 0, 2, 2), (0, 0, 4, 2))));
    assert!(moves.iter().any(|mv| mv.is_cross_board()));
}

#[test]
fn local_coordinates_mirror_the_second_player() {
    let mut game = Game::default();
    game.apply_global(pm((0, 0, 1, 4), (0, 0, 3, 4)).into())
        .unwrap();
    game.apply_global(Move::EndTurn).unwrap();
    assert_eq!(game.current_player(), Player::P1);

    let global = game.global_selection_moves();
    let local = game.valid_selection_moves();
    assert_eq!(local.len(), global.len());
    for (g, l) in global.iter().zip(&local) {
        assert_eq!(game.to_local(Move::from(*g)), *l);
        assert_eq!(game.to_global(*l), Move::from(*g));
    }

    // Black's a-pawn seen from black's side of the board.
    let first = pm((1, 0, 6, 0), (1, 0, 5, 0));
    assert_eq!(global[0], first);
    assert_eq!(
        local[0],
        Move::Piece {
            from: Coord::new(1, 0, 1, 7),
            to: Coord::new(1, 0, 2, 7),
        }
    );
}

#[test]
fn pawn_time_diagonal_reaches_one_ply_either_way() {
    use multiverse_chess::core::position::Position;
    use multiverse_chess::multiverse::{Multiverse, Timeline};
    use multiverse_chess::rules::movegen::piece_destinations;

    let home = board_with(&[(3, 3, white(PieceKind::Pawn).moved())]);
    let next_door = board_with(&[(3, 3, black(PieceKind::Rook))]);
    let multiverse = Multiverse::from_timelines([
        Timeline::from_boards(0, 0, vec![home.clone(), home.clone(), home]),
        Timeline::from_boards(1, 0, vec![next_door; 5]),
    ])
    .unwrap();
    let pos = Position::new(multiverse, Player::P0);

    let from = Coord::new(2, 0, 3, 3);
    assert_eq!(
        piece_destinations(&pos, from, false),
        vec![
            Coord::new(2, 0, 4, 3),
            Coord::new(1, 1, 3, 3),
            Coord::new(3, 1, 3, 3),
        ]
    );
}
