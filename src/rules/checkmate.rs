use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::arena::enumerate::for_each_turn_set;
use crate::chess::piece::Player;
use crate::core::position::Position;
use crate::game::{Game, GameResult};

use super::attacks::present_player_can_win;

/// True if every turn `player` could play leaves a king capturable by the opponent, including
/// the case where `player` has no valid turn at all.
///
/// Each turn set is replayed in its enumeration order only. Other orders can number spawned
/// timelines differently; those are not tried.
pub fn is_checkmate_or_stalemate(pos: &Position, player: Player) -> bool {
    let escape = for_each_turn_set(pos, player, &mut |moves| {
        let mut probe = pos.clone();
        for &mv in moves {
            if !probe.multiverse.is_leaf(mv.from.td()) {
                panic!("turn set replays {mv:?} from a board that has already moved");
            }
            if let Err(err) = probe.apply(mv) {
                panic!("turn set replays {mv:?} onto a missing square: {err}");
            }
        }
        if present_player_can_win(&probe) {
            ControlFlow::Continue(())
        } else {
            trace!(?moves, "turn set escapes check");
            ControlFlow::Break(())
        }
    });
    escape.is_continue()
}

/// Classifies a game whose last move captured a king or left the mover without moves.
///
/// Works on a clone: rolls back the last turn (and the opponent's turn before it when a king
/// was taken) and re-probes check and the available turns from there.
pub fn evaluate_terminal(game: &Game) -> GameResult {
    let mut probe = game.clone();
    let last = probe.current_player();
    let opponent = last.other();

    let last_turn = probe.undo_turn(true);
    let king_captured = last_turn.iter().any(|undone| undone.captured.is_king());
    debug!(?last, king_captured, "evaluating terminal position");

    let result = if king_captured {
        probe.undo_turn(false);
        if probe.present_player_in_check() {
            GameResult::win_for(last)
        } else if is_checkmate_or_stalemate(probe.position(), opponent) {
            GameResult::DRAW
        } else {
            // An escape existed and was missed.
            GameResult::win_for(last)
        }
    } else if is_checkmate_or_stalemate(probe.position(), last) {
        if probe.present_player_in_check() {
            GameResult::win_for(opponent)
        } else {
            GameResult::DRAW
        }
    } else {
        GameResult::win_for(opponent)
    };

    debug!(?result, "terminal position evaluated");
    result
}
