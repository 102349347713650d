use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::arena::enumerate;
use crate::chess::board::Board;
use crate::chess::config::GameConfig;
use crate::chess::piece::{Piece, Player};
use crate::core::coord::{Coord, PieceMove, TimeDim};
use crate::core::position::Position;
use crate::core::square::BOARD_SIZE;
use crate::error::Result;
use crate::history::{Popped, TurnHistory};
use crate::multiverse::Multiverse;
use crate::rules::{attacks, checkmate, movegen};
use crate::state::Snapshot;

/// A move as submitted to the game: a piece move or the end of the mover's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    EndTurn,
    Piece { from: Coord, to: Coord },
}

impl Move {
    pub fn piece(self) -> Option<PieceMove> {
        match self {
            Move::EndTurn => None,
            Move::Piece { from, to } => Some(PieceMove::new(from, to)),
        }
    }

    pub fn flipped(self) -> Move {
        match self {
            Move::EndTurn => Move::EndTurn,
            Move::Piece { from, to } => Move::Piece {
                from: from.flipped(),
                to: to.flipped(),
            },
        }
    }
}

impl From<PieceMove> for Move {
    fn from(mv: PieceMove) -> Self {
        Move::Piece {
            from: mv.from,
            to: mv.to,
        }
    }
}

/// Scores of a finished game; they always sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub p0: f32,
    pub p1: f32,
}

impl GameResult {
    pub const P0_WINS: GameResult = GameResult { p0: 1.0, p1: 0.0 };
    pub const P1_WINS: GameResult = GameResult { p0: 0.0, p1: 1.0 };
    pub const DRAW: GameResult = GameResult { p0: 0.5, p1: 0.5 };

    pub fn win_for(player: Player) -> Self {
        match player {
            Player::P0 => Self::P0_WINS,
            Player::P1 => Self::P1_WINS,
        }
    }

    pub fn score(self, player: Player) -> f32 {
        match player {
            Player::P0 => self.p0,
            Player::P1 => self.p1,
        }
    }

    /// The same outcome with the players' colours swapped.
    pub fn flipped(self) -> Self {
        GameResult {
            p0: self.p1,
            p1: self.p0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// The piece that stood on the destination (empty if none).
    pub captured: Piece,
    /// The move captured a king or left the mover without moves.
    pub terminal: bool,
}

/// A move taken back by [`Game::undo_move`], in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoneMove {
    pub mv: Move,
    /// What stands on the destination again after the undo.
    pub captured: Piece,
}

/// A game in progress: the position, whose turn it is, and the undo history.
///
/// Moves are submitted in the mover's local coordinates (see [`Game::to_local`]) and are
/// trusted to come from [`Game::valid_selection_moves`] or [`Game::valid_special_moves`].
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    position: Position,
    current_player: Player,
    history: TurnHistory,
    result: Option<GameResult>,
    config: GameConfig,
}

impl Game {
    /// The standard start position.
    pub fn new(config: GameConfig) -> Self {
        Self::from_board(Board::standard(), config)
    }

    pub fn from_board(board: Board, config: GameConfig) -> Self {
        Self::from_multiverse(Multiverse::from_board(board), config)
    }

    pub fn from_multiverse(multiverse: Multiverse, config: GameConfig) -> Self {
        Self {
            position: Position::new(multiverse, config.first_player),
            current_player: config.first_player,
            history: TurnHistory::new(config.history_limit()),
            result: None,
            config,
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn multiverse(&self) -> &Multiverse {
        &self.position.multiverse
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[inline]
    pub fn first_player(&self) -> Player {
        self.position.first_player
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn history(&self) -> &TurnHistory {
        &self.history
    }

    #[inline]
    pub fn player_at(&self, time: i32) -> Player {
        self.position.player_at(time)
    }

    #[inline]
    pub fn present(&self) -> i32 {
        self.position.present()
    }

    // ---- moves ----

    /// Selection moves of the current player in global coordinates.
    pub fn global_selection_moves(&self) -> Vec<PieceMove> {
        movegen::selection_moves(&self.position, self.current_player, true)
    }

    /// Selection moves of the current player in their local coordinates.
    pub fn valid_selection_moves(&self) -> Vec<Move> {
        self.global_selection_moves()
            .into_iter()
            .map(|mv| self.to_local(mv.into()))
            .collect()
    }

    /// `EndTurn`, once the present no longer waits on the current player.
    pub fn valid_special_moves(&self) -> Vec<Move> {
        if self.player_at(self.present()) != self.current_player {
            vec![Move::EndTurn]
        } else {
            Vec::new()
        }
    }

    pub fn all_valid_moves(&self) -> Vec<Move> {
        let mut moves = self.valid_selection_moves();
        moves.extend(self.valid_special_moves());
        moves
    }

    pub fn has_no_moves(&self) -> bool {
        self.valid_special_moves().is_empty() && self.global_selection_moves().is_empty()
    }

    /// Every turn `player` could play that advances the present, in global coordinates.
    pub fn all_turn_sets(&self, player: Player) -> Vec<Vec<PieceMove>> {
        enumerate::all_turn_sets(&self.position, player)
    }

    // ---- applying ----

    /// Plays a move given in the current player's local coordinates.
    pub fn play(&mut self, local: Move) -> Result<MoveResult> {
        let global = self.to_global(local);
        self.apply_global(global)
    }

    /// Non-mutating [`Game::play`].
    pub fn make_move(&self, local: Move) -> Result<(Game, MoveResult)> {
        let mut next = self.clone();
        let outcome = next.play(local)?;
        Ok((next, outcome))
    }

    /// Plays a move given in global coordinates. A terminal move stores the evaluated result.
    pub fn apply_global(&mut self, mv: Move) -> Result<MoveResult> {
        let outcome = match mv {
            Move::EndTurn => {
                self.history.end_turn();
                self.current_player = self.current_player.other();
                MoveResult {
                    captured: Piece::EMPTY,
                    terminal: self.has_no_moves(),
                }
            }
            Move::Piece { from, to } => {
                let pm = PieceMove::new(from, to);
                let applied = self.position.apply(pm)?;
                self.history.record(pm, applied.spawned);
                MoveResult {
                    captured: applied.captured,
                    terminal: applied.captured.is_king() || self.has_no_moves(),
                }
            }
        };
        if outcome.terminal {
            self.result = Some(checkmate::evaluate_terminal(self));
        }
        Ok(outcome)
    }

    // ---- undo ----

    /// Takes back the latest move or turn boundary. Undoing a boundary hands the turn back.
    pub fn undo_move(&mut self) -> Option<UndoneMove> {
        let Some(popped) = self.history.pop() else {
            warn!("no moves to undo");
            return None;
        };
        self.result = None;
        match popped {
            Popped::Boundary => {
                self.current_player = self.current_player.other();
                Some(UndoneMove {
                    mv: Move::EndTurn,
                    captured: Piece::EMPTY,
                })
            }
            Popped::Move(rec) => {
                self.position.revert(&rec.spawned);
                let captured = self
                    .position
                    .multiverse
                    .piece_at(rec.mv.to)
                    .unwrap_or(Piece::EMPTY);
                Some(UndoneMove {
                    mv: rec.mv.into(),
                    captured,
                })
            }
        }
    }

    /// Takes back every move of the turn in progress, and the boundary before it if asked.
    /// Returns the undone moves oldest-first.
    pub fn undo_turn(&mut self, include_boundary: bool) -> Vec<UndoneMove> {
        let n = self.history.current_turn_len();
        let mut undone: Vec<UndoneMove> = (0..n).filter_map(|_| self.undo_move()).collect();
        if include_boundary {
            self.undo_move();
        }
        undone.reverse();
        undone
    }

    // ---- coordinates ----

    /// Global to the current player's view: P0 counts dims from the lowest one, P1 sees the
    /// board rotated and counts dims down from the highest.
    pub fn to_local_coord(&self, c: Coord) -> Coord {
        let (lo, hi) = self.position.multiverse.dim_range();
        match self.current_player {
            Player::P0 => Coord { dim: c.dim - lo, ..c },
            Player::P1 => Coord::new(
                c.time,
                hi - c.dim,
                BOARD_SIZE - 1 - c.rank,
                BOARD_SIZE - 1 - c.file,
            ),
        }
    }

    pub fn to_global_coord(&self, c: Coord) -> Coord {
        let (lo, hi) = self.position.multiverse.dim_range();
        match self.current_player {
            Player::P0 => Coord { dim: c.dim + lo, ..c },
            Player::P1 => Coord::new(
                c.time,
                hi - c.dim,
                BOARD_SIZE - 1 - c.rank,
                BOARD_SIZE - 1 - c.file,
            ),
        }
    }

    pub fn to_local(&self, mv: Move) -> Move {
        match mv {
            Move::EndTurn => Move::EndTurn,
            Move::Piece { from, to } => Move::Piece {
                from: self.to_local_coord(from),
                to: self.to_local_coord(to),
            },
        }
    }

    pub fn to_global(&self, mv: Move) -> Move {
        match mv {
            Move::EndTurn => Move::EndTurn,
            Move::Piece { from, to } => Move::Piece {
                from: self.to_global_coord(from),
                to: self.to_global_coord(to),
            },
        }
    }

    // ---- queries ----

    pub fn board_at(&self, td: TimeDim) -> Option<&Board> {
        self.position.multiverse.board_at(td)
    }

    pub fn piece_at(&self, c: Coord) -> Option<Piece> {
        self.position.multiverse.piece_at(c)
    }

    /// Passes and un-passes the present boards; the position is unchanged afterwards.
    pub fn present_player_in_check(&mut self) -> bool {
        attacks::present_player_in_check(&mut self.position)
    }

    pub fn present_player_can_win(&self) -> bool {
        attacks::present_player_can_win(&self.position)
    }

    pub fn is_checkmate_or_stalemate(&self, player: Player) -> bool {
        checkmate::is_checkmate_or_stalemate(&self.position, player)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    // ---- whole-game transforms ----

    /// The same game with colours swapped: dims negated, boards rotated, owners exchanged.
    pub fn flipped(&self) -> Game {
        let first = self.first_player().other();
        Game {
            position: Position::new(self.position.multiverse.flipped(), first),
            current_player: self.current_player.other(),
            history: self.history.flipped(),
            result: self.result.map(GameResult::flipped),
            config: self.config.with_first_player(first),
        }
    }

    pub fn representation(&self) -> Snapshot {
        Snapshot {
            timelines: self.position.multiverse.timelines().cloned().collect(),
            current_player: self.current_player,
            config: self.config,
            history: self.history.clone(),
            result: self.result,
        }
    }

    pub fn from_representation(snapshot: Snapshot) -> Result<Game> {
        let multiverse = Multiverse::from_timelines(snapshot.timelines)?;
        Ok(Game {
            position: Position::new(multiverse, snapshot.config.first_player),
            current_player: snapshot.current_player,
            history: snapshot.history,
            result: snapshot.result,
            config: snapshot.config,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(GameConfig::default())
    }
}
