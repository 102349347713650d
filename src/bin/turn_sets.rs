//! Plays the first offered move for a number of plies from the start position and reports, per
//! ply, how many selection moves and turn sets were available. Prints JSON to stdout.
//!
//! Usage: `turn_sets [PLIES]` (default 6). Set `RUST_LOG=debug` for engine logs.

use std::ops::ControlFlow;

use multiverse_chess::arena::enumerate::for_each_turn_set;
use multiverse_chess::chess::config::GameConfig;
use multiverse_chess::chess::piece::Player;
use multiverse_chess::core::coord::PieceMove;
use multiverse_chess::game::{Game, GameResult, Move};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct PlyReport {
    ply: usize,
    player: Player,
    present: i32,
    selection_moves: usize,
    turn_sets: usize,
    played: Move,
    terminal: bool,
}

#[derive(Serialize)]
struct Report {
    plies: Vec<PlyReport>,
    timelines: usize,
    result: Option<GameResult>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let plies: usize = std::env::args()
        .nth(1)
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or(6);

    let mut game = Game::new(GameConfig::default().with_save_moves(false));
    let mut report = Vec::with_capacity(plies);

    for ply in 0..plies {
        if game.is_terminal() {
            break;
        }
        let player = game.current_player();
        let present = game.present();
        let selection_moves = game.valid_selection_moves().len();
        let mut turn_sets = 0usize;
        let mover = game.player_at(present);
        let _ = for_each_turn_set(game.position(), mover, &mut |_: &[PieceMove]| {
            turn_sets += 1;
            ControlFlow::Continue(())
        });
        let Some(&played) = game.all_valid_moves().first() else {
            break;
        };
        let outcome = game.play(played)?;
        info!(ply, ?player, ?played, terminal = outcome.terminal, "played");

        report.push(PlyReport {
            ply,
            player,
            present,
            selection_moves,
            turn_sets,
            played,
            terminal: outcome.terminal,
        });
    }

    let report = Report {
        plies: report,
        timelines: game.multiverse().timelines().count(),
        result: game.result(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
