//! A rules engine for chess across branching timelines: boards move through time and between
//! parallel dimensions, and a player's turn may span several boards at once.

pub mod core;
pub mod chess;
pub mod error;
pub mod multiverse;
pub mod rules;
pub mod arena;
pub mod history;
pub mod game;
pub mod state;
