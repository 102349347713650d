//! Crate error type.

use thiserror::Error;

/// Errors surfaced by board, multiverse and game operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A rank/file pair outside the 8x8 board.
    #[error("invalid square: rank {rank}, file {file} (must be 0-7)")]
    InvalidSquare { rank: i32, file: i32 },

    /// No board exists at this (time, dimension) coordinate.
    #[error("no board at time {time} in dimension {dim}")]
    MissingBoard { time: i32, dim: i32 },

    /// Raw insertion into a timeline at a non-adjacent time.
    #[error("board at time {time} does not extend dimension {dim} (expected time {expected})")]
    NotContiguous { time: i32, dim: i32, expected: i32 },

    /// A snapshot or constructor without any timeline.
    #[error("multiverse has no timelines")]
    EmptyMultiverse,
}

pub type Result<T> = std::result::Result<T, GameError>;
