//! Chess primitives: pieces, single boards and game configuration.

pub mod board;
pub mod config;
pub mod piece;
