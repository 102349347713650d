//! Rules on top of the multiverse.
//!
//! - [`movegen`]: piece destinations, per-board moves and selection moves.
//! - [`attacks`]: attacked squares and check detection.
//! - [`checkmate`]: checkmate/stalemate probing and terminal classification.

pub mod attacks;
pub mod checkmate;
pub mod movegen;
