//! Low-level primitives shared by every layer above.
//!
//! - [`coord`]: 4-axis multiverse coordinates `(time, dim, rank, file)` and piece moves.
//! - [`square`]: a validated square on one 8x8 board.
//! - [`position`]: the multiverse plus player timing, and raw move application.

pub mod coord;
pub mod position;
pub mod square;
