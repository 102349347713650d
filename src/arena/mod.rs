//! Turn-set enumeration.
//!
//! A player may move on several boards in one turn. [`graph`] records which of their boards
//! can move onto which; [`enumerate`] walks every structurally valid move set and keeps those
//! that advance the present.

pub mod enumerate;
pub mod graph;
