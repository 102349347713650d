use rustc_hash::FxHashMap;

use crate::chess::piece::Player;
use crate::core::coord::{PieceMove, TimeDim};
use crate::core::position::Position;
use crate::rules::movegen;

/// Index into [`MoveGraph::vertices`].
pub type VertexId = usize;

/// Move dependency graph over the boards one player may move from.
///
/// An edge `a -> b` means some move from board `a` lands on board `b`, where `b` is also one
/// of the player's movable boards. Every other move (same board, past boards, the opponent's
/// boards) is a non-edge of its source. All lists keep first-appearance order.
#[derive(Debug, Clone)]
pub struct MoveGraph {
    pub vertices: Vec<TimeDim>,
    pub edges: Vec<Vec<VertexId>>,
    pub non_edges: Vec<Vec<TimeDim>>,
    classes: FxHashMap<(TimeDim, TimeDim), Vec<PieceMove>>,
}

impl MoveGraph {
    pub fn build(pos: &Position, player: Player) -> Self {
        let vertices: Vec<TimeDim> = pos.leaves_of(player).collect();
        let index: FxHashMap<TimeDim, VertexId> =
            vertices.iter().enumerate().map(|(i, &td)| (td, i)).collect();

        let mut edges: Vec<Vec<VertexId>> = vec![Vec::new(); vertices.len()];
        let mut non_edges: Vec<Vec<TimeDim>> = vec![Vec::new(); vertices.len()];
        let mut classes: FxHashMap<(TimeDim, TimeDim), Vec<PieceMove>> = FxHashMap::default();

        for (v, &td) in vertices.iter().enumerate() {
            for mv in movegen::board_moves(pos, td, true) {
                let end = mv.to.td();
                match index.get(&end) {
                    Some(&w) if w != v => push_unique(&mut edges[v], w),
                    _ => push_unique(&mut non_edges[v], end),
                }
                classes.entry((td, end)).or_default().push(mv);
            }
        }

        Self {
            vertices,
            edges,
            non_edges,
            classes,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Moves from board `from` that land on board `to`, in enumeration order.
    pub fn moves_between(&self, from: TimeDim, to: TimeDim) -> &[PieceMove] {
        self.classes
            .get(&(from, to))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if !list.contains(&item) {
        list.push(item);
    }
}
