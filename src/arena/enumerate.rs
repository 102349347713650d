use std::collections::BTreeMap;
use std::ops::ControlFlow;

use rustc_hash::FxHashSet;

use crate::chess::piece::Player;
use crate::core::coord::{PieceMove, TimeDim};
use crate::core::position::Position;
use crate::multiverse::dim_is_active;

use super::graph::{MoveGraph, VertexId};

/// Calls `cb` with every structurally valid set of simultaneous moves, in a fixed order.
///
/// A set consists of
/// - edges forming a DAG in which every board is the source of at most one edge,
/// - for some boards not already a source, one non-edge each,
/// - one concrete move for every chosen (source board, end board) pair.
///
/// Moves are listed in a playable order: non-edge moves first, then the edges as chosen.
pub fn for_each_turn_subset(
    graph: &MoveGraph,
    cb: &mut impl FnMut(&[PieceMove]) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let n = graph.len();
    let mut used_sources = vec![false; n];
    let mut used_vertices = vec![false; n];
    let mut edges = Vec::new();

    for_each_dag(
        graph,
        &mut used_sources,
        &mut used_vertices,
        &mut edges,
        &mut |edges: &[(VertexId, VertexId)], used_sources: &[bool]| {
            let free: Vec<VertexId> = (0..n).filter(|&v| !used_sources[v]).collect();
            for k in 0..=free.len() {
                let mut chosen = Vec::with_capacity(k);
                choose_k(&free, k, 0, &mut chosen, &mut |chosen: &[VertexId]| {
                    let targets: Vec<&[TimeDim]> = chosen
                        .iter()
                        .map(|&v| graph.non_edges[v].as_slice())
                        .collect();
                    let mut ends = Vec::with_capacity(chosen.len());
                    for_each_product(&targets, &mut ends, &mut |ends: &[TimeDim]| {
                        let mut classes: Vec<&[PieceMove]> = chosen
                            .iter()
                            .zip(ends)
                            .map(|(&v, &end)| graph.moves_between(graph.vertices[v], end))
                            .collect();
                        classes.extend(edges.iter().map(|&(s, e)| {
                            graph.moves_between(graph.vertices[s], graph.vertices[e])
                        }));
                        let mut moves = Vec::with_capacity(classes.len());
                        for_each_product(&classes, &mut moves, &mut *cb)
                    })
                })?;
            }
            ControlFlow::Continue(())
        },
    )
}

fn for_each_dag(
    graph: &MoveGraph,
    used_sources: &mut [bool],
    used_vertices: &mut [bool],
    edges: &mut Vec<(VertexId, VertexId)>,
    cb: &mut impl FnMut(&[(VertexId, VertexId)], &[bool]) -> ControlFlow<()>,
) -> ControlFlow<()> {
    cb(edges.as_slice(), &*used_sources)?;

    for source in 0..graph.len() {
        if used_vertices[source] {
            continue;
        }
        for &end in &graph.edges[source] {
            let end_was_used = used_vertices[end];
            used_sources[source] = true;
            used_vertices[source] = true;
            used_vertices[end] = true;
            edges.push((source, end));

            let flow = for_each_dag(graph, used_sources, used_vertices, edges, cb);

            edges.pop();
            used_vertices[end] = end_was_used;
            used_vertices[source] = false;
            used_sources[source] = false;
            flow?;
        }
    }
    ControlFlow::Continue(())
}

/// Like [`for_each_turn_subset`], keeping only sets that advance the present: afterwards no
/// active board of `player` that was left alone may lie at or before the new present.
pub fn for_each_turn_set(
    pos: &Position,
    player: Player,
    cb: &mut impl FnMut(&[PieceMove]) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let graph = MoveGraph::build(pos, player);
    for_each_turn_subset(&graph, &mut |moves: &[PieceMove]| {
        if advances_present(pos, player, &graph.vertices, moves) {
            cb(moves)
        } else {
            ControlFlow::Continue(())
        }
    })
}

pub fn all_turn_sets(pos: &Position, player: Player) -> Vec<Vec<PieceMove>> {
    let mut out = Vec::new();
    let _ = for_each_turn_set(pos, player, &mut |moves: &[PieceMove]| {
        out.push(moves.to_vec());
        ControlFlow::Continue(())
    });
    out
}

/// Simulates the leaf table (dim -> leaf time) under `moves` and checks the present moved on.
fn advances_present(
    pos: &Position,
    player: Player,
    boards: &[TimeDim],
    moves: &[PieceMove],
) -> bool {
    let mut leaves: BTreeMap<i32, i32> = pos
        .multiverse
        .leaves()
        .map(|td| (td.dim, td.time))
        .collect();
    let mut used: FxHashSet<i32> = FxHashSet::default();

    for mv in moves {
        let (src, dst) = (mv.from.td(), mv.to.td());
        used.insert(src.dim);
        leaves.insert(src.dim, src.time + 1);
        if src == dst {
            continue;
        }
        let dim = if leaves.get(&dst.dim) == Some(&dst.time) {
            dst.dim
        } else {
            player.spawn_dim(range_of(&leaves))
        };
        leaves.insert(dim, dst.time + 1);
        used.insert(dim);
    }

    let range = range_of(&leaves);
    let Some(present) = leaves
        .iter()
        .filter(|&(&dim, _)| dim_is_active(dim, range))
        .map(|(_, &time)| time)
        .min()
    else {
        return true;
    };

    !boards
        .iter()
        .any(|td| !used.contains(&td.dim) && dim_is_active(td.dim, range) && td.time <= present)
}

fn range_of(leaves: &BTreeMap<i32, i32>) -> (i32, i32) {
    let lo = leaves.keys().next().copied().unwrap_or(0);
    let hi = leaves.keys().next_back().copied().unwrap_or(0);
    (lo, hi)
}

/// Calls `cb` with every `k`-subset of `items` (lexicographic by position).
pub(crate) fn choose_k<T: Copy>(
    items: &[T],
    k: usize,
    start: usize,
    chosen: &mut Vec<T>,
    cb: &mut impl FnMut(&[T]) -> ControlFlow<()>,
) -> ControlFlow<()> {
    if chosen.len() == k {
        return cb(chosen.as_slice());
    }
    if start >= items.len() {
        return ControlFlow::Continue(());
    }

    // Remaining needed
    let need = k - chosen.len();
    if items.len() - start < need {
        return ControlFlow::Continue(());
    }

    for i in start..items.len() {
        chosen.push(items[i]);
        let flow = choose_k(items, k, i + 1, chosen, cb);
        chosen.pop();
        flow?;
    }
    ControlFlow::Continue(())
}

/// Cartesian product, first list varying slowest. No lists yields one empty tuple.
fn for_each_product<T: Copy>(
    lists: &[&[T]],
    cur: &mut Vec<T>,
    cb: &mut impl FnMut(&[T]) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let Some((first, rest)) = lists.split_first() else {
        return cb(cur.as_slice());
    };
    for &item in *first {
        cur.push(item);
        let flow = for_each_product(rest, cur, cb);
        cur.pop();
        flow?;
    }
    ControlFlow::Continue(())
}
