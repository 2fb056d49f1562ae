use std::collections::HashSet;

use crate::generators::union_find::UnionFind;
use crate::maze::{Edge, SpanningTree, Vertex};

/// Carves a spanning tree through a fully connected board.
///
/// Pools every vertex's candidate edges into one worklist sorted ascending
/// by weight, then walks a cursor over it against a union-find until one
/// set remains. Accepting an edge does not advance the cursor: the next
/// pass sees both of its endpoints in the same set and skips past it then.
/// Cycle edges and the second directed copy of each accepted edge fall
/// through that same skip.
pub fn span(board: &[Vertex]) -> SpanningTree {
    let mut worklist: Vec<Edge> = board
        .iter()
        .flat_map(|vertex| vertex.out_edges.iter().copied())
        .collect();
    worklist.sort_by_key(|edge| edge.weight);

    let mut forest = UnionFind::new(board.iter().map(|vertex| vertex.pos));
    let mut edges: Vec<Edge> = Vec::with_capacity(board.len().saturating_sub(1));
    let mut cursor = 0;

    while forest.root_count() > 1 {
        let edge = worklist[cursor];
        if forest.find(edge.from) == forest.find(edge.to) {
            cursor += 1;
        } else {
            forest.union(edge.from, edge.to);
            edges.push(edge);
        }
    }

    let in_tree: HashSet<Edge> = edges.iter().copied().collect();
    let leftover: Vec<Edge> = worklist[cursor..]
        .iter()
        .filter(|edge| !in_tree.contains(edge))
        .copied()
        .collect();
    tracing::debug!(
        "[kruskal] spanned {} vertices with {} edges, {} left over",
        board.len(),
        edges.len(),
        leftover.len()
    );

    SpanningTree { edges, leftover }
}
