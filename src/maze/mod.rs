pub mod edge;
pub mod vertex;

use std::collections::HashSet;
use std::ops::{Index, IndexMut};

use rand::{Rng, rngs::StdRng};

pub use edge::{Edge, MAX_EDGE_WEIGHT};
pub use vertex::{Role, Vertex};

use crate::generators::{get_rng, kruskal};

/// Grid coordinate as (row, column), row-major from the top-left.
pub type Coord = (u16, u16);

/// The outcome of spanning the board: the edges selected into the maze
/// and the sorted remainder that was never considered.
#[derive(Debug, Default)]
pub struct SpanningTree {
    /// Edges accepted into the tree, in acceptance order.
    pub edges: Vec<Edge>,
    /// Candidate edges left over once the tree was complete, still in
    /// ascending weight order.
    pub leftover: Vec<Edge>,
}

/// A perfect maze over a rows-by-columns grid.
///
/// The maze owns the board of vertices, the spanning tree carved through
/// it, and the random number generator that draws edge weights, so
/// regeneration produces a fresh layout without touching anything else.
pub struct Maze {
    rows: u16,
    cols: u16,
    board: Vec<Vertex>,
    tree: SpanningTree,
    rng: StdRng,
}

impl Maze {
    /// Creates a maze with the given dimensions and carves it immediately.
    /// Pass a seed to make the layout reproducible. Expects at least one
    /// row and one column.
    pub fn new(rows: u16, cols: u16, seed: Option<u64>) -> Self {
        let mut maze = Maze {
            rows,
            cols,
            board: Vec::new(),
            tree: SpanningTree::default(),
            rng: get_rng(seed),
        };
        maze.regenerate();
        maze
    }

    /// Rebuilds the board with freshly drawn edge weights and carves a new
    /// spanning tree through it. All visited flags are dropped with the
    /// old board.
    pub fn regenerate(&mut self) {
        self.build_board();
        self.tree = kruskal::span(&self.board);
        self.filter_tree_edges();
        tracing::info!(
            "[maze] carved a {}x{} maze: {} tree edges, {} left over",
            self.rows,
            self.cols,
            self.tree.edges.len(),
            self.tree.leftover.len()
        );
    }

    fn build_board(&mut self) {
        let goal = (self.rows.saturating_sub(1), self.cols.saturating_sub(1));
        self.board.clear();
        self.board.reserve(self.rows as usize * self.cols as usize);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = (row, col);
                let role = if pos == (0, 0) {
                    Role::Start
                } else if pos == goal {
                    Role::Goal
                } else {
                    Role::Normal
                };
                self.board.push(Vertex::new(pos, role));
            }
        }
        // Candidate edges go in left, right, down, up; each directed copy
        // draws its own weight.
        for index in 0..self.board.len() {
            let (row, col) = self.board[index].pos;
            let neighbors = [
                (col > 0).then(|| (row, col - 1)),
                (col + 1 < self.cols).then(|| (row, col + 1)),
                (row + 1 < self.rows).then(|| (row + 1, col)),
                (row > 0).then(|| (row - 1, col)),
            ];
            for to in neighbors.into_iter().flatten() {
                let weight = self.rng.random_range(0..MAX_EDGE_WEIGHT);
                self.board[index].out_edges.push(Edge {
                    from: (row, col),
                    to,
                    weight,
                });
            }
        }
    }

    /// Projects the spanning tree back onto each vertex's adjacency list.
    /// Clears the previous projection first, so running it again is
    /// harmless.
    fn filter_tree_edges(&mut self) {
        let in_tree: HashSet<Edge> = self.tree.edges.iter().copied().collect();
        for vertex in &mut self.board {
            vertex.out_edges_in_tree.clear();
            for edge in &vertex.out_edges {
                if in_tree.contains(edge) {
                    vertex.out_edges_in_tree.push(*edge);
                }
            }
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// The top-left cell, where every traversal begins.
    pub fn start(&self) -> Coord {
        (0, 0)
    }

    /// The bottom-right cell, the traversal target.
    pub fn goal(&self) -> Coord {
        (self.rows.saturating_sub(1), self.cols.saturating_sub(1))
    }

    pub fn tree(&self) -> &SpanningTree {
        &self.tree
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.board.iter()
    }

    /// Whether the spanning tree keeps an open passage between two
    /// adjacent cells.
    pub fn tree_connected(&self, from: Coord, to: Coord) -> bool {
        self[from].out_edges_in_tree.iter().any(|edge| edge.to == to)
    }

    /// Drops the visited marks of a previous traversal.
    pub fn clear_visited(&mut self) {
        for vertex in &mut self.board {
            vertex.visited = false;
        }
    }

    fn index_of(&self, (row, col): Coord) -> usize {
        row as usize * self.cols as usize + col as usize
    }
}

impl Index<Coord> for Maze {
    type Output = Vertex;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.board[self.index_of(coord)]
    }
}

impl IndexMut<Coord> for Maze {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        let index = self.index_of(coord);
        &mut self.board[index]
    }
}
