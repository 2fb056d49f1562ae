use crate::maze::{Coord, Edge};

/// Position-derived label of a cell. The top-left cell is the start and
/// the bottom-right cell is the goal; on a single-cell maze the one cell
/// is the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Start,
    Goal,
    Normal,
}

/// One cell of the maze, with its candidate and tree-filtered adjacency.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub pos: Coord,
    pub role: Role,
    /// Connections to every in-bounds neighbor, before tree filtering.
    pub out_edges: Vec<Edge>,
    /// The subset of connections kept by the spanning tree: the openings
    /// a traversal may walk through.
    pub out_edges_in_tree: Vec<Edge>,
    /// Set when a traversal expands this cell; cleared on every new search.
    pub visited: bool,
}

impl Vertex {
    pub fn new(pos: Coord, role: Role) -> Self {
        Vertex {
            pos,
            role,
            out_edges: Vec::new(),
            out_edges_in_tree: Vec::new(),
            visited: false,
        }
    }
}

impl PartialEq for Vertex {
    // Identity is position and role; adjacency and the visited flag are
    // traversal scratch state.
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.role == other.role
    }
}

impl Eq for Vertex {}
