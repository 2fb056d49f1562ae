pub mod search;
pub mod worklist;

pub use search::{Phase, Search, Tick};
pub use worklist::WorkList;

/// The two traversal disciplines the step machine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Bfs,
    Dfs,
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchKind::Bfs => write!(f, "Breadth-First Search (BFS)"),
            SearchKind::Dfs => write!(f, "Depth-First Search (DFS)"),
        }
    }
}
