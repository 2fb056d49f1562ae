use std::collections::VecDeque;

use crate::maze::Coord;
use crate::solvers::SearchKind;

/// Ordered frontier driving a traversal.
///
/// The discipline is fixed when the search starts: a first-in-first-out
/// list explores breadth-first, a last-in-first-out list depth-first. The
/// step machine only ever inserts, removes and checks for emptiness, so
/// the two behave identically apart from removal order.
#[derive(Debug)]
pub enum WorkList {
    Fifo(VecDeque<Coord>),
    Lifo(Vec<Coord>),
}

impl WorkList {
    pub fn for_kind(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Bfs => WorkList::Fifo(VecDeque::new()),
            SearchKind::Dfs => WorkList::Lifo(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            WorkList::Fifo(queue) => queue.is_empty(),
            WorkList::Lifo(stack) => stack.is_empty(),
        }
    }

    pub fn insert(&mut self, coord: Coord) {
        match self {
            WorkList::Fifo(queue) => queue.push_back(coord),
            WorkList::Lifo(stack) => stack.push(coord),
        }
    }

    pub fn remove(&mut self) -> Option<Coord> {
        match self {
            WorkList::Fifo(queue) => queue.pop_front(),
            WorkList::Lifo(stack) => stack.pop(),
        }
    }
}

impl Default for WorkList {
    fn default() -> Self {
        WorkList::Fifo(VecDeque::new())
    }
}
