use std::collections::HashMap;

use crate::maze::Coord;

/// Disjoint-set forest over grid coordinates.
///
/// A coordinate is a root exactly when it maps to itself. `find` walks
/// parent links to that fixed point on every call; there is no path
/// compression and no balancing, so the forest shape is exactly the
/// history of unions applied to it.
#[derive(Debug, Default)]
pub struct UnionFind {
    parents: HashMap<Coord, Coord>,
}

impl UnionFind {
    /// Seeds one singleton set per coordinate.
    pub fn new<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = Coord>,
    {
        UnionFind {
            parents: coords.into_iter().map(|coord| (coord, coord)).collect(),
        }
    }

    /// Follows parent links from `coord` up to its root.
    ///
    /// # Panics
    /// Panics if `coord` was never seeded.
    pub fn find(&self, coord: Coord) -> Coord {
        let mut current = coord;
        while self.parents[&current] != current {
            current = self.parents[&current];
        }
        current
    }

    /// Attaches the root of `from` directly under the root of `to`.
    /// Merging a set with itself re-points the shared root at itself,
    /// which changes nothing.
    pub fn union(&mut self, from: Coord, to: Coord) {
        let root_from = self.find(from);
        let root_to = self.find(to);
        self.parents.insert(root_from, root_to);
    }

    /// Number of distinct sets, counted as self-mapped entries.
    pub fn root_count(&self) -> usize {
        self.parents
            .iter()
            .filter(|(coord, parent)| coord == parent)
            .count()
    }
}
