use std::hash::{Hash, Hasher};

use crate::maze::Coord;

/// Exclusive upper bound for randomly drawn edge weights.
pub const MAX_EDGE_WEIGHT: u8 = 100;

/// A weighted connection between two adjacent cells.
///
/// Every internal connection of the grid exists twice, once in each
/// endpoint's adjacency list and with an independently drawn weight. The
/// two copies compare equal: equality covers the unordered endpoint pair
/// and ignores direction and weight.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub from: Coord,
    pub to: Coord,
    pub weight: u8,
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.from == other.from && self.to == other.to)
            || (self.from == other.to && self.to == other.from)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order the endpoints so both directed copies land in the same bucket.
        let (first, second) = if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        first.hash(state);
        second.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_equality_is_symmetric_and_ignores_weight() {
        let edge = Edge {
            from: (0, 0),
            to: (0, 1),
            weight: 17,
        };
        let reversed = Edge {
            from: (0, 1),
            to: (0, 0),
            weight: 92,
        };
        assert_eq!(edge, reversed);
        assert_eq!(reversed, edge);

        let other = Edge {
            from: (0, 1),
            to: (0, 2),
            weight: 17,
        };
        assert_ne!(edge, other);
    }

    #[test]
    fn test_hash_deduplicates_directed_copies() {
        let mut edges = HashSet::new();
        edges.insert(Edge {
            from: (3, 4),
            to: (3, 5),
            weight: 1,
        });
        edges.insert(Edge {
            from: (3, 5),
            to: (3, 4),
            weight: 99,
        });
        assert_eq!(edges.len(), 1);

        edges.insert(Edge {
            from: (3, 5),
            to: (3, 6),
            weight: 1,
        });
        assert_eq!(edges.len(), 2);
    }
}
