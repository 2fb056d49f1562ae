use std::collections::HashMap;

use crate::maze::{Coord, Maze};
use crate::solvers::{SearchKind, WorkList};

/// Where the step machine currently is. A search only moves forward
/// through these phases; `reset` and a successful `start` rewind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Found,
    Animating,
    Done,
}

/// What a single tick changed, for incremental redrawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A frontier cell was expanded and marked visited.
    Visited(Coord),
    /// The goal came off the work list; the route is reconstructed and
    /// ready to reveal.
    Found(Coord),
    /// The next route cell was revealed, start first.
    Revealed(Coord),
}

/// Incremental traversal over a maze's tree adjacency.
///
/// Each tick does exactly one unit of work, so the caller decides the
/// pace: one frontier pop while running, one route cell once the goal is
/// found. All bookkeeping lives here; the maze only carries the per-cell
/// visited flags the renderer reads.
#[derive(Debug, Default)]
pub struct Search {
    phase: Phase,
    kind: Option<SearchKind>,
    worklist: WorkList,
    parents: HashMap<Coord, Coord>,
    path: Vec<Coord>,
    revealed: usize,
}

impl Search {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn kind(&self) -> Option<SearchKind> {
        self.kind
    }

    /// The reconstructed route from start to goal. Empty until the goal
    /// has been found.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// The prefix of the route revealed so far.
    pub fn revealed(&self) -> &[Coord] {
        &self.path[..self.revealed]
    }

    /// Begins a new search, dropping the previous traversal's marks and
    /// result. A request made while a search is in flight is ignored and
    /// returns false; once the route is fully revealed, starting again is
    /// allowed.
    pub fn start(&mut self, maze: &mut Maze, kind: SearchKind) -> bool {
        if matches!(
            self.phase,
            Phase::Running | Phase::Found | Phase::Animating
        ) {
            tracing::debug!("[search] ignoring {} start, a search is already active", kind);
            return false;
        }
        maze.clear_visited();
        self.parents.clear();
        self.path.clear();
        self.revealed = 0;
        self.worklist = WorkList::for_kind(kind);
        self.worklist.insert(maze.start());
        self.kind = Some(kind);
        self.phase = Phase::Running;
        tracing::info!("[search] {} started", kind);
        true
    }

    /// Drops all traversal state and returns to `Idle`.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.kind = None;
        self.worklist = WorkList::default();
        self.parents.clear();
        self.path.clear();
        self.revealed = 0;
    }

    /// Advances by one unit of work and reports what changed, or None
    /// when there was nothing to do.
    pub fn tick(&mut self, maze: &mut Maze) -> Option<Tick> {
        match self.phase {
            Phase::Idle | Phase::Done => None,
            Phase::Running => self.step(maze),
            Phase::Found | Phase::Animating => self.reveal(),
        }
    }

    fn step(&mut self, maze: &mut Maze) -> Option<Tick> {
        let current = self.worklist.remove()?;
        // The goal check comes before the visited check, so finding the
        // goal always gets a tick of its own and the goal cell is never
        // marked visited.
        if current == maze.goal() {
            self.path = self.trace_path(current);
            self.phase = Phase::Found;
            tracing::info!("[search] goal reached, route has {} cells", self.path.len());
            return Some(Tick::Found(current));
        }
        if maze[current].visited {
            // Already expanded under another parent; nothing new here.
            return None;
        }
        for edge in &maze[current].out_edges_in_tree {
            if !maze[edge.to].visited {
                self.worklist.insert(edge.to);
                self.parents.insert(edge.to, current);
            }
        }
        maze[current].visited = true;
        Some(Tick::Visited(current))
    }

    fn reveal(&mut self) -> Option<Tick> {
        self.phase = Phase::Animating;
        let coord = *self.path.get(self.revealed)?;
        self.revealed += 1;
        if self.revealed == self.path.len() {
            self.phase = Phase::Done;
            tracing::debug!("[search] route fully revealed");
        }
        Some(Tick::Revealed(coord))
    }

    /// Walks parent links back from the goal, then reverses the trail
    /// into start-to-goal order.
    fn trace_path(&self, goal: Coord) -> Vec<Coord> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(&parent) = self.parents.get(&current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick_until(search: &mut Search, maze: &mut Maze, phase: Phase) {
        for _ in 0..100_000 {
            if search.phase() == phase {
                return;
            }
            search.tick(maze);
        }
        panic!("search never reached {phase:?}");
    }

    fn run_to_done(maze: &mut Maze, kind: SearchKind) -> Search {
        let mut search = Search::default();
        assert!(search.start(maze, kind));
        tick_until(&mut search, maze, Phase::Done);
        search
    }

    fn visited_cells(maze: &Maze) -> Vec<Coord> {
        maze.vertices()
            .filter(|vertex| vertex.visited)
            .map(|vertex| vertex.pos)
            .collect()
    }

    #[test]
    fn test_bfs_and_dfs_agree_on_the_route() {
        let mut bfs_maze = Maze::new(6, 9, Some(42));
        let bfs = run_to_done(&mut bfs_maze, SearchKind::Bfs);
        let mut dfs_maze = Maze::new(6, 9, Some(42));
        let dfs = run_to_done(&mut dfs_maze, SearchKind::Dfs);
        // The tree has exactly one route, so the discipline cannot matter.
        assert_eq!(bfs.path(), dfs.path());
    }

    #[test]
    fn test_route_runs_start_to_goal_through_passages() {
        let mut maze = Maze::new(5, 7, Some(21));
        let search = run_to_done(&mut maze, SearchKind::Bfs);
        let path = search.path();
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&maze.goal()));
        for pair in path.windows(2) {
            assert!(
                maze.tree_connected(pair[0], pair[1]),
                "route jumps a wall between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_two_by_two_maze_route() {
        let mut maze = Maze::new(2, 2, Some(1));
        let search = run_to_done(&mut maze, SearchKind::Bfs);
        // Diagonal corners of a 2x2 grid are always two passages apart.
        assert_eq!(search.path().len(), 3);
        assert!(visited_cells(&maze).len() <= 4);
    }

    #[test]
    fn test_goal_cell_is_never_marked_visited() {
        let mut maze = Maze::new(4, 6, Some(33));
        run_to_done(&mut maze, SearchKind::Dfs);
        assert!(maze[maze.start()].visited);
        assert!(!maze[maze.goal()].visited);
    }

    #[test]
    fn test_found_tick_then_reveal_replays_the_route() {
        let mut maze = Maze::new(2, 3, Some(2));
        let mut search = Search::default();
        assert!(search.start(&mut maze, SearchKind::Bfs));
        assert_eq!(search.phase(), Phase::Running);

        let mut found = None;
        for _ in 0..100 {
            match search.tick(&mut maze) {
                Some(Tick::Found(coord)) => {
                    found = Some(coord);
                    break;
                }
                Some(Tick::Visited(_)) => {}
                other => panic!("unexpected tick before the goal: {other:?}"),
            }
        }
        assert_eq!(found, Some(maze.goal()));
        assert_eq!(search.phase(), Phase::Found);
        assert!(search.revealed().is_empty());

        // The reveal starts at the start cell and walks toward the goal.
        assert_eq!(search.tick(&mut maze), Some(Tick::Revealed(maze.start())));
        assert_eq!(search.phase(), Phase::Animating);
        let mut revealed = vec![maze.start()];
        while search.phase() != Phase::Done {
            match search.tick(&mut maze) {
                Some(Tick::Revealed(coord)) => revealed.push(coord),
                other => panic!("unexpected tick during the reveal: {other:?}"),
            }
        }
        assert_eq!(revealed, search.path());
        assert_eq!(search.revealed(), search.path());
        assert_eq!(search.tick(&mut maze), None);
    }

    #[test]
    fn test_start_while_active_is_ignored() {
        let mut maze = Maze::new(4, 4, Some(3));
        let mut search = Search::default();
        assert!(search.start(&mut maze, SearchKind::Bfs));
        search.tick(&mut maze);
        search.tick(&mut maze);
        let visited_before = visited_cells(&maze);

        assert!(!search.start(&mut maze, SearchKind::Dfs));
        assert_eq!(search.kind(), Some(SearchKind::Bfs));
        assert_eq!(search.phase(), Phase::Running);
        assert_eq!(visited_cells(&maze), visited_before);

        // Still ignored once the goal is found and during the reveal.
        tick_until(&mut search, &mut maze, Phase::Found);
        assert!(!search.start(&mut maze, SearchKind::Dfs));
        search.tick(&mut maze);
        assert_eq!(search.phase(), Phase::Animating);
        assert!(!search.start(&mut maze, SearchKind::Dfs));

        // A fully revealed search may be restarted.
        tick_until(&mut search, &mut maze, Phase::Done);
        assert!(search.start(&mut maze, SearchKind::Dfs));
        assert_eq!(search.kind(), Some(SearchKind::Dfs));
        assert_eq!(search.phase(), Phase::Running);
        assert!(visited_cells(&maze).is_empty());
        assert!(search.path().is_empty());
    }

    #[test]
    fn test_chunked_ticking_matches_continuous() {
        let mut continuous = Maze::new(5, 5, Some(9));
        let reference = run_to_done(&mut continuous, SearchKind::Dfs);

        let mut chunked = Maze::new(5, 5, Some(9));
        let mut search = Search::default();
        assert!(search.start(&mut chunked, SearchKind::Dfs));
        let mut chunks = [1usize, 4, 2, 7, 3].into_iter().cycle();
        while search.phase() != Phase::Done {
            for _ in 0..chunks.next().unwrap() {
                if search.phase() != Phase::Done {
                    search.tick(&mut chunked);
                }
            }
        }

        assert_eq!(search.path(), reference.path());
        assert_eq!(visited_cells(&chunked), visited_cells(&continuous));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut maze = Maze::new(3, 3, Some(4));
        let mut search = Search::default();
        assert!(search.start(&mut maze, SearchKind::Bfs));
        search.tick(&mut maze);
        search.reset();
        assert_eq!(search.phase(), Phase::Idle);
        assert_eq!(search.kind(), None);
        assert!(search.path().is_empty());
        assert!(search.revealed().is_empty());
        assert_eq!(search.tick(&mut maze), None);
        assert!(search.start(&mut maze, SearchKind::Dfs));
    }

    #[test]
    fn test_idle_search_ignores_ticks() {
        let mut maze = Maze::new(2, 2, Some(5));
        let mut search = Search::default();
        assert_eq!(search.phase(), Phase::Idle);
        assert_eq!(search.tick(&mut maze), None);
        assert_eq!(search.phase(), Phase::Idle);
    }

    #[test]
    fn test_stale_and_missing_frontier_entries_are_noops() {
        let mut maze = Maze::new(3, 3, Some(6));
        let mut search = Search {
            phase: Phase::Running,
            kind: Some(SearchKind::Bfs),
            worklist: WorkList::for_kind(SearchKind::Bfs),
            parents: HashMap::new(),
            path: Vec::new(),
            revealed: 0,
        };
        maze[(0, 0)].visited = true;
        search.worklist.insert((0, 0));

        // A cell that was already expanded is discarded without effect.
        assert_eq!(search.tick(&mut maze), None);
        assert_eq!(search.phase(), Phase::Running);
        assert!(search.worklist.is_empty());

        // An exhausted work list leaves the phase alone too.
        assert_eq!(search.tick(&mut maze), None);
        assert_eq!(search.phase(), Phase::Running);
    }

    #[test]
    fn test_single_cell_maze_is_found_immediately() {
        let mut maze = Maze::new(1, 1, Some(7));
        let mut search = Search::default();
        assert!(search.start(&mut maze, SearchKind::Dfs));
        assert_eq!(search.tick(&mut maze), Some(Tick::Found((0, 0))));
        assert_eq!(search.path(), vec![(0, 0)]);
        assert_eq!(search.tick(&mut maze), Some(Tick::Revealed((0, 0))));
        assert_eq!(search.phase(), Phase::Done);
        assert_eq!(search.tick(&mut maze), None);
    }
}
