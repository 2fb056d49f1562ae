use std::fmt::Display;
use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};

use crate::app::tile::Tile;
use crate::maze::{Coord, Maze, Role};
use crate::solvers::{Search, Tick};

/// Rows below the maze reserved for the status line.
pub const NUM_LOG_ROWS: u16 = 1;

/// Draws the maze as a doubled grid: cell squares interleaved with wall
/// squares, so a maze of r rows and c columns occupies 2c+1 by 2r+1
/// tiles.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Drawing grid dimensions in tiles (width, height)
    grid_dims: (u16, u16),
}

impl Renderer {
    pub fn new(maze: &Maze) -> Self {
        Self {
            stdout: std::io::stdout(),
            grid_dims: (
                maze.cols().saturating_mul(2).saturating_add(1),
                maze.rows().saturating_mul(2).saturating_add(1),
            ),
        }
    }

    /// Check if the terminal is large enough for the maze and its status
    /// line. If not, display a message telling the user to exit with Esc
    /// and return Ok(false).
    pub fn check_size(&mut self) -> std::io::Result<bool> {
        let (grid_width, grid_height) = self.grid_dims;
        let needed_width = grid_width.saturating_mul(Tile::WIDTH);
        let needed_height = grid_height.saturating_add(NUM_LOG_ROWS);
        let (term_width, term_height) = terminal::size()?;
        if term_width < needed_width || term_height < needed_height {
            let msg = format!(
                "Terminal size is too small ({}x{}) for the maze ({}x{} characters) to display. Resize the terminal or rerun with fewer rows and columns.\r\n",
                term_width, term_height, needed_width, needed_height
            );
            queue!(
                self.stdout,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
                style::PrintStyledContent(
                    "Press Esc to exit...\r\n"
                        .with(Color::Blue)
                        .attribute(Attribute::Bold)
                )
            )?;
            self.stdout.flush()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Redraws everything: walls from the tree adjacency, cell squares
    /// from their roles and visited flags, and the revealed part of the
    /// route on top.
    pub fn draw_full(&mut self, maze: &Maze, search: &Search) -> std::io::Result<()> {
        let (grid_width, grid_height) = self.grid_dims;
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        for gy in 0..grid_height {
            for gx in 0..grid_width {
                self.stdout
                    .queue(style::Print(tile_at(maze, (grid_width, grid_height), gx, gy)))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        for pair in search.revealed().windows(2) {
            self.queue_passage(pair[0], pair[1], Tile::Route)?;
        }
        for &coord in search.revealed() {
            self.queue_cell(maze, coord, Tile::Route)?;
        }
        self.stdout.flush()
    }

    /// Applies one engine tick incrementally.
    pub fn apply(&mut self, maze: &Maze, search: &Search, tick: Tick) -> std::io::Result<()> {
        match tick {
            Tick::Visited(coord) => self.queue_cell(maze, coord, Tile::Visited)?,
            Tick::Found(_) => {
                // The goal keeps its marker; the reveal ticks draw the route.
            }
            Tick::Revealed(coord) => {
                let revealed = search.revealed();
                if revealed.len() >= 2 {
                    self.queue_passage(revealed[revealed.len() - 2], coord, Tile::Route)?;
                }
                self.queue_cell(maze, coord, Tile::Route)?;
            }
        }
        self.stdout.flush()
    }

    /// Writes a message on the line below the maze, or clears it.
    pub fn status<D: Display>(&mut self, msg: Option<StyledContent<D>>) -> std::io::Result<()> {
        super::log_terminal(&mut self.stdout, self.grid_dims.1, msg)
    }

    /// Paints a cell square, leaving the start and goal markers alone.
    fn queue_cell(&mut self, maze: &Maze, coord: Coord, tile: Tile) -> std::io::Result<()> {
        if maze[coord].role != Role::Normal {
            return Ok(());
        }
        let (row, col) = coord;
        queue!(
            self.stdout,
            cursor::MoveTo((col * 2 + 1) * Tile::WIDTH, row * 2 + 1),
            style::Print(tile)
        )
    }

    /// Paints the wall slot between two adjacent cells.
    fn queue_passage(&mut self, from: Coord, to: Coord, tile: Tile) -> std::io::Result<()> {
        let (gx, gy) = (from.1 + to.1 + 1, from.0 + to.0 + 1);
        queue!(
            self.stdout,
            cursor::MoveTo(gx * Tile::WIDTH, gy),
            style::Print(tile)
        )
    }
}

/// Tile for one square of the drawing grid, before any route overlay.
fn tile_at(maze: &Maze, (grid_width, grid_height): (u16, u16), gx: u16, gy: u16) -> Tile {
    match (gx % 2 == 1, gy % 2 == 1) {
        // Odd coordinates in both axes are cell squares.
        (true, true) => cell_tile(maze, ((gy - 1) / 2, (gx - 1) / 2)),
        // Even column, odd row: the slot between horizontal neighbors.
        (false, true) => {
            if gx == 0 || gx == grid_width - 1 {
                return Tile::Wall;
            }
            let row = (gy - 1) / 2;
            if maze.tree_connected((row, gx / 2 - 1), (row, gx / 2)) {
                Tile::Open
            } else {
                Tile::Wall
            }
        }
        // Odd column, even row: the slot between vertical neighbors.
        (true, false) => {
            if gy == 0 || gy == grid_height - 1 {
                return Tile::Wall;
            }
            let col = (gx - 1) / 2;
            if maze.tree_connected((gy / 2 - 1, col), (gy / 2, col)) {
                Tile::Open
            } else {
                Tile::Wall
            }
        }
        // Lattice corners never open up.
        (false, false) => Tile::Wall,
    }
}

fn cell_tile(maze: &Maze, coord: Coord) -> Tile {
    let vertex = &maze[coord];
    match vertex.role {
        Role::Start => Tile::Start,
        Role::Goal => Tile::Goal,
        Role::Normal if vertex.visited => Tile::Visited,
        Role::Normal => Tile::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_layout_for_a_small_maze() {
        let maze = Maze::new(2, 2, Some(10));
        let dims = (5, 5);
        // Lattice squares and the outer border are always walls.
        assert_eq!(tile_at(&maze, dims, 0, 0), Tile::Wall);
        assert_eq!(tile_at(&maze, dims, 4, 0), Tile::Wall);
        assert_eq!(tile_at(&maze, dims, 2, 2), Tile::Wall);
        assert_eq!(tile_at(&maze, dims, 0, 3), Tile::Wall);
        // Cell squares pick up their roles.
        assert_eq!(tile_at(&maze, dims, 1, 1), Tile::Start);
        assert_eq!(tile_at(&maze, dims, 3, 3), Tile::Goal);
        // Four internal slots, three tree edges, so exactly one stays
        // closed.
        let slots = [(2, 1), (2, 3), (1, 2), (3, 2)];
        let open = slots
            .iter()
            .filter(|&&(gx, gy)| tile_at(&maze, dims, gx, gy) == Tile::Open)
            .count();
        assert_eq!(open, 3);
    }

    #[test]
    fn test_open_slots_mirror_tree_passages() {
        let maze = Maze::new(3, 4, Some(11));
        let dims = (9, 7);
        for row in 0..3u16 {
            for col in 0..3u16 {
                let open = tile_at(&maze, dims, 2 * col + 2, 2 * row + 1) == Tile::Open;
                assert_eq!(open, maze.tree_connected((row, col), (row, col + 1)));
            }
        }
        for row in 0..2u16 {
            for col in 0..4u16 {
                let open = tile_at(&maze, dims, 2 * col + 1, 2 * row + 2) == Tile::Open;
                assert_eq!(open, maze.tree_connected((row, col), (row + 1, col)));
            }
        }
    }

    #[test]
    fn test_visited_cells_show_after_marking() {
        let mut maze = Maze::new(2, 3, Some(12));
        assert_eq!(tile_at(&maze, (7, 5), 3, 1), Tile::Open);
        maze[(0, 1)].visited = true;
        assert_eq!(tile_at(&maze, (7, 5), 3, 1), Tile::Visited);
        // Start and goal keep their markers even when marked.
        maze[(0, 0)].visited = true;
        assert_eq!(tile_at(&maze, (7, 5), 1, 1), Tile::Start);
    }
}
