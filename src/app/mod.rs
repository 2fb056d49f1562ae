pub mod renderer;
pub mod tile;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    app::renderer::Renderer,
    maze::Maze,
    solvers::{Phase, Search, SearchKind, Tick},
};

/// Key bindings shown on the status line.
const HELP_LINE: &str =
    "b: breadth-first  d: depth-first  space: pause/resume  r: new maze  q: quit";

pub struct App {
    /// Interval between engine ticks while the loop is live
    tick_rate: Duration,
}

impl Default for App {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(10),
        }
    }
}

impl App {
    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        crossterm::queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop: draws the maze, then alternates between
    /// draining input events and ticking the search until the user quits.
    pub fn run(&self, maze: &mut Maze) -> std::io::Result<()> {
        let mut renderer = Renderer::new(maze);
        if !renderer.check_size()? {
            wait_for_keypress(KeyCode::Esc)?;
            return Ok(());
        }

        let mut search = Search::default();
        renderer.draw_full(maze, &search)?;
        renderer.status(Some(HELP_LINE.with(Color::Cyan)))?;

        tracing::info!("[app loop] started");
        // Whether the running search is held in place. The reveal
        // animation ignores it.
        let mut paused = false;
        let mut last_tick = Instant::now();
        loop {
            let timeout = self.tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    event::Event::Key(key_event)
                        if key_event.kind == event::KeyEventKind::Press =>
                    {
                        match key_event.code {
                            KeyCode::Esc | KeyCode::Char('q') => {
                                tracing::info!("[app loop] exit requested");
                                break;
                            }
                            KeyCode::Char('b') => {
                                start_search(
                                    &mut renderer,
                                    maze,
                                    &mut search,
                                    &mut paused,
                                    SearchKind::Bfs,
                                )?;
                            }
                            KeyCode::Char('d') => {
                                start_search(
                                    &mut renderer,
                                    maze,
                                    &mut search,
                                    &mut paused,
                                    SearchKind::Dfs,
                                )?;
                            }
                            KeyCode::Char(' ') => {
                                // Pausing only means something before the
                                // goal is found; afterwards the key is inert.
                                if matches!(search.phase(), Phase::Idle | Phase::Running) {
                                    paused = !paused;
                                    let msg = if paused {
                                        "Paused. Press space to resume.".with(Color::Yellow)
                                    } else {
                                        "Resumed.".with(Color::Green)
                                    };
                                    renderer.status(Some(msg))?;
                                }
                            }
                            KeyCode::Char('r') => {
                                tracing::info!("[app loop] rebuilding the maze");
                                maze.regenerate();
                                search.reset();
                                paused = false;
                                renderer.draw_full(maze, &search)?;
                                renderer.status(Some(HELP_LINE.with(Color::Cyan)))?;
                            }
                            _ => {} // Ignore other keys
                        }
                    }
                    event::Event::Resize(_, _) => {
                        if renderer.check_size()? {
                            renderer.draw_full(maze, &search)?;
                            renderer.status(Some(HELP_LINE.with(Color::Cyan)))?;
                        } else {
                            wait_for_keypress(KeyCode::Esc)?;
                            break;
                        }
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                // Reset the tick clock even when nothing advances, so the
                // poll above keeps its timeout while paused.
                last_tick = Instant::now();
                if paused && search.phase() == Phase::Running {
                    continue;
                }
                if let Some(tick) = search.tick(maze) {
                    renderer.apply(maze, &search, tick)?;
                    match tick {
                        Tick::Found(_) => {
                            renderer.status(Some(
                                "Path found! Revealing the route..."
                                    .with(Color::Green)
                                    .attribute(Attribute::Bold),
                            ))?;
                        }
                        Tick::Revealed(_) if search.phase() == Phase::Done => {
                            renderer.status(Some(
                                format!(
                                    "Route revealed: {} cells. {}",
                                    search.path().len(),
                                    HELP_LINE
                                )
                                .with(Color::Green),
                            ))?;
                        }
                        _ => {}
                    }
                }
            }
        }
        tracing::info!("[app loop] exited");
        Ok(())
    }

    /// Profiling mode: generate and solve mazes back to back without a
    /// terminal. Timings go to the log.
    pub fn profile(
        &self,
        rows: u16,
        cols: u16,
        kind: SearchKind,
        iterations: usize,
        seed: Option<u64>,
    ) {
        let mut maze = Maze::new(rows, cols, seed);
        let mut search = Search::default();
        for iteration in 0..iterations {
            if iteration > 0 {
                maze.regenerate();
                search.reset();
            }
            let started = Instant::now();
            search.start(&mut maze, kind);
            let mut ticks = 0usize;
            while search.phase() != Phase::Done {
                search.tick(&mut maze);
                ticks += 1;
            }
            tracing::info!(
                "[profile] iteration {}: {} ticks, route of {} cells in {:?}",
                iteration,
                ticks,
                search.path().len(),
                started.elapsed()
            );
        }
    }
}

/// Start a search if none is in flight, redrawing the maze so the marks
/// of the previous traversal disappear.
fn start_search(
    renderer: &mut Renderer,
    maze: &mut Maze,
    search: &mut Search,
    paused: &mut bool,
    kind: SearchKind,
) -> std::io::Result<()> {
    if !search.start(maze, kind) {
        return Ok(());
    }
    *paused = false;
    renderer.draw_full(maze, search)?;
    renderer.status(Some(format!("{} running...", kind).with(Color::Green)))
}

/// Log a message to the terminal on the row below the drawing grid,
/// truncated to the terminal width. Passing None clears the row.
pub fn log_terminal<D: std::fmt::Display>(
    stdout: &mut Stdout,
    grid_height: u16,
    msg: Option<StyledContent<D>>,
) -> std::io::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, grid_height),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    if let Some(msg) = msg {
        let (term_width, _) = terminal::size()?;
        let content = msg.content().to_string();
        stdout.queue(style::PrintStyledContent(StyledContent::new(
            *msg.style(),
            fit_to_width(&content, term_width as usize),
        )))?;
    }
    stdout.flush()
}

/// Longest prefix of a message that fits the given display width, cut on
/// a glyph boundary.
fn fit_to_width(content: &str, width: usize) -> &str {
    let (fitted, _) = content.unicode_truncate(width);
    fitted
}

/// Block until the given key is pressed.
pub fn wait_for_keypress(code: KeyCode) -> std::io::Result<()> {
    loop {
        if let event::Event::Key(key_event) = event::read()?
            && key_event.kind == event::KeyEventKind::Press
            && key_event.code == code
        {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages_are_cut_to_the_terminal_width() {
        assert_eq!(
            fit_to_width("Paused. Press space to resume.", 11),
            "Paused. Pre"
        );
        assert_eq!(fit_to_width("short", 80), "short");
        assert_eq!(fit_to_width("", 4), "");
        // Wide glyphs are kept whole or dropped, never split.
        assert_eq!(fit_to_width("maze 🟩🟩", 7), "maze 🟩");
        assert_eq!(fit_to_width("maze 🟩🟩", 6), "maze ");
    }
}
