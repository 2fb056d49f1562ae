pub mod app;
pub mod config;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod solvers;

pub use maze::{Coord, Maze};
pub use solvers::{Search, SearchKind};
