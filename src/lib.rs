//! **maze_solver** generates perfect mazes on rectangular grids and finds the shortest route
//! through them.
//!
//! Mazes are carved by a randomized depth first walk with backtracking (`generators`) and
//! solved breadth first (`pathing`). The maze can be printed as text (`grid_displays`) or, with
//! the `sdl` feature, shown in a window (`renderers`).

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod renderers;
pub mod units;
#[cfg(feature = "sdl")]
mod sdl;
