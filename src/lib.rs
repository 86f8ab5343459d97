//! **mazegen** generates perfect mazes on a rectangular grid with the recursive backtracker
//! algorithm and finds the route through them with a best first search.
//!
//! ```
//! use mazegen::maze::MazeGenerator;
//! use mazegen::units::{Height, Width};
//!
//! let mut maze = MazeGenerator::from_seed(Width(8), Height(6), 42).unwrap();
//! maze.generate().unwrap();
//! let route = maze.solve().unwrap();
//! assert_eq!(route.first().map(|c| (c.x, c.y)), Some((0, 0)));
//! assert_eq!(route.last().map(|c| (c.x, c.y)), Some((7, 5)));
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod graph;
pub mod grid_displays;
pub mod maze;
pub mod solvers;
pub mod units;
pub mod walls;
