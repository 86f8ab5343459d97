use error_chain::bail;
use log::info;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::generators;
use crate::graph::LargeGraph;
use crate::solvers;
use crate::units::{Height, Width};

/// A single maze: its grid, the random source that carves it and, once solved, the route from
/// the top left entrance to the bottom right exit.
#[derive(Debug)]
pub struct MazeGenerator<R: Rng = XorShiftRng> {
    graph: LargeGraph,
    rng: R,
    generated: bool,
    path: Option<Vec<GridCoordinate>>,
}

impl MazeGenerator<XorShiftRng> {
    /// A generator seeded from the operating system's entropy source.
    pub fn new(width: Width, height: Height) -> Result<MazeGenerator<XorShiftRng>> {
        MazeGenerator::with_rng(width, height, XorShiftRng::from_entropy())
    }

    /// A generator whose mazes are fully determined by `seed`.
    pub fn from_seed(width: Width,
                     height: Height,
                     seed: u64)
                     -> Result<MazeGenerator<XorShiftRng>> {
        MazeGenerator::with_rng(width, height, XorShiftRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn with_rng(width: Width, height: Height, rng: R) -> Result<MazeGenerator<R>> {
        Ok(MazeGenerator {
            graph: LargeGraph::new(width, height)?,
            rng,
            generated: false,
            path: None,
        })
    }

    #[inline]
    pub fn graph(&self) -> &LargeGraph {
        &self.graph
    }

    pub fn into_graph(self) -> LargeGraph {
        self.graph
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// The top left cell, where the route starts.
    pub fn entrance(&self) -> GridCoordinate {
        GridCoordinate::new(0, 0)
    }

    /// The bottom right cell, where the route ends.
    pub fn exit(&self) -> GridCoordinate {
        GridCoordinate::new(self.graph.width().0 as u32 - 1,
                            self.graph.height().0 as u32 - 1)
    }

    /// Carve a perfect maze into the grid.
    ///
    /// A generator carves exactly one maze, asking it for another is an
    /// `ErrorKind::AlreadyGenerated` error.
    pub fn generate(&mut self) -> Result<()> {
        if self.generated {
            bail!(ErrorKind::AlreadyGenerated);
        }
        generators::recursive_backtracker(&mut self.graph, &mut self.rng)?;
        self.generated = true;
        info!("generated {}x{} maze with {} passages",
              self.graph.width().0,
              self.graph.height().0,
              self.graph.removed_edges_count());
        Ok(())
    }

    /// Find the route from the entrance to the exit and remember it.
    ///
    /// `None` means there is no route, which only happens for a grid that has not been
    /// generated yet (a 1x1 grid is its own route).
    pub fn solve(&mut self) -> Option<&[GridCoordinate]> {
        self.path = solvers::best_first_search(&self.graph, self.entrance(), self.exit());
        self.path()
    }

    /// The route found by the last `solve`.
    pub fn path(&self) -> Option<&[GridCoordinate]> {
        self.path.as_ref().map(|path| path.as_slice())
    }
}
