use log::{debug, trace};
use rand::Rng;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::graph::{Graph, IndexType};

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// Starting from the top left cell this performs a random walk that only steps onto cells it
/// has not visited yet, knocking down the wall it walks through. When the walk reaches a cell
/// with no unvisited neighbours it backtracks along its own route to the most recent cell that
/// still has one, and carries on from there. It is a depth first search with the neighbour
/// picked at random, so every cell is reached through exactly one removed wall and the result
/// is a perfect maze: `size() - 1` removed walls forming a spanning tree.
///
/// The "recursion" lives on an explicit stack so large grids do not exhaust the call stack.
/// The random neighbour choice is the only use of `rng`: the same seeded generator produces
/// the same maze.
pub fn recursive_backtracker<GridIndexType, R>(grid: &mut Graph<GridIndexType>,
                                               rng: &mut R)
                                               -> Result<()>
    where GridIndexType: IndexType,
          R: Rng
{
    let mut cells = grid.new_cell_arena();
    let start = GridCoordinate::new(0, 0);
    cells.visit(start);

    let mut stack = Vec::with_capacity(grid.size());
    stack.push(start);

    while let Some(&current) = stack.last() {
        let unvisited_neighbours = grid.unvisited_neighbours(current, &cells);

        if unvisited_neighbours.is_empty() {
            // dead end
            let _ = stack.pop();
        } else {
            let next = unvisited_neighbours[rng.gen_range(0..unvisited_neighbours.len())];
            trace!("carving passage {} -> {}", current, next);
            grid.remove_edge(current, next)?;
            cells.visit(next);
            stack.push(next);
        }
    }

    debug!("recursive backtracker carved {} passages over {} cells",
           grid.removed_edges_count(),
           grid.size());
    Ok(())
}
