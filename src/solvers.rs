use std::cmp::Ordering;

use bit_set::BitSet;
use itertools::Itertools;
use log::{debug, warn};

use crate::cells::GridCoordinate;
use crate::graph::{Graph, IndexType};

/// Find a route through the maze from `start` to `target`, walking only through removed walls.
///
/// A best first search: the frontier cell with the lowest score is expanded next, where the
/// score is the number of steps taken to reach the cell plus its straight line distance to the
/// target. Ties go to the cell that joined the frontier first. The search stops as soon as the
/// target shows up as a neighbour of the expanded cell.
///
/// Returns the cells from `start` to `target` inclusive, `None` if either coordinate is outside
/// of the grid or the target cannot be reached. All per-cell search state is local to the call,
/// so a maze can be solved any number of times.
pub fn best_first_search<GridIndexType>(grid: &Graph<GridIndexType>,
                                        start: GridCoordinate,
                                        target: GridCoordinate)
                                        -> Option<Vec<GridCoordinate>>
    where GridIndexType: IndexType
{
    let start_index = grid.grid_coordinate_to_index(start)?;
    grid.grid_coordinate_to_index(target)?;

    if start == target {
        return Some(vec![start]);
    }

    let mut cells = grid.new_cell_arena();
    cells.set_heuristic(start, grid.distance(start, target));

    // `open` keeps insertion order for tie breaks, the bit sets answer membership.
    let mut open = vec![start];
    let mut open_members = BitSet::with_capacity(grid.size());
    let mut closed = BitSet::with_capacity(grid.size());
    open_members.insert(start_index);

    let mut search_cell = start;
    loop {
        for neighbour in grid.linked_neighbours(search_cell) {
            if neighbour == target {
                cells.set_parent(target, search_cell);
                let path = cells.path_to_origin(target);
                debug!("best first search {} -> {}: path of {} cells, {} cells explored",
                       start,
                       target,
                       path.len(),
                       closed.len() + 1);
                return Some(path);
            }

            let index = match grid.grid_coordinate_to_index(neighbour) {
                Some(index) => index,
                None => continue,
            };
            if !closed.contains(index) && !open_members.contains(index) {
                open.push(neighbour);
                open_members.insert(index);
                cells.set_parent(neighbour, search_cell);
                let score = cells.depth_from_root(neighbour) as f64 +
                            grid.distance(neighbour, target);
                cells.set_heuristic(neighbour, score);
            }
        }

        if let Some(position) = open.iter().position(|&cell| cell == search_cell) {
            let _ = open.remove(position);
        }
        if let Some(search_index) = grid.grid_coordinate_to_index(search_cell) {
            open_members.remove(search_index);
            closed.insert(search_index);
        }

        let score = |cell: &GridCoordinate| cells.heuristic(*cell).unwrap_or(::std::f64::INFINITY);
        let next = open.iter()
            .position_min_by(|a, b| score(a).partial_cmp(&score(b)).unwrap_or(Ordering::Equal));

        match next {
            Some(position) => search_cell = open[position],
            None => {
                warn!("best first search {} -> {}: frontier exhausted after {} cells, no path",
                      start,
                      target,
                      closed.len());
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators;
    use crate::graph::SmallGraph;
    use crate::units::{Height, Width};
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn open_grid(w: usize, h: usize) -> SmallGraph {
        let mut g = SmallGraph::new(Width(w), Height(h)).unwrap();
        let cells = g.iter().collect::<Vec<_>>();
        for cell in cells {
            for neighbour in g.geometric_neighbours(cell) {
                g.remove_edge(cell, neighbour).unwrap();
            }
        }
        g
    }

    fn assert_walkable(g: &SmallGraph, path: &[GridCoordinate]) {
        for (a, b) in path.iter().tuple_windows() {
            assert!(g.are_connected(*a, *b), "{} -> {} is walled", a, b);
        }
    }

    #[test]
    fn trivial_path_when_start_is_target() {
        let g = SmallGraph::new(Width(1), Height(1)).unwrap();
        assert_eq!(best_first_search(&g, gc(0, 0), gc(0, 0)), Some(vec![gc(0, 0)]));
    }

    #[test]
    fn invalid_coordinates_have_no_path() {
        let g = open_grid(3, 3);
        assert_eq!(best_first_search(&g, gc(3, 0), gc(0, 0)), None);
        assert_eq!(best_first_search(&g, gc(0, 0), gc(0, 3)), None);
    }

    #[test]
    fn walled_grid_has_no_path() {
        let g = SmallGraph::new(Width(4), Height(4)).unwrap();
        assert_eq!(best_first_search(&g, gc(0, 0), gc(3, 3)), None);
    }

    #[test]
    fn unreachable_region_has_no_path() {
        let mut g = SmallGraph::new(Width(3), Height(1)).unwrap();
        g.remove_edge(gc(0, 0), gc(1, 0)).unwrap();
        assert_eq!(best_first_search(&g, gc(0, 0), gc(2, 0)), None);
        assert_eq!(best_first_search(&g, gc(0, 0), gc(1, 0)), Some(vec![gc(0, 0), gc(1, 0)]));
    }

    #[test]
    fn ties_go_to_the_first_frontier_cell() {
        // Both (1, 0) and (0, 1) score 2, (1, 0) is discovered first as it lies East.
        let g = open_grid(2, 2);
        assert_eq!(best_first_search(&g, gc(0, 0), gc(1, 1)),
                   Some(vec![gc(0, 0), gc(1, 0), gc(1, 1)]));
    }

    #[test]
    fn corridor_path() {
        let mut g = SmallGraph::new(Width(3), Height(2)).unwrap();
        // A U shaped corridor: (0,0) -> (0,1) -> (1,1) -> (1,0) -> (2,0) -> (2,1)
        g.remove_edge(gc(0, 0), gc(0, 1)).unwrap();
        g.remove_edge(gc(0, 1), gc(1, 1)).unwrap();
        g.remove_edge(gc(1, 1), gc(1, 0)).unwrap();
        g.remove_edge(gc(1, 0), gc(2, 0)).unwrap();
        g.remove_edge(gc(2, 0), gc(2, 1)).unwrap();

        let path = best_first_search(&g, gc(0, 0), gc(2, 1)).unwrap();
        assert_eq!(path,
                   vec![gc(0, 0), gc(0, 1), gc(1, 1), gc(1, 0), gc(2, 0), gc(2, 1)]);
    }

    #[test]
    fn generated_maze_path_is_walkable_and_simple() {
        for seed in 0..10 {
            let mut g = SmallGraph::new(Width(12), Height(10)).unwrap();
            generators::recursive_backtracker(&mut g, &mut XorShiftRng::seed_from_u64(seed))
                .unwrap();
            let path = best_first_search(&g, gc(0, 0), gc(11, 9)).unwrap();
            assert_eq!(path.first(), Some(&gc(0, 0)));
            assert_eq!(path.last(), Some(&gc(11, 9)));
            assert_walkable(&g, &path);
            assert_eq!(path.iter().unique().count(), path.len());
        }
    }

    #[test]
    fn solving_is_repeatable() {
        let mut g = SmallGraph::new(Width(8), Height(8)).unwrap();
        generators::recursive_backtracker(&mut g, &mut XorShiftRng::seed_from_u64(11)).unwrap();
        let first = best_first_search(&g, gc(0, 0), gc(7, 7));
        let second = best_first_search(&g, gc(0, 0), gc(7, 7));
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn quickcheck_route_between_any_two_cells() {
        fn p(w: u8, h: u8, seed: u64, from: (u8, u8), to: (u8, u8)) -> TestResult {
            let (w, h) = (w as u32 % 12 + 1, h as u32 % 12 + 1);
            let mut g = SmallGraph::new(Width(w as usize), Height(h as usize)).unwrap();
            generators::recursive_backtracker(&mut g, &mut XorShiftRng::seed_from_u64(seed))
                .unwrap();
            let start = gc(from.0 as u32 % w, from.1 as u32 % h);
            let target = gc(to.0 as u32 % w, to.1 as u32 % h);

            match best_first_search(&g, start, target) {
                Some(path) => {
                    let walkable = path.iter()
                        .tuple_windows()
                        .all(|(a, b)| g.are_connected(*a, *b));
                    TestResult::from_bool(path.first() == Some(&start) &&
                                          path.last() == Some(&target) &&
                                          walkable &&
                                          path.iter().unique().count() == path.len())
                }
                None => TestResult::failed(),
            }
        }
        quickcheck(p as fn(u8, u8, u64, (u8, u8), (u8, u8)) -> TestResult);
    }
}
