use smallvec::SmallVec;
use std::fmt;

use crate::units::{Height, Width};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// The four sides of a square cell. `y` grows southwards, so North is the top side.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Top, right, bottom, left. Neighbour queries always follow this order so that a seeded
    /// maze generation is reproducible.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    /// Creates a new coordinate offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable, it is not checked against any grid.
    pub fn offset(self, dir: CompassPrimary) -> Option<GridCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|y| GridCoordinate::new(x, y)),
            CompassPrimary::East => x.checked_add(1).map(|x| GridCoordinate::new(x, y)),
            CompassPrimary::South => y.checked_add(1).map(|y| GridCoordinate::new(x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| GridCoordinate::new(x, y)),
        }
    }

    /// Differ by exactly 1 in exactly one axis.
    pub fn is_geometric_neighbour(self, other: GridCoordinate) -> bool {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx + dy == 1
    }

    /// The side of `self` that `other` lies on, if they are geometric neighbours.
    pub fn direction_to(self, other: GridCoordinate) -> Option<CompassPrimary> {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|dir| self.offset(*dir) == Some(other))
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// One grid position plus the scratch state a maze algorithm keeps about it.
///
/// `visited` is only meaningful while generating, `parent` and `heuristic` only while solving.
/// The parent is an index into the owning `CellArena`, a back reference rather than a maze
/// passage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell {
    coord: GridCoordinate,
    visited: bool,
    parent: Option<usize>,
    heuristic: f64,
}

impl Cell {
    fn new(coord: GridCoordinate) -> Cell {
        Cell {
            coord,
            visited: false,
            parent: None,
            heuristic: 0.0,
        }
    }

    #[inline]
    pub fn coord(&self) -> GridCoordinate {
        self.coord
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.coord.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.coord.y
    }

    #[inline]
    pub fn visit(&mut self) {
        self.visited = true;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }
}

/// Row-major arena holding one `Cell` per grid coordinate.
///
/// Each algorithm run (a generation, a solve) builds a fresh arena so no visitation or
/// backtracking state ever leaks from one run into the next.
#[derive(Clone, Debug)]
pub struct CellArena {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl CellArena {
    pub fn new(width: Width, height: Height) -> CellArena {
        let (Width(w), Height(h)) = (width, height);
        let mut cells = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                cells.push(Cell::new(GridCoordinate::new(x as u32, y as u32)));
            }
        }
        CellArena {
            cells,
            width: w,
            height: h,
        }
    }

    #[inline]
    fn index_of(&self, coord: GridCoordinate) -> Option<usize> {
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.index_of(coord).map(|index| &self.cells[index])
    }

    pub fn cell_mut(&mut self, coord: GridCoordinate) -> Option<&mut Cell> {
        match self.index_of(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    /// Mark a cell visited. Returns false if the coordinate is outside the arena.
    pub fn visit(&mut self, coord: GridCoordinate) -> bool {
        self.cell_mut(coord).map(|cell| cell.visit()).is_some()
    }

    pub fn is_visited(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).map_or(false, |cell| cell.is_visited())
    }

    /// Point `child` back at `parent`. Ignored if either coordinate is outside the arena.
    pub fn set_parent(&mut self, child: GridCoordinate, parent: GridCoordinate) {
        if let (Some(child_index), Some(parent_index)) = (self.index_of(child),
                                                          self.index_of(parent)) {
            self.cells[child_index].parent = Some(parent_index);
        }
    }

    pub fn parent(&self, coord: GridCoordinate) -> Option<GridCoordinate> {
        self.cell(coord)
            .and_then(|cell| cell.parent)
            .map(|parent_index| self.cells[parent_index].coord())
    }

    pub fn set_heuristic(&mut self, coord: GridCoordinate, heuristic: f64) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.heuristic = heuristic;
        }
    }

    pub fn heuristic(&self, coord: GridCoordinate) -> Option<f64> {
        self.cell(coord).map(|cell| cell.heuristic)
    }

    /// Number of parent hops to the root of the search tree, 0 for a cell without a parent.
    pub fn depth_from_root(&self, coord: GridCoordinate) -> usize {
        self.ancestor_indices(coord).count()
    }

    /// The cells from the search tree root down to and including `coord`.
    /// Empty if `coord` is outside the arena.
    pub fn path_to_origin(&self, coord: GridCoordinate) -> Vec<GridCoordinate> {
        let start_index = match self.index_of(coord) {
            Some(index) => index,
            None => return vec![],
        };

        let mut path = vec![self.cells[start_index].coord()];
        path.extend(self.ancestor_indices(coord).map(|index| self.cells[index].coord()));
        path.reverse();
        path
    }

    // Bounded by the arena size so a parent cycle cannot loop forever.
    fn ancestor_indices<'a>(&'a self, coord: GridCoordinate) -> impl Iterator<Item = usize> + 'a {
        let first = self.index_of(coord).and_then(|index| self.cells[index].parent);
        std::iter::successors(first, move |&index| self.cells[index].parent).take(self.cells.len())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn offsets() {
        let c = gc(1, 1);
        assert_eq!(c.offset(CompassPrimary::North), Some(gc(1, 0)));
        assert_eq!(c.offset(CompassPrimary::East), Some(gc(2, 1)));
        assert_eq!(c.offset(CompassPrimary::South), Some(gc(1, 2)));
        assert_eq!(c.offset(CompassPrimary::West), Some(gc(0, 1)));

        let origin = gc(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);
        assert_eq!(gc(u32::MAX, 0).offset(CompassPrimary::East), None);
    }

    #[test]
    fn geometric_neighbours() {
        assert!(gc(0, 0).is_geometric_neighbour(gc(1, 0)));
        assert!(gc(0, 0).is_geometric_neighbour(gc(0, 1)));
        assert!(gc(3, 4).is_geometric_neighbour(gc(3, 3)));

        assert!(!gc(0, 0).is_geometric_neighbour(gc(0, 0)));
        assert!(!gc(0, 0).is_geometric_neighbour(gc(1, 1)));
        assert!(!gc(0, 0).is_geometric_neighbour(gc(2, 0)));
    }

    #[test]
    fn direction_between_cells() {
        assert_eq!(gc(1, 1).direction_to(gc(1, 0)), Some(CompassPrimary::North));
        assert_eq!(gc(1, 1).direction_to(gc(0, 1)), Some(CompassPrimary::West));
        assert_eq!(gc(1, 1).direction_to(gc(2, 2)), None);
        assert_eq!(CompassPrimary::East.opposite(), CompassPrimary::West);
    }

    #[test]
    fn visiting_is_idempotent() {
        let mut arena = CellArena::new(Width(2), Height(2));
        assert!(!arena.is_visited(gc(1, 1)));
        assert!(arena.visit(gc(1, 1)));
        assert!(arena.visit(gc(1, 1)));
        assert!(arena.is_visited(gc(1, 1)));
        assert!(!arena.is_visited(gc(0, 1)));

        assert!(!arena.visit(gc(2, 0)));
        assert!(!arena.is_visited(gc(2, 0)));
    }

    #[test]
    fn arena_cells_are_unique_per_coordinate() {
        let arena = CellArena::new(Width(3), Height(2));
        for y in 0..2 {
            for x in 0..3 {
                let cell = arena.cell(gc(x, y)).expect("cell inside the arena");
                assert_eq!((cell.x(), cell.y()), (x, y));
            }
        }
        assert!(arena.cell(gc(3, 0)).is_none());
        assert!(arena.cell(gc(0, 2)).is_none());
    }

    #[test]
    fn depth_from_root() {
        let mut arena = CellArena::new(Width(3), Height(1));
        assert_eq!(arena.depth_from_root(gc(0, 0)), 0);

        arena.set_parent(gc(1, 0), gc(0, 0));
        arena.set_parent(gc(2, 0), gc(1, 0));
        assert_eq!(arena.depth_from_root(gc(0, 0)), 0);
        assert_eq!(arena.depth_from_root(gc(1, 0)), 1);
        assert_eq!(arena.depth_from_root(gc(2, 0)), 2);
        assert_eq!(arena.parent(gc(2, 0)), Some(gc(1, 0)));
        assert_eq!(arena.parent(gc(0, 0)), None);
    }

    #[test]
    fn path_to_origin_is_root_first() {
        let mut arena = CellArena::new(Width(2), Height(2));
        assert_eq!(arena.path_to_origin(gc(0, 0)), vec![gc(0, 0)]);

        arena.set_parent(gc(1, 0), gc(0, 0));
        arena.set_parent(gc(1, 1), gc(1, 0));
        assert_eq!(arena.path_to_origin(gc(1, 1)), vec![gc(0, 0), gc(1, 0), gc(1, 1)]);
        assert!(arena.path_to_origin(gc(5, 5)).is_empty());
    }

    #[test]
    fn parent_cycles_terminate() {
        let mut arena = CellArena::new(Width(2), Height(1));
        arena.set_parent(gc(0, 0), gc(1, 0));
        arena.set_parent(gc(1, 0), gc(0, 0));
        assert_eq!(arena.depth_from_root(gc(0, 0)), 2);
    }

    #[test]
    fn heuristics() {
        let mut arena = CellArena::new(Width(2), Height(2));
        assert_eq!(arena.heuristic(gc(1, 0)), Some(0.0));
        arena.set_heuristic(gc(1, 0), 2.5);
        assert_eq!(arena.heuristic(gc(1, 0)), Some(2.5));
        assert_eq!(arena.cell(gc(1, 0)).map(|c| c.heuristic()), Some(2.5));
        assert_eq!(arena.heuristic(gc(9, 9)), None);
    }
}
