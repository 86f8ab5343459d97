//! Wall segments of a maze, for collaborators that place geometry where walls stand.

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::graph::{Graph, IndexType};

/// One wall segment: the `side` of `cell` that is blocked.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Wall {
    pub cell: GridCoordinate,
    pub side: CompassPrimary,
}

impl Wall {
    pub fn new(cell: GridCoordinate, side: CompassPrimary) -> Wall {
        Wall { cell, side }
    }
}

impl<GridIndexType: IndexType> Graph<GridIndexType> {
    /// Every standing wall between two cells of the grid, each reported once on the East or
    /// South side of the northern/western cell.
    pub fn interior_walls<'a>(&'a self) -> impl Iterator<Item = Wall> + 'a {
        self.iter().flat_map(move |cell| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter_map(move |&side| {
                    self.neighbour_at_direction(cell, side)
                        .filter(|&neighbour| self.has_wall_between(cell, neighbour))
                        .map(|_| Wall::new(cell, side))
                })
                .collect::<Vec<_>>()
        })
    }

    /// The outer border of the maze, with a gap for the entrance on the North side of the
    /// top left cell and for the exit on the South side of the bottom right cell.
    pub fn boundary_walls(&self) -> Vec<Wall> {
        let (w, h) = (self.width().0 as u32, self.height().0 as u32);
        let entrance = Wall::new(GridCoordinate::new(0, 0), CompassPrimary::North);
        let exit = Wall::new(GridCoordinate::new(w - 1, h - 1), CompassPrimary::South);

        let north = (0..w).map(|x| Wall::new(GridCoordinate::new(x, 0), CompassPrimary::North));
        let east = (0..h).map(|y| Wall::new(GridCoordinate::new(w - 1, y), CompassPrimary::East));
        let south = (0..w).map(|x| Wall::new(GridCoordinate::new(x, h - 1), CompassPrimary::South));
        let west = (0..h).map(|y| Wall::new(GridCoordinate::new(0, y), CompassPrimary::West));

        north.chain(east)
             .chain(south)
             .chain(west)
             .filter(|wall| *wall != entrance && *wall != exit)
             .collect()
    }
}
