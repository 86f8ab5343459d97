use error_chain::bail;
use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph as PetGraph, Undirected};
use std::fmt;
use std::marker::PhantomData;
use std::slice;

use crate::cells::{CellArena, CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::errors::*;
use crate::units::{EdgesCount, Height, NodesCount, Width};

/// A rectangular grid of cells plus the set of walls that have been knocked down.
///
/// Every cell is a node of an undirected graph and every removed wall is an edge between two
/// geometrically adjacent cells. A freshly built graph has no edges: every cell is walled off
/// from all of its neighbours.
pub struct Graph<GridIndexType: IndexType = u32> {
    graph: PetGraph<(), (), Undirected, GridIndexType>,
    width: Width,
    height: Height,
}

pub type SmallGraph = Graph<u8>;
pub type MediumGraph = Graph<u16>;
pub type LargeGraph = Graph<u32>;

impl<GridIndexType: IndexType> fmt::Debug for Graph<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Graph :: graph: {:?}, width: {:?}, height: {:?}",
               self.graph, self.width, self.height)
    }
}

/// Node and edge counts of a perfect maze over a `width * height` grid.
pub fn graph_size(width: Width, height: Height) -> (NodesCount, EdgesCount) {
    let cells_count = width.0 * height.0;
    (NodesCount(cells_count), EdgesCount(cells_count.saturating_sub(1)))
}

impl<GridIndexType: IndexType> Graph<GridIndexType> {
    /// Build a fully walled grid.
    ///
    /// Fails if either dimension is zero or if the grid has more cells than `GridIndexType`
    /// can index.
    pub fn new(width: Width, height: Height) -> Result<Graph<GridIndexType>> {
        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }

        // The maximum index value is reserved by petgraph as the invalid node index.
        let max_cells = <GridIndexType as IndexType>::max().index();
        let max_axis = u32::max_value() as usize;
        match w.checked_mul(h) {
            Some(cells) if cells <= max_cells && w <= max_axis && h <= max_axis => (),
            Some(cells) => bail!(ErrorKind::GridTooLarge(cells, max_cells)),
            None => bail!(ErrorKind::GridTooLarge(usize::max_value(), max_cells)),
        }

        let (NodesCount(nodes), EdgesCount(edges)) = graph_size(width, height);
        let mut graph = Graph {
            graph: PetGraph::with_capacity(nodes, edges),
            width,
            height,
        };
        for _ in 0..nodes {
            let _ = graph.graph.add_node(());
        }

        Ok(graph)
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    #[inline]
    pub fn removed_edges_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Fresh per-cell scratch state sized for this grid.
    pub fn new_cell_arena(&self) -> CellArena {
        CellArena::new(self.width, self.height)
    }

    /// The cell at `(x, y)`, or None if the position is outside of the grid.
    pub fn cell_at(&self, x: i64, y: i64) -> Option<GridCoordinate> {
        if x < 0 || y < 0 || x >= self.width.0 as i64 || y >= self.height.0 as i64 {
            None
        } else {
            Some(GridCoordinate::new(x as u32, y as u32))
        }
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional row-major index in the range 0..size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// Cells directly above, right of, below and left of `coord`, in that order, that lie
    /// inside the grid. Walls are not considered.
    pub fn geometric_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        if !self.is_valid_coordinate(coord) {
            return CoordinateSmallVec::new();
        }
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        coord.offset(direction).and_then(|neighbour_coord| {
            if self.is_valid_coordinate(neighbour_coord) {
                Some(neighbour_coord)
            } else {
                None
            }
        })
    }

    /// Can you walk directly between two cells?
    ///
    /// True only for geometric neighbours inside the grid whose shared wall has been
    /// removed. A cell is never connected to itself. The argument order does not matter.
    pub fn are_connected(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if !a.is_geometric_neighbour(b) {
            return false;
        }
        if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_graph_index(a),
                                                 self.grid_coordinate_graph_index(b)) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    /// Is there a standing wall between two neighbouring cells?
    pub fn has_wall_between(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.is_valid_coordinate(a) && self.is_valid_coordinate(b) &&
        a.is_geometric_neighbour(b) && !self.are_connected(a, b)
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.are_connected(coord, neighbour_coord))
    }

    /// Geometric neighbours not yet visited in `arena`, whatever the state of the walls.
    pub fn unvisited_neighbours(&self,
                                coord: GridCoordinate,
                                arena: &CellArena)
                                -> CoordinateSmallVec {
        self.geometric_neighbours(coord)
            .into_iter()
            .filter(|neighbour| !arena.is_visited(*neighbour))
            .collect()
    }

    /// Neighbours reachable from `coord` through a removed wall.
    pub fn linked_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.geometric_neighbours(coord)
            .into_iter()
            .filter(|neighbour| self.are_connected(coord, *neighbour))
            .collect()
    }

    /// Neighbours still separated from `coord` by a wall.
    pub fn walled_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.geometric_neighbours(coord)
            .into_iter()
            .filter(|neighbour| !self.are_connected(coord, *neighbour))
            .collect()
    }

    /// Knock down the wall between two neighbouring cells.
    ///
    /// Removing an already removed wall is a no-op. Out of grid coordinates, a cell paired
    /// with itself, or cells that are not neighbours are rejected and leave the graph as it was.
    /// So is a removal that would take the removed walls past what `GridIndexType` can index,
    /// which only a grid with more standing walls than index values can reach.
    pub fn remove_edge(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        let a_index = self.grid_coordinate_graph_index(a)
            .ok_or_else(|| ErrorKind::InvalidGridCoordinate(a))?;
        let b_index = self.grid_coordinate_graph_index(b)
            .ok_or_else(|| ErrorKind::InvalidGridCoordinate(b))?;
        if a == b {
            bail!(ErrorKind::SelfLink(a));
        }
        if !a.is_geometric_neighbour(b) {
            bail!(ErrorKind::NotNeighbours(a, b));
        }

        if self.graph.find_edge(a_index, b_index).is_none() {
            // petgraph reserves the maximum index value for edges too.
            let max_edges = <GridIndexType as IndexType>::max().index();
            if self.graph.edge_count() >= max_edges {
                bail!(ErrorKind::TooManyEdges(a, b, max_edges));
            }
            let _ = self.graph.add_edge(a_index, b_index, ());
        }
        Ok(())
    }

    /// Straight line distance between two grid positions.
    pub fn distance(&self, a: GridCoordinate, b: GridCoordinate) -> f64 {
        let dx = f64::from(a.x) - f64::from(b.x);
        let dy = f64::from(a.y) - f64::from(b.y);
        dx.hypot(dy)
    }

    /// All cells in row-major order.
    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            row_length: self.width.0,
            current_cell_number: 0,
            cells_count: self.size(),
        }
    }

    /// The removed walls as cell pairs, in the order they were removed.
    pub fn iter_removed_edges(&self) -> RemovedEdgesIter<GridIndexType> {
        RemovedEdgesIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            row_length: self.width.0,
            index_type: PhantomData,
        }
    }

    /// Serialize the maze as an edge list: line 1 is `n(#vertices) m(#edges)`, every further
    /// line is one removed wall between two 1-based row-major vertex indices.
    pub fn to_edge_list(&self) -> String {
        let mut graph_data = format!("{} {}\n", self.size(), self.removed_edges_count());
        for edge in self.graph.raw_edges() {
            graph_data.push_str(&format!("{} {}\n",
                                         edge.source().index() + 1,
                                         edge.target().index() + 1));
        }
        graph_data
    }

    /// Convert a grid coordinate into petgraph nodeindex
    /// Returns None if the grid coordinate is invalid (out of the grid's dimensions).
    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: GridCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord).map(graph::NodeIndex::<GridIndexType>::new)
    }
}

#[inline]
fn coordinate_from_row_major_index(index: usize, row_length: usize) -> GridCoordinate {
    GridCoordinate::new((index % row_length) as u32, (index / row_length) as u32)
}

#[derive(Debug, Clone)]
pub struct CellIter {
    row_length: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = coordinate_from_row_major_index(self.current_cell_number,
                                                        self.row_length);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

pub struct RemovedEdgesIter<'a, GridIndexType: IndexType> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    row_length: usize,
    index_type: PhantomData<GridIndexType>,
}

impl<'a, GridIndexType: IndexType> Iterator for RemovedEdgesIter<'a, GridIndexType> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        let row_length = self.row_length;
        self.graph_edge_iter.next().map(|edge| {
            (coordinate_from_row_major_index(edge.source().index(), row_length),
             coordinate_from_row_major_index(edge.target().index(), row_length))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for RemovedEdgesIter<'a, GridIndexType> {}

impl<'a, GridIndexType: IndexType> fmt::Debug for RemovedEdgesIter<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RemovedEdgesIter :: edges iter : {:?}", self.graph_edge_iter)
    }
}
