use fnv::FnvHashSet;
use std::fmt;

use crate::cells::{CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::graph::{Graph, IndexType};

/// Decides what is drawn inside each cell of a text rendered maze.
pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {

        let contains_coordinate =
            |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")

        } else if contains_coordinate(&self.end_coordinates) {

            String::from(" E ")

        } else {
            String::from("   ")
        }
    }
}

/// Several overlays drawn together, the first layer with something to show for a cell wins.
pub struct LayeredDisplay<'a> {
    layers: Vec<&'a dyn GridDisplay>,
}
impl<'a> LayeredDisplay<'a> {
    pub fn new(layers: Vec<&'a dyn GridDisplay>) -> LayeredDisplay<'a> {
        LayeredDisplay { layers }
    }
}
impl<'a> GridDisplay for LayeredDisplay<'a> {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        self.layers
            .iter()
            .map(|layer| layer.render_cell_body(coord))
            .find(|body| !body.trim().is_empty())
            .unwrap_or_else(|| String::from("   "))
    }
}

/// A maze with an optional overlay, ready for `{}` formatting.
pub struct MazeDisplay<'a, GridIndexType: IndexType> {
    graph: &'a Graph<GridIndexType>,
    overlay: Option<&'a dyn GridDisplay>,
}

impl<'a, GridIndexType: IndexType> MazeDisplay<'a, GridIndexType> {
    pub fn new(graph: &'a Graph<GridIndexType>,
               overlay: Option<&'a dyn GridDisplay>)
               -> MazeDisplay<'a, GridIndexType> {
        MazeDisplay { graph, overlay }
    }

    fn cell_body(&self, coord: GridCoordinate) -> String {
        match self.overlay {
            Some(displayer) => displayer.render_cell_body(coord),
            None => String::from("   "),
        }
    }
}

impl<GridIndexType: IndexType> fmt::Display for Graph<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&MazeDisplay::new(self, None), f)
    }
}

impl<'a, GridIndexType: IndexType> fmt::Display for MazeDisplay<'a, GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let grid = self.graph;
        let columns_count = grid.width().0;
        let rows_count = grid.height().0;
        let cell_at = |x: usize, y: usize| GridCoordinate::new(x as u32, y as u32);

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for x in 0..columns_count {
            output.push_str(WALL_LR_3);
            let is_east_open = grid.is_neighbour_linked(cell_at(x, 0), CompassPrimary::East);
            if is_east_open {
                output.push_str(WALL_LR);
            } else if x == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for y in 0..rows_count {

            let is_last_row = y == rows_count - 1;

            // The west most boundary of the row. The top section of each cell was drawn by the
            // previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for x in 0..columns_count {

                let cell_coord = cell_at(x, y);
                let is_first_column = x == 0;
                let is_last_column = x == columns_count - 1;
                let east_open = grid.is_neighbour_linked(cell_coord, CompassPrimary::East);
                let south_open = grid.is_neighbour_linked(cell_coord, CompassPrimary::South);

                // Each cell uses the southern wall of the cell above it as its own northern
                // wall, so only the body, the eastern boundary and the southern boundary
                // (minus the south west corner) are drawn here.
                row_middle_section_render.push_str(&self.cell_body(cell_coord));
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                if is_first_column {
                    row_bottom_section_render = if is_last_row {
                        String::from(WALL_RU)
                    } else if south_open {
                        String::from(WALL_UD)
                    } else {
                        String::from(WALL_RUD)
                    };
                }
                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east =
                            grid.neighbour_at_direction(cell_coord, CompassPrimary::East)
                                .map_or(false,
                                        |c| grid.is_neighbour_linked(c, CompassPrimary::South));
                        let access_se_from_south =
                            grid.neighbour_at_direction(cell_coord, CompassPrimary::South)
                                .map_or(false,
                                        |c| grid.is_neighbour_linked(c, CompassPrimary::East));
                        let show_right_section = !access_se_from_east;
                        let show_down_section = !access_se_from_south;
                        let show_up_section = !east_open;
                        let show_left_section = !south_open;

                        match (show_left_section,
                               show_right_section,
                               show_up_section,
                               show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            _ => " ",
                        }
                    }
                };

                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::graph::SmallGraph;
    use crate::units::{Height, Width};
    use smallvec::smallvec;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn walled_grid() {
        let g = SmallGraph::new(Width(2), Height(1)).unwrap();
        assert_eq!(format!("{}", g), "┌───┬───┐\n│   │   │\n└───┴───┘\n");
    }

    #[test]
    fn open_passage() {
        let mut g = SmallGraph::new(Width(2), Height(1)).unwrap();
        g.remove_edge(gc(0, 0), gc(1, 0)).unwrap();
        assert_eq!(format!("{}", g), "┌───────┐\n│       │\n└───────┘\n");
    }

    #[test]
    fn vertical_passage() {
        let mut g = SmallGraph::new(Width(1), Height(2)).unwrap();
        g.remove_edge(gc(0, 0), gc(0, 1)).unwrap();
        assert_eq!(format!("{}", g), "┌───┐\n│   │\n│   │\n│   │\n└───┘\n");
    }

    #[test]
    fn path_overlay() {
        let mut g = SmallGraph::new(Width(2), Height(1)).unwrap();
        g.remove_edge(gc(0, 0), gc(1, 0)).unwrap();
        let path = PathDisplay::new(&[gc(1, 0)]);
        assert_eq!(format!("{}", MazeDisplay::new(&g, Some(&path))),
                   "┌───────┐\n│     . │\n└───────┘\n");
    }

    #[test]
    fn start_end_overlay() {
        let display = StartEndPointsDisplay::new(smallvec![gc(0, 0)], smallvec![gc(1, 1)]);
        assert_eq!(display.render_cell_body(gc(0, 0)), " S ");
        assert_eq!(display.render_cell_body(gc(1, 1)), " E ");
        assert_eq!(display.render_cell_body(gc(1, 0)), "   ");
    }

    #[test]
    fn layered_overlay_keeps_start_end_over_path() {
        let start_end = StartEndPointsDisplay::new(smallvec![gc(0, 0)], smallvec![gc(2, 0)]);
        let path = PathDisplay::new(&[gc(0, 0), gc(1, 0), gc(2, 0)]);
        let layers = LayeredDisplay::new(vec![&start_end as &dyn GridDisplay, &path]);
        assert_eq!(layers.render_cell_body(gc(0, 0)), " S ");
        assert_eq!(layers.render_cell_body(gc(1, 0)), " . ");
        assert_eq!(layers.render_cell_body(gc(2, 0)), " E ");
        assert_eq!(layers.render_cell_body(gc(1, 1)), "   ");

        let mut g = SmallGraph::new(Width(3), Height(1)).unwrap();
        g.remove_edge(gc(0, 0), gc(1, 0)).unwrap();
        g.remove_edge(gc(1, 0), gc(2, 0)).unwrap();
        assert_eq!(format!("{}", MazeDisplay::new(&g, Some(&layers))),
                   "┌───────────┐\n│ S   .   E │\n└───────────┘\n");
    }
}
