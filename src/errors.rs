// Create the Error, ErrorKind, ResultExt, and Result types for the library.
// Result is a typedef of std `Result` with the error type our own `Error`.
use error_chain::error_chain;

use crate::cells::GridCoordinate;

error_chain! {

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: width and height must both be positive",
                    width, height)
        }

        GridTooLarge(cells: usize, max_cells: usize) {
            description("grid too large for its index type")
            display("a grid of {} cells cannot be indexed, the maximum is {}", cells, max_cells)
        }

        InvalidGridCoordinate(coord: GridCoordinate) {
            description("grid coordinate outside of the grid")
            display("grid coordinate {} is outside of the grid", coord)
        }

        SelfLink(coord: GridCoordinate) {
            description("cannot remove the wall between a cell and itself")
            display("cannot remove the wall between {} and itself", coord)
        }

        NotNeighbours(a: GridCoordinate, b: GridCoordinate) {
            description("cells are not geometric neighbours")
            display("cells {} and {} are not geometric neighbours", a, b)
        }

        TooManyEdges(a: GridCoordinate, b: GridCoordinate, max_edges: usize) {
            description("too many removed walls for the grid's index type")
            display("cannot remove the wall between {} and {}, the grid can hold at most {} \
                     removed walls", a, b, max_edges)
        }

        AlreadyGenerated {
            description("maze already generated")
            display("the maze has already been generated, create a new generator for a new maze")
        }
    }
}
