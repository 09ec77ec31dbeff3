// Creates the Error, ErrorKind, ResultExt, and Result types.
// SDL reports failures as plain `String`s, which error_chain already converts into `Error`.
use crate::cells::GridCoordinate;
use error_chain::error_chain;

error_chain! {

    errors {
        InvalidGridDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("a grid needs at least one row and one column, got {} rows by {} columns",
                    rows, columns)
        }
        CoordinateOutsideGrid(coord: GridCoordinate, rows: usize, columns: usize) {
            description("coordinate outside the grid")
            display("cell {} is outside the {} by {} grid", coord, rows, columns)
        }
        WindowTooSmall(window_pixels: u32, cells_across: usize) {
            description("window too small for the grid")
            display("a {} pixel window cannot fit {} cells across", window_pixels, cells_across)
        }
    }
}
