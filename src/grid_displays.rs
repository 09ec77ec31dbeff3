use fnv::FnvHashSet;
use std::fmt;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Grid;
use crate::pathing::{Distances, Path};
use crate::units::{ColumnsCount, RowsCount};


pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

/// Marks every cell on a path, with the start and end called out.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
    start: GridCoordinate,
    end: GridCoordinate,
}
impl PathDisplay {
    pub fn new(path: &Path) -> Self {
        PathDisplay {
            on_path_coordinates: path.cells().iter().cloned().collect(),
            start: path.start(),
            end: path.end(),
        }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Marks only the start and end cells, used when there is no path between them.
#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start: GridCoordinate,
    end: GridCoordinate,
}
impl StartEndPointsDisplay {
    pub fn new(start: GridCoordinate, end: GridCoordinate) -> StartEndPointsDisplay {
        StartEndPointsDisplay { start, end }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.start {
            String::from(" S ")
        } else if coord == self.end {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

/// Text rendering of a grid with an overlay filling the cell bodies.
pub struct GridWithDisplay<'a> {
    grid: &'a Grid,
    display: &'a dyn GridDisplay,
}

impl Grid {
    pub fn display_with<'a>(&'a self, display: &'a dyn GridDisplay) -> GridWithDisplay<'a> {
        GridWithDisplay {
            grid: self,
            display,
        }
    }
}

struct EmptyCells;
impl GridDisplay for EmptyCells {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_with(&EmptyCells))
    }
}

impl<'a> fmt::Display for GridWithDisplay<'a> {
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

        let grid = self.grid;
        let ColumnsCount(columns_count) = grid.columns();
        let RowsCount(rows_count) = grid.rows();

        // Start by special case rendering the text for the north most boundary
        let mut output = String::from(WALL_RD);
        for col in 0..columns_count {
            let coord = GridCoordinate::new(0, col as u32);
            output.push_str(WALL_LR_3);
            if grid.is_neighbour_linked(coord, CompassPrimary::East) {
                output.push_str(WALL_LR);
            } else if col == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for (index_row, row) in grid.iter_row().enumerate() {

            let is_last_row = index_row == rows_count - 1;

            // Starts off by special case rendering the west most boundary of the row.
            // The top section of the cell is done by the previous row.
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell) in row.iter().enumerate() {

                let cell_coord = cell.coordinate();
                let is_first_column = index_column == 0;
                let is_last_column = index_column == columns_count - 1;
                let east_open = grid.is_neighbour_linked(cell_coord, CompassPrimary::East);
                let south_open = grid.is_neighbour_linked(cell_coord, CompassPrimary::South);

                // Each cell uses the southern wall of the cell above as its own northern wall,
                // so only the body, the eastern boundary and the southern boundary are drawn here.
                row_middle_section_render.push_str(&self.display.render_cell_body(cell_coord));
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
