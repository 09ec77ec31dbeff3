use log::debug;
use std::fmt;

use crate::cells::{Cell, CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::errors::{ErrorKind, Result};
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};


/// A rectangular maze grid.
///
/// Cells are stored row-major in a single vector. Passages between cells are never stored
/// explicitly, two grid-adjacent cells are connected exactly when the walls they share are both
/// down, and `remove_wall` is the only way a wall comes down.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, passages: {:?}",
               self.rows, self.columns, self.passages_count())
    }
}

impl Grid {
    /// Allocate a grid where every cell has all four walls.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {

        let (RowsCount(rows_count), ColumnsCount(columns_count)) = (rows, columns);
        let fits_coordinates = rows_count <= u32::MAX as usize &&
                               columns_count <= u32::MAX as usize;
        if rows_count == 0 || columns_count == 0 || !fits_coordinates {
            return Err(ErrorKind::InvalidGridDimensions(rows_count, columns_count).into());
        }
        let cells_count = rows_count.checked_mul(columns_count)
            .ok_or(ErrorKind::InvalidGridDimensions(rows_count, columns_count))?;

        let mut cells = Vec::with_capacity(cells_count);
        for row in 0..rows_count {
            for col in 0..columns_count {
                cells.push(Cell::new(GridCoordinate::new(row as u32, col as u32)));
            }
        }
        debug!("Allocated a {} by {} grid", rows_count, columns_count);

        Ok(Grid {
            cells,
            rows,
            columns,
        })
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Cell count and the number of passages in a perfect maze over this grid.
    pub fn spanning_tree_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (NodesCount(cells_count), EdgesCount(cells_count - 1))
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Is there a wall on the `direction` side of the cell? Cells outside the grid are solid.
    pub fn has_wall(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.cell(coord).map_or(true, |cell| cell.has_wall(direction))
    }

    /// Cells to the north, east, south or west of a cell that exist on the grid, whether or not a
    /// wall separates them.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL.iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    /// Neighbouring cells that can be walked to without crossing a wall.
    pub fn open_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        let cell = match self.cell(coord) {
            Some(cell) => cell,
            None => return CoordinateSmallVec::new(),
        };

        CompassPrimary::ALL.iter()
            .filter(|&&dir| cell.is_open(dir))
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction).filter(|&neighbour| self.is_valid_coordinate(neighbour))
    }

    /// Knock down the wall between two adjacent cells, on both sides.
    ///
    /// The cells must be exactly one north/east/south/west step apart. That is the caller's
    /// contract and is only asserted in debug builds, release builds ignore any other pair.
    pub fn remove_wall(&mut self, a: GridCoordinate, b: GridCoordinate) {
        self.set_wall_between(a, b, false);
    }

    /// Put the wall between two adjacent cells back up, on both sides.
    pub fn add_wall(&mut self, a: GridCoordinate, b: GridCoordinate) {
        self.set_wall_between(a, b, true);
    }

    fn set_wall_between(&mut self, a: GridCoordinate, b: GridCoordinate, present: bool) {
        let direction = a.direction_to(b);
        let indices = (self.grid_coordinate_to_index(a), self.grid_coordinate_to_index(b));
        debug_assert!(direction.is_some(), "{} and {} are not adjacent", a, b);
        debug_assert!(indices.0.is_some() && indices.1.is_some(),
                      "{} or {} is outside the grid", a, b);

        if let (Some(dir), (Some(a_index), Some(b_index))) = (direction, indices) {
            self.cells[a_index].set_wall(dir, present);
            self.cells[b_index].set_wall(dir.opposite(), present);
        }
    }

    /// Are the two cells neighbours with no wall between them?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        match (a.direction_to(b), self.cell(a)) {
            (Some(dir), Some(cell)) => self.is_valid_coordinate(b) && cell.is_open(dir),
            _ => false,
        }
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour| self.is_linked(coord, neighbour))
    }

    /// Restore every wall, as freshly allocated.
    pub fn close_all_walls(&mut self) {
        for cell in &mut self.cells {
            cell.close_all();
        }
    }

    /// Number of open passages, each shared wall counted once.
    pub fn passages_count(&self) -> usize {
        self.iter_passages().count()
    }

    /// Every open passage as a pair of cells, the second cell east or south of the first.
    pub fn iter_passages(&self) -> PassagesIter<'_> {
        PassagesIter {
            grid: self,
            cell_index: 0,
            directions_index: 0,
        }
    }

    /// Row-major coordinate iterator
    pub fn iter(&self) -> impl Iterator<Item = GridCoordinate> + '_ {
        self.cells.iter().map(Cell::coordinate)
    }

    /// Each row of the grid from north to south, cells listed west to east
    pub fn iter_row(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.columns.0)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.col as usize) < self.columns.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.col as usize)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct PassagesIter<'a> {
    grid: &'a Grid,
    cell_index: usize,
    directions_index: usize,
}

impl<'a> Iterator for PassagesIter<'a> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        // Only east and south sides are inspected so each passage is reported once.
        const FORWARD: [CompassPrimary; 2] = [CompassPrimary::East, CompassPrimary::South];

        while let Some(cell) = self.grid.cells.get(self.cell_index) {
            while let Some(&dir) = FORWARD.get(self.directions_index) {
                self.directions_index += 1;
                if cell.is_open(dir) {
                    if let Some(neighbour) = self.grid.neighbour_at_direction(cell.coordinate(), dir) {
                        return Some((cell.coordinate(), neighbour));
                    }
                }
            }
            self.cell_index += 1;
            self.directions_index = 0;
        }
        None
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;
    use crate::errors::ErrorKind;

    fn small_grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid grid dimensions")
    }

    fn gc(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate::new(row, col)
    }

    #[test]
    fn zero_sized_grids_are_rejected() {
        for &(rows, columns) in &[(0, 0), (0, 4), (4, 0)] {
            match Grid::new(RowsCount(rows), ColumnsCount(columns)) {
                Err(e) => match *e.kind() {
                    ErrorKind::InvalidGridDimensions(r, c) => assert_eq!((r, c), (rows, columns)),
                    ref other => panic!("unexpected error kind {:?}", other),
                },
                Ok(g) => panic!("created {:?}", g),
            }
        }
    }

    #[test]
    fn new_grid_is_fully_walled() {
        let g = small_grid(3, 4);
        assert_eq!(g.size(), 12);
        assert_eq!(g.rows(), RowsCount(3));
        assert_eq!(g.columns(), ColumnsCount(4));
        assert_eq!(g.passages_count(), 0);
        assert!(g.cells().iter().all(|cell| cell.walls_count() == 4));
        for coord in g.iter() {
            assert!(g.open_neighbours(coord).is_empty());
        }
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[GridCoordinate]| {
            let neighbours = g.neighbours(coord).iter().cloned().sorted().collect::<Vec<_>>();
            let expected = expected_neighbours.iter().cloned().sorted().collect::<Vec<_>>();
            assert_eq!(neighbours, expected);
        };

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(0, 1), gc(1, 0)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(1, 1), gc(0, 2)]);
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(2, 0), gc(1, 1)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);

        // Nothing around a coordinate that is not on the grid
        check_expected_neighbours(gc(10, 10), &[]);
    }

    #[test]
    fn neighbours_come_clockwise_from_north() {
        let g = small_grid(3, 3);
        assert_eq!(&*g.neighbours(gc(1, 1)), &[gc(0, 1), gc(1, 2), gc(2, 1), gc(1, 0)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(2, 2);
        let check_neighbour = |coord, dir: CompassPrimary, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(0, 1)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(1, 0)));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let indices: Vec<Option<usize>> = g.iter()
            .map(|coord| g.grid_coordinate_to_index(coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn cell_and_row_iteration() {
        let g = small_grid(2, 3);
        assert_eq!(g.iter().collect::<Vec<_>>(),
                   &[gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)]);

        let rows = g.iter_row()
            .map(|row| row.iter().map(Cell::coordinate).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(rows, vec![vec![gc(0, 0), gc(0, 1), gc(0, 2)],
                              vec![gc(1, 0), gc(1, 1), gc(1, 2)]]);
    }

    #[test]
    fn removing_walls_opens_both_sides() {
        let mut g = small_grid(4, 4);
        let a = gc(1, 0);
        let b = gc(1, 1);
        let c = gc(2, 1);

        assert!(!g.is_linked(a, b) && !g.is_linked(b, a));

        g.remove_wall(a, b);
        assert!(g.is_linked(a, b) && g.is_linked(b, a));
        assert!(!g.has_wall(a, CompassPrimary::East));
        assert!(!g.has_wall(b, CompassPrimary::West));
        assert!(g.has_wall(a, CompassPrimary::South));
        assert_eq!(&*g.open_neighbours(a), &[b]);
        assert_eq!(&*g.open_neighbours(b), &[a]);

        // direction is inferred whichever way round the pair is given
        g.remove_wall(c, b);
        assert!(g.is_neighbour_linked(b, CompassPrimary::South));
        assert!(g.is_neighbour_linked(c, CompassPrimary::North));
        assert_eq!(&*g.open_neighbours(b), &[c, a]);
        assert!(!g.is_linked(a, c));
        assert_eq!(g.passages_count(), 2);

        g.add_wall(a, b);
        assert!(!g.is_linked(a, b) && !g.is_linked(b, a));
        assert_eq!(&*g.open_neighbours(b), &[c]);
        assert_eq!(g.passages_count(), 1);
    }

    #[test]
    fn repeated_removal_is_harmless() {
        let mut g = small_grid(2, 2);
        g.remove_wall(gc(0, 0), gc(0, 1));
        g.remove_wall(gc(0, 1), gc(0, 0));
        assert_eq!(g.passages_count(), 1);
        assert_eq!(g.iter_passages().collect::<Vec<_>>(), vec![(gc(0, 0), gc(0, 1))]);
    }

    #[test]
    fn passages_are_reported_once() {
        let mut g = small_grid(2, 2);
        g.remove_wall(gc(0, 0), gc(0, 1));
        g.remove_wall(gc(0, 1), gc(1, 1));
        g.remove_wall(gc(1, 1), gc(1, 0));
        let passages = g.iter_passages().collect::<Vec<_>>();
        assert_eq!(passages,
                   vec![(gc(0, 0), gc(0, 1)), (gc(0, 1), gc(1, 1)), (gc(1, 0), gc(1, 1))]);
        assert_eq!(g.spanning_tree_size(), (NodesCount(4), EdgesCount(3)));
    }

    #[test]
    fn closing_all_walls_resets_the_grid() {
        let mut g = small_grid(3, 3);
        let fresh = g.clone();
        g.remove_wall(gc(0, 0), gc(1, 0));
        g.remove_wall(gc(2, 2), gc(2, 1));
        assert_ne!(g, fresh);

        g.close_all_walls();
        assert_eq!(g, fresh);
    }

    #[test]
    fn outside_coordinates_are_solid() {
        let g = small_grid(2, 2);
        assert!(g.cell(gc(2, 0)).is_none());
        assert!(g.has_wall(gc(5, 5), CompassPrimary::North));
        assert!(g.open_neighbours(gc(5, 5)).is_empty());
        assert!(!g.is_linked(gc(1, 1), gc(1, 2)));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn removing_a_wall_between_distant_cells_asserts() {
        let mut g = small_grid(3, 3);
        g.remove_wall(gc(0, 0), gc(2, 2));
    }
}
