use smallvec::SmallVec;
use std::fmt;

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// A (row, column) position on a rectangular grid, 0-indexed from the top left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub col: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate { row, col }
    }

    #[inline]
    pub fn origin() -> GridCoordinate {
        GridCoordinate::new(0, 0)
    }

    /// The coordinate one step away in `direction`.
    /// Returns None when that would leave the non negative quadrant; the upper grid bounds
    /// are the grid's business.
    pub fn offset(self, direction: CompassPrimary) -> Option<GridCoordinate> {
        let GridCoordinate { row, col } = self;
        match direction {
            CompassPrimary::North => row.checked_sub(1).map(|r| GridCoordinate::new(r, col)),
            CompassPrimary::East => col.checked_add(1).map(|c| GridCoordinate::new(row, c)),
            CompassPrimary::South => row.checked_add(1).map(|r| GridCoordinate::new(r, col)),
            CompassPrimary::West => col.checked_sub(1).map(|c| GridCoordinate::new(row, c)),
        }
    }

    /// Which way to step from `self` to reach `other`, if they are exactly one cardinal step apart.
    pub fn direction_to(self, other: GridCoordinate) -> Option<CompassPrimary> {
        let row_delta = i64::from(other.row) - i64::from(self.row);
        let col_delta = i64::from(other.col) - i64::from(self.col);
        match (row_delta, col_delta) {
            (-1, 0) => Some(CompassPrimary::North),
            (0, 1) => Some(CompassPrimary::East),
            (1, 0) => Some(CompassPrimary::South),
            (0, -1) => Some(CompassPrimary::West),
            _ => None,
        }
    }

    #[inline]
    pub fn is_adjacent(self, other: GridCoordinate) -> bool {
        self.direction_to(other).is_some()
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_col_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_col_pair.0, row_col_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    /// Clockwise from north. Neighbour queries report cells in this order.
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

    #[inline]
    fn wall_index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::East => 1,
            CompassPrimary::South => 2,
            CompassPrimary::West => 3,
        }
    }
}

/// One square of the maze and its four boundary walls.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Cell {
    coordinate: GridCoordinate,
    walls: [bool; 4],
}

impl Cell {
    /// A cell closed off on all four sides.
    pub fn new(coordinate: GridCoordinate) -> Cell {
        Cell {
            coordinate,
            walls: [true; 4],
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    #[inline]
    pub fn has_wall(&self, direction: CompassPrimary) -> bool {
        self.walls[direction.wall_index()]
    }

    #[inline]
    pub fn is_open(&self, direction: CompassPrimary) -> bool {
        !self.has_wall(direction)
    }

    /// Wall flags in north, east, south, west order.
    #[inline]
    pub fn walls(&self) -> [bool; 4] {
        self.walls
    }

    pub fn walls_count(&self) -> usize {
        self.walls.iter().filter(|&&wall| wall).count()
    }

    // Only the grid may touch a single side, the opposite side must change with it.
    #[inline]
    pub(crate) fn set_wall(&mut self, direction: CompassPrimary, present: bool) {
        self.walls[direction.wall_index()] = present;
    }

    #[inline]
    pub(crate) fn close_all(&mut self) {
        self.walls = [true; 4];
    }
}
