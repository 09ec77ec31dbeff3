use crate::cells::GridCoordinate;
use crate::errors::{ErrorKind, Result};
use crate::units::{ColumnsCount, Pixels, RowsCount};


#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const RED: Rgb = Rgb(0xff, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 0xff, 0);
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Palette {
    pub walls: Rgb,
    pub path_fill: Rgb,
    pub path_line: Rgb,
    pub background: Rgb,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            walls: Rgb::WHITE,
            path_fill: Rgb::GREEN,
            path_line: Rgb::RED,
            background: Rgb::BLACK,
        }
    }
}

/// Everything a run of the maze solver needs to know up front.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct MazeConfig {
    pub rows: RowsCount,
    pub columns: ColumnsCount,
    /// Side length of the square window.
    pub window_size: Pixels,
    pub start: GridCoordinate,
    pub end: GridCoordinate,
    pub palette: Palette,
    /// Generator seed, a fresh random seed is used when None.
    pub seed: Option<u64>,
    pub frames_per_second: u32,
    /// How long the bare maze is on screen before the path is drawn over it.
    pub path_reveal_delay_ms: u32,
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig::for_grid(RowsCount(20), ColumnsCount(20))
    }
}

impl MazeConfig {
    /// Defaults for a grid of the given size, solving from the top left corner to the bottom
    /// right corner.
    pub fn for_grid(rows: RowsCount, columns: ColumnsCount) -> MazeConfig {
        let last_row = rows.0.saturating_sub(1) as u32;
        let last_column = columns.0.saturating_sub(1) as u32;
        MazeConfig {
            rows,
            columns,
            window_size: Pixels(600),
            start: GridCoordinate::origin(),
            end: GridCoordinate::new(last_row, last_column),
            palette: Palette::default(),
            seed: None,
            frames_per_second: 60,
            path_reveal_delay_ms: 5000,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        if rows == 0 || columns == 0 || rows > u32::MAX as usize || columns > u32::MAX as usize {
            return Err(ErrorKind::InvalidGridDimensions(rows, columns).into());
        }

        for &coord in &[self.start, self.end] {
            if coord.row as usize >= rows || coord.col as usize >= columns {
                return Err(ErrorKind::CoordinateOutsideGrid(coord, rows, columns).into());
            }
        }
        Ok(())
    }

    /// `validate` plus a check that every cell gets at least one pixel of the window.
    /// Only needed when the maze is going to be drawn in a window.
    pub fn validate_window(&self) -> Result<()> {
        self.validate()?;
        if self.cell_side_pixels().0 == 0 {
            let cells_across = self.rows.0.max(self.columns.0);
            return Err(ErrorKind::WindowTooSmall(self.window_size.0, cells_across).into());
        }
        Ok(())
    }

    /// Side length of one cell square, so the whole grid fits the window.
    pub fn cell_side_pixels(&self) -> Pixels {
        let cells_across = self.rows.0.max(self.columns.0).max(1);
        Pixels((self.window_size.0 as usize / cells_across) as u32)
    }

    /// Milliseconds per frame, at least one.
    pub fn frame_duration_ms(&self) -> u32 {
        (1000 / self.frames_per_second.max(1)).max(1)
    }
}
