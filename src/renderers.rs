use smallvec::SmallVec;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::Grid;
use crate::pathing::Path;
use crate::units::Pixels;

#[cfg(feature = "sdl")]
pub use self::window::render_maze_window;


/// Screen position in pixels, origin top left.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> ScreenPoint {
        ScreenPoint { x, y }
    }
}

pub type LineSegment = (ScreenPoint, ScreenPoint);

/// The square of screen occupied by a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellSquare {
    pub top_left: ScreenPoint,
    pub side: u32,
}

impl CellSquare {
    pub fn of(coord: GridCoordinate, cell_side: Pixels) -> CellSquare {
        let side = cell_side.0;
        CellSquare {
            top_left: ScreenPoint::new((coord.col * side) as i32, (coord.row * side) as i32),
            side,
        }
    }

    pub fn centre(&self) -> ScreenPoint {
        let half = (self.side / 2) as i32;
        ScreenPoint::new(self.top_left.x + half, self.top_left.y + half)
    }

    fn corners(&self) -> (ScreenPoint, ScreenPoint, ScreenPoint, ScreenPoint) {
        let ScreenPoint { x, y } = self.top_left;
        let side = self.side as i32;
        (ScreenPoint::new(x, y),
         ScreenPoint::new(x + side, y),
         ScreenPoint::new(x + side, y + side),
         ScreenPoint::new(x, y + side))
    }
}

/// Line segments for each wall still standing around a cell.
/// Shared walls are drawn by both cells, the overdraw is invisible.
pub fn wall_segments(grid: &Grid,
                     coord: GridCoordinate,
                     cell_side: Pixels)
                     -> SmallVec<[LineSegment; 4]> {
    let cell = match grid.cell(coord) {
        Some(cell) => cell,
        None => return SmallVec::new(),
    };
    let (nw, ne, se, sw) = CellSquare::of(coord, cell_side).corners();

    CompassPrimary::ALL.iter()
        .filter(|&&dir| cell.has_wall(dir))
        .map(|&dir| match dir {
            CompassPrimary::North => (nw, ne),
            CompassPrimary::East => (ne, se),
            CompassPrimary::South => (sw, se),
            CompassPrimary::West => (nw, sw),
        })
        .collect()
}

/// Lines joining the centres of consecutive path cells.
pub fn path_segments(path: &Path, cell_side: Pixels) -> Vec<LineSegment> {
    path.segments()
        .map(|(from, to)| {
            (CellSquare::of(from, cell_side).centre(), CellSquare::of(to, cell_side).centre())
        })
        .collect()
}


#[cfg(feature = "sdl")]
mod window {
    use log::{debug, info};
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;
    use sdl2::pixels::Color;
    use sdl2::rect::{Point, Rect};
    use sdl2::render::WindowCanvas;

    use super::{path_segments, wall_segments, CellSquare, ScreenPoint};
    use crate::config::{MazeConfig, Rgb};
    use crate::errors::{Result, ResultExt};
    use crate::grid::Grid;
    use crate::pathing::Path;
    use crate::sdl::{self, SdlSetup};

    fn colour(rgb: Rgb) -> Color {
        Color::RGB(rgb.0, rgb.1, rgb.2)
    }

    fn point(p: ScreenPoint) -> Point {
        Point::new(p.x, p.y)
    }

    /// Show the maze in a window until it is closed or Escape/Q is pressed.
    ///
    /// The bare maze is shown first, the path appears once the configured reveal delay has
    /// passed. Redraws are paced to the configured frame rate. All SDL resources are dropped on
    /// return, whichever way the loop ends.
    pub fn render_maze_window(grid: &Grid, path: Option<&Path>, config: &MazeConfig) -> Result<()> {

        config.validate_window()?;
        let SdlSetup { sdl_context, video_subsystem, mut timer_subsystem } = sdl::init()?;
        let side = config.window_size.0;
        let window = video_subsystem.window("Maze Solver", side, side)
            .position_centered()
            .build()
            .chain_err(|| "Failed to create the maze window")?;
        let mut canvas = window.into_canvas()
            .present_vsync()
            .accelerated()
            .build()
            .chain_err(|| "Failed to create the window canvas")?;
        let mut events = sdl_context.event_pump()?;
        let timer = &mut timer_subsystem;

        let frame_ms = config.frame_duration_ms();
        let shown_at = timer.ticks();
        info!("Window open, close it or press Escape or Q to quit");

        'event: loop {
            for event in events.poll_iter() {
                match event {
                    Event::Quit { .. } |
                    Event::KeyDown { keycode: Some(Keycode::Escape), .. } |
                    Event::KeyDown { keycode: Some(Keycode::Q), .. } => break 'event,
                    _ => continue,
                }
            }

            let frame_start = timer.ticks();
            let reveal_path = frame_start.wrapping_sub(shown_at) >= config.path_reveal_delay_ms;
            draw_frame(&mut canvas, grid, path.filter(|_| reveal_path), config)?;
            canvas.present();

            let frame_time = timer.ticks().wrapping_sub(frame_start);
            if frame_time < frame_ms {
                timer.delay(frame_ms - frame_time);
            }
        }

        debug!("Window closed");
        Ok(())
    }

    fn draw_frame(canvas: &mut WindowCanvas,
                  grid: &Grid,
                  path: Option<&Path>,
                  config: &MazeConfig)
                  -> Result<()> {

        let cell_side = config.cell_side_pixels();
        let palette = &config.palette;

        canvas.set_draw_color(colour(palette.background));
        canvas.clear();

        // Fill the path first so the walls stay visible on top of it.
        if let Some(path) = path {
            canvas.set_draw_color(colour(palette.path_fill));
            for &coord in path.cells() {
                let square = CellSquare::of(coord, cell_side);
                canvas.fill_rect(Rect::new(square.top_left.x,
                                           square.top_left.y,
                                           square.side,
                                           square.side))?;
            }
        }

        canvas.set_draw_color(colour(palette.walls));
        for coord in grid.iter() {
            for (from, to) in wall_segments(grid, coord, cell_side) {
                canvas.draw_line(point(from), point(to))?;
            }
        }

        if let Some(path) = path {
            canvas.set_draw_color(colour(palette.path_line));
            for (from, to) in path_segments(path, cell_side) {
                canvas.draw_line(point(from), point(to))?;
            }
        }

        Ok(())
    }
}
