use docopt::Docopt;
use log::{info, warn};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use maze_solver::{
    cells::GridCoordinate,
    config::MazeConfig,
    errors::*,
    generators,
    grid::Grid,
    grid_displays::{PathDisplay, StartEndPointsDisplay},
    pathing::{self, Path},
    units::{ColumnsCount, Pixels, RowsCount},
};

const USAGE: &str = "Maze Solver

Generates a perfect maze and shows the shortest path between two cells.

Usage:
    maze_solver -h | --help
    maze_solver [options]
    maze_solver text [options]
    maze_solver window [options]

Options:
    -h --help               Show this screen.
    --rows=<n>              Number of rows in the grid [default: 20].
    --columns=<n>           Number of columns in the grid [default: 20].
    --seed=<n>              Seed for the maze generator. A random seed is chosen and logged if not given.
    --start-row=<r>         Row of the path start cell [default: 0].
    --start-column=<c>      Column of the path start cell [default: 0].
    --end-row=<r>           Row of the path end cell. Defaults to the bottom row.
    --end-column=<c>        Column of the path end cell. Defaults to the right most column.
    --show-distances        Text output shows the distance (hex) from the start to every cell instead of the path.
    --window-size=<px>      Side length of the square window in pixels [default: 600].
    --frame-rate=<fps>      Window redraws per second [default: 60].
    --reveal-delay=<ms>     Milliseconds the bare maze is shown before the path appears [default: 5000].
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_window: bool,
    flag_rows: usize,
    flag_columns: usize,
    flag_seed: Option<u64>,
    flag_start_row: u32,
    flag_start_column: u32,
    flag_end_row: Option<u32>,
    flag_end_column: Option<u32>,
    flag_show_distances: bool,
    flag_window_size: u32,
    flag_frame_rate: u32,
    flag_reveal_delay: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if let Err(ref e) = run(&args) {
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run(args: &MazeArgs) -> Result<()> {

    let config = maze_config(args);
    config.validate().chain_err(|| "Invalid maze options")?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Generating a {} by {} maze with seed {}", config.rows.0, config.columns.0, seed);

    let mut maze_grid = Grid::new(config.rows, config.columns)?;
    let mut rng = XorShiftRng::seed_from_u64(seed);
    generators::recursive_backtracker(&mut maze_grid, &mut rng);

    let path = pathing::shortest_path(&maze_grid, config.start, config.end);
    match path {
        Some(ref p) => info!("Path from {} to {} takes {} steps", p.start(), p.end(), p.edge_count()),
        None => warn!("There is no path from {} to {}", config.start, config.end),
    }

    if args.cmd_window {
        show_window(&maze_grid, path.as_ref(), &config)
    } else {
        print_text(&maze_grid, path.as_ref(), &config, args.flag_show_distances);
        Ok(())
    }
}

fn maze_config(args: &MazeArgs) -> MazeConfig {
    let (rows, columns) = (RowsCount(args.flag_rows), ColumnsCount(args.flag_columns));
    let defaults = MazeConfig::for_grid(rows, columns);

    MazeConfig {
        window_size: Pixels(args.flag_window_size),
        start: GridCoordinate::new(args.flag_start_row, args.flag_start_column),
        end: GridCoordinate::new(args.flag_end_row.unwrap_or(defaults.end.row),
                                 args.flag_end_column.unwrap_or(defaults.end.col)),
        seed: args.flag_seed,
        frames_per_second: args.flag_frame_rate,
        path_reveal_delay_ms: args.flag_reveal_delay,
        ..defaults
    }
}

fn print_text(maze_grid: &Grid, path: Option<&Path>, config: &MazeConfig, show_distances: bool) {
    let distances = if show_distances {
        pathing::Distances::for_grid(maze_grid, config.start)
    } else {
        None
    };

    let text = match (distances, path) {
        (Some(ref distances), _) => maze_grid.display_with(distances).to_string(),
        (None, Some(path)) => maze_grid.display_with(&PathDisplay::new(path)).to_string(),
        (None, None) => {
            // No route, mark where it should have gone.
            let start_end = StartEndPointsDisplay::new(config.start, config.end);
            maze_grid.display_with(&start_end).to_string()
        }
    };
    println!("{}", text);
}

#[cfg(feature = "sdl")]
fn show_window(maze_grid: &Grid, path: Option<&Path>, config: &MazeConfig) -> Result<()> {
    maze_solver::renderers::render_maze_window(maze_grid, path, config)
        .chain_err(|| "Failed to show the maze window")
}

#[cfg(not(feature = "sdl"))]
fn show_window(_: &Grid, _: Option<&Path>, _: &MazeConfig) -> Result<()> {
    Err("this build has no window support, rebuild with `--features sdl`".into())
}
