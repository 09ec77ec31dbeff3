use bit_set::BitSet;
use log::debug;
use rand::Rng;

use crate::cells::GridCoordinate;
use crate::grid::Grid;


/// Uniform random choice, the only source of variety in a generated maze.
///
/// Anything implementing `rand::Rng` is a `RandomSource`, so a seeded `XorShiftRng` makes
/// generation reproducible. Tests can also script the choices directly.
pub trait RandomSource {
    /// A uniformly chosen index in `0..upper`. `upper` is never zero.
    fn choose_index(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn choose_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// What happened during one generation run.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub passages_carved: usize,
    pub backtracks: usize,
    pub max_stack_depth: usize,
}

/// Apply the recursive backtracker maze generation algorithm to the grid, starting in the
/// top left (north west) corner.
///
/// A random walk that never steps onto a visited cell. Whenever the walk is boxed in it
/// backs up along its own trail until it finds a cell with an unvisited neighbour, and carries
/// on from there. Every cell gets visited, every step onto a new cell carves exactly one
/// passage, so the result is a spanning tree over the grid: a perfect maze. Passages tend to
/// be long and winding with few dead ends.
///
/// The trail is an explicit stack rather than the call stack, so large grids are fine.
/// Any existing passages are walled up first.
pub fn recursive_backtracker<R>(grid: &mut Grid, rng: &mut R) -> GenerationReport
    where R: RandomSource + ?Sized
{
    recursive_backtracker_from(grid, GridCoordinate::origin(), rng)
}

/// Recursive backtracker starting the walk at `origin`.
/// An origin that is not on the grid falls back to the top left corner.
pub fn recursive_backtracker_from<R>(grid: &mut Grid,
                                     origin: GridCoordinate,
                                     rng: &mut R)
                                     -> GenerationReport
    where R: RandomSource + ?Sized
{
    grid.close_all_walls();

    let origin = if grid.is_valid_coordinate(origin) {
        origin
    } else {
        debug!("Origin {} is off the grid, starting from the top left", origin);
        GridCoordinate::origin()
    };

    let mut report = GenerationReport::default();
    let mut visited = BitSet::with_capacity(grid.size());
    let mut stack: Vec<GridCoordinate> = Vec::new();

    let mut current = origin;
    mark_visited(grid, &mut visited, current);

    loop {
        let mut unvisited_neighbours = grid.neighbours(current);
        unvisited_neighbours.retain(|coord| !is_visited(grid, &visited, *coord));

        if !unvisited_neighbours.is_empty() {
            let next = unvisited_neighbours[rng.choose_index(unvisited_neighbours.len())];
            stack.push(current);
            report.max_stack_depth = report.max_stack_depth.max(stack.len());

            grid.remove_wall(current, next);
            report.passages_carved += 1;

            mark_visited(grid, &mut visited, next);
            current = next;
        } else if let Some(previous) = stack.pop() {
            current = previous;
            report.backtracks += 1;
        } else {
            break;
        }
    }

    debug!("Recursive backtracker from {}: {:?}", origin, report);
    report
}

fn mark_visited(grid: &Grid, visited: &mut BitSet, coord: GridCoordinate) {
    if let Some(index) = grid.grid_coordinate_to_index(coord) {
        visited.insert(index);
    }
}

fn is_visited(grid: &Grid, visited: &BitSet, coord: GridCoordinate) -> bool {
    grid.grid_coordinate_to_index(coord).map_or(true, |index| visited.contains(index))
}


#[cfg(test)]
mod tests {

    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::cells::CompassPrimary;
    use crate::pathing::Distances;
    use crate::units::{ColumnsCount, RowsCount};

    /// Always takes the first candidate, i.e. the first unvisited neighbour clockwise from north.
    struct FirstChoice;
    impl RandomSource for FirstChoice {
        fn choose_index(&mut self, _: usize) -> usize {
            0
        }
    }

    fn grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RowsCount(rows), ColumnsCount(columns)).expect("valid grid dimensions")
    }

    fn gc(row: u32, col: u32) -> GridCoordinate {
        GridCoordinate::new(row, col)
    }

    fn is_perfect_maze(g: &Grid) -> bool {
        let connected = Distances::for_grid(g, GridCoordinate::origin())
            .map_or(false, |distances| distances.reachable_count() == g.size());
        connected && g.passages_count() == g.size() - 1
    }

    fn has_symmetric_walls(g: &Grid) -> bool {
        g.iter().all(|coord| {
            CompassPrimary::ALL.iter().all(|&dir| {
                g.neighbour_at_direction(coord, dir)
                    .map_or(true, |n| g.has_wall(coord, dir) == g.has_wall(n, dir.opposite()))
            })
        })
    }

    fn has_solid_boundary(g: &Grid) -> bool {
        g.iter().all(|coord| {
            CompassPrimary::ALL.iter().all(|&dir| {
                g.neighbour_at_direction(coord, dir).is_some() || g.has_wall(coord, dir)
            })
        })
    }

    #[test]
    fn scripted_choices_carve_a_known_maze() {
        let mut g = grid(2, 2);
        let report = recursive_backtracker(&mut g, &mut FirstChoice);

        // east from the origin, south, then west, then backtrack all the way home
        assert!(g.is_linked(gc(0, 0), gc(0, 1)));
        assert!(g.is_linked(gc(0, 1), gc(1, 1)));
        assert!(g.is_linked(gc(1, 1), gc(1, 0)));
        assert!(!g.is_linked(gc(0, 0), gc(1, 0)));
        assert_eq!(report,
                   GenerationReport {
                       passages_carved: 3,
                       backtracks: 3,
                       max_stack_depth: 3,
                   });
    }

    #[test]
    fn single_cell_grid_has_nothing_to_carve() {
        let mut g = grid(1, 1);
        let mut rng = XorShiftRng::seed_from_u64(7);
        let report = recursive_backtracker(&mut g, &mut rng);
        assert_eq!(report, GenerationReport::default());
        assert_eq!(g.passages_count(), 0);
        assert_eq!(g.cells()[0].walls_count(), 4);
    }

    #[test]
    fn corridor_grids_are_straight_lines() {
        let mut g = grid(1, 6);
        let mut rng = XorShiftRng::seed_from_u64(11);
        recursive_backtracker(&mut g, &mut rng);
        for col in 0..5 {
            assert!(g.is_linked(gc(0, col), gc(0, col + 1)));
        }
    }

    #[test]
    fn every_cell_is_carved_into_a_spanning_tree() {
        let mut g = grid(20, 20);
        let mut rng = XorShiftRng::seed_from_u64(0x5eed);
        let report = recursive_backtracker(&mut g, &mut rng);
        assert_eq!(report.passages_carved, 399);
        assert_eq!(report.backtracks, 399);
        assert!(is_perfect_maze(&g));
        assert!(has_symmetric_walls(&g));
        assert!(has_solid_boundary(&g));
    }

    #[test]
    fn same_seed_same_maze() {
        let mut first = grid(12, 9);
        let mut second = grid(12, 9);
        recursive_backtracker(&mut first, &mut XorShiftRng::seed_from_u64(42));
        recursive_backtracker(&mut second, &mut XorShiftRng::seed_from_u64(42));
        assert_eq!(first, second);
        assert_eq!(first.cells(), second.cells());
    }

    #[test]
    fn regenerating_an_existing_maze_stays_perfect() {
        let mut g = grid(8, 8);
        let mut rng = XorShiftRng::seed_from_u64(3);
        recursive_backtracker(&mut g, &mut rng);
        let first = g.clone();
        recursive_backtracker(&mut g, &mut rng);
        assert!(is_perfect_maze(&g));
        assert_ne!(first, g);
    }

    #[test]
    fn other_origins_also_span_the_grid() {
        let mut g = grid(5, 7);
        let mut rng = XorShiftRng::seed_from_u64(99);
        recursive_backtracker_from(&mut g, gc(4, 6), &mut rng);
        assert!(is_perfect_maze(&g));

        // off grid origins fall back to the corner
        let mut a = grid(5, 7);
        let mut b = grid(5, 7);
        recursive_backtracker_from(&mut a, gc(50, 50), &mut FirstChoice);
        recursive_backtracker(&mut b, &mut FirstChoice);
        assert_eq!(a, b);
    }

    #[test]
    fn generated_mazes_are_perfect_for_any_seed_and_size() {
        fn prop(seed: u64, rows: u8, columns: u8) -> TestResult {
            let (rows, columns) = (rows as usize % 16 + 1, columns as usize % 16 + 1);
            let mut g = grid(rows, columns);
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let report = recursive_backtracker(&mut g, &mut rng);

            TestResult::from_bool(is_perfect_maze(&g) && has_symmetric_walls(&g) &&
                                  has_solid_boundary(&g) &&
                                  report.passages_carved == rows * columns - 1)
        }
        quickcheck(prop as fn(u64, u8, u8) -> TestResult);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        fn prop(seed: u64) -> bool {
            let mut first = grid(6, 6);
            let mut second = grid(6, 6);
            recursive_backtracker(&mut first, &mut XorShiftRng::seed_from_u64(seed));
            recursive_backtracker(&mut second, &mut XorShiftRng::seed_from_u64(seed));
            first == second
        }
        quickcheck(prop as fn(u64) -> bool);
    }
}
