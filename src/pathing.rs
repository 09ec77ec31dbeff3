use fnv::FnvHashMap;
use itertools::Itertools;
use log::{debug, warn};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::cells::GridCoordinate;
use crate::grid::Grid;

/// Construct a hash map with the specified capacity. Fnv is much faster than the default hasher
/// on short keys such as grid coordinates.
fn fnv_hashmap<K, V>(capacity: usize) -> FnvHashMap<K, V> {
    FnvHashMap::with_capacity_and_hasher(capacity, Default::default())
}


/// A route through the maze, from its start cell to its end cell inclusive.
/// Consecutive cells are neighbours with no wall between them. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    cells: Vec<GridCoordinate>,
}

impl Path {
    #[inline]
    pub fn cells(&self) -> &[GridCoordinate] {
        &self.cells
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.cells[0]
    }

    #[inline]
    pub fn end(&self) -> GridCoordinate {
        self.cells[self.cells.len() - 1]
    }

    /// Number of cells on the path, both ends included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of steps from start to end.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.cells.len() - 1
    }

    pub fn contains(&self, coord: GridCoordinate) -> bool {
        self.cells.contains(&coord)
    }

    /// Each step of the path as a (from, to) pair.
    pub fn segments(&self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + '_ {
        self.cells.iter().cloned().tuple_windows()
    }
}

/// Shortest route between two cells through open passages, found breadth first.
///
/// The search stops as soon as `end` comes off the frontier. Returns None when `end` cannot be
/// reached from `start`, which in a perfect maze only happens for coordinates off the grid.
pub fn shortest_path(grid: &Grid,
                     start: GridCoordinate,
                     end: GridCoordinate)
                     -> Option<Path> {

    if !grid.is_valid_coordinate(start) || !grid.is_valid_coordinate(end) {
        warn!("No path from {} to {}, a coordinate is off the grid", start, end);
        return None;
    }

    // The parents map doubles as the visited set, start is the only cell without a parent.
    let mut parents: FnvHashMap<GridCoordinate, Option<GridCoordinate>> = fnv_hashmap(grid.size());
    parents.insert(start, None);
    let mut frontier = VecDeque::new();
    frontier.push_back(start);

    while let Some(current) = frontier.pop_front() {
        if current == end {
            break;
        }

        for neighbour in grid.open_neighbours(current) {
            if !parents.contains_key(&neighbour) {
                parents.insert(neighbour, Some(current));
                frontier.push_back(neighbour);
            }
        }
    }

    if !parents.contains_key(&end) {
        warn!("No path from {} to {}", start, end);
        return None;
    }

    let mut cells = vec![end];
    let mut current = end;
    while let Some(&Some(parent)) = parents.get(&current) {
        cells.push(parent);
        current = parent;
    }
    cells.reverse();

    debug!("Shortest path from {} to {} is {} steps", start, end, cells.len() - 1);
    Some(Path { cells })
}


/// Step counts from one start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill outwards from `start_coordinate`. Returns None if the start is not on the grid.
    pub fn for_grid(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every link is one step, so the first time a cell is reached is by a shortest route
        // and its distance never changes afterwards. The map is also the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {
                let distance_to_cell = distances[cell_coord];
                max = max.max(distance_to_cell);

                for link_coordinate in grid.open_neighbours(*cell_coord) {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// How many cells can be reached from the start, the start included.
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    /// The cells at the maximum distance, sorted.
    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}
