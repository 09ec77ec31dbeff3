use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use maze_solver::cells::GridCoordinate;
use maze_solver::generators;
use maze_solver::grid::Grid;
use maze_solver::pathing;
use maze_solver::units::{ColumnsCount, RowsCount};

fn large_maze() -> Grid {
    let mut g = Grid::new(RowsCount(350), ColumnsCount(350)).unwrap();
    generators::recursive_backtracker(&mut g, &mut XorShiftRng::seed_from_u64(350));
    g
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        b.iter(|| pathing::Distances::for_grid(&g, start_coord))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(250, 250);
        let distances = pathing::Distances::for_grid(&g, start_coord).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let g = large_maze();
        let start_coord = GridCoordinate::new(0, 0);
        let end_coord = GridCoordinate::new(349, 349);
        b.iter(|| pathing::shortest_path(&g, start_coord, end_coord))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_points,
    bench_shortest_path
);
criterion_main!(benches);
