use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wfc_core::{solve, AdjacencyRules, Catalog, Grid, SolveConfig, TileAdjacency};

fn sample_exemplar() -> Grid<char> {
    let cells: Vec<char> = (0..64)
        .map(|i| {
            let (x, y) = (i % 8, i / 8);
            match (x % 3, y % 3) {
                (0, 0) => '#',
                (1, 1) => '~',
                _ => '.',
            }
        })
        .collect();
    Grid::new(8, 8, cells)
}

fn bench_catalog_build(c: &mut Criterion) {
    let exemplar = sample_exemplar();
    c.bench_function("catalog_build_3x3", |b| {
        b.iter(|| Catalog::build(black_box(&[exemplar.clone()]), black_box(3)).unwrap())
    });
}

fn bench_adjacency_compile(c: &mut Criterion) {
    let exemplar = sample_exemplar();
    let catalog = Catalog::build(&[exemplar.clone()], 3).unwrap();
    let tile_adjacency = TileAdjacency::build(&[exemplar]);
    c.bench_function("adjacency_compile", |b| {
        b.iter(|| AdjacencyRules::compile(black_box(&catalog), black_box(&tile_adjacency), true))
    });
}

fn bench_solve_32x32(c: &mut Criterion) {
    let exemplar = sample_exemplar();
    let catalog = Catalog::build(&[exemplar.clone()], 3).unwrap();
    let tile_adjacency = TileAdjacency::build(&[exemplar]);
    let rules = AdjacencyRules::compile(&catalog, &tile_adjacency, true);
    let config = SolveConfig {
        pattern_size: 3,
        output_width: 32,
        output_height: 32,
        seed: Some(1),
        max_attempts: 1000,
        use_center_tile_filter: true,
    };

    c.bench_function("solve_32x32", |b| {
        b.iter(|| solve(black_box(&catalog), black_box(&rules), black_box(&config)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_catalog_build,
    bench_adjacency_compile,
    bench_solve_32x32
);
criterion_main!(benches);
