use county_footprint::engine::{rank, Candidate};
use county_footprint::map::{MapShapes, ProjectedMap, Viewport};
use county_footprint::{Region, RegionCatalog, RegionId, SelectionEngine};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec2;

const COLS: usize = 60;
const ROWS: usize = 50;

/// 3,000 counties on a quarter-degree grid over the central US
fn grid() -> (RegionCatalog, MapShapes) {
    let mut shapes = MapShapes::new();
    let mut regions = Vec::new();

    for row in 0..ROWS {
        for col in 0..COLS {
            let idx = row * COLS + col;
            let id = RegionId::normalize(10_000 + idx as u64).unwrap();
            let lon = -110.0 + col as f64 * 0.25;
            let lat = 30.0 + row as f64 * 0.25;
            shapes.add_county(
                id,
                vec![vec![vec![(lon, lat), (lon + 0.25, lat), (lon + 0.25, lat + 0.25), (lon, lat + 0.25), (lon, lat)]]],
            );
            regions.push(Region {
                id,
                population: 1_000 + (idx as u64 * 7919) % 50_000,
                name: format!("County {idx}"),
                parent_name: "State".to_string(),
            });
        }
    }

    (regions.into_iter().collect(), shapes)
}

fn bench_rank(c: &mut Criterion) {
    let candidates: Vec<Candidate> = (0..COLS * ROWS)
        .map(|i| Candidate {
            id: RegionId::normalize(10_000 + i as u64).unwrap(),
            centroid: DVec2::new((i % COLS) as f64, (i / COLS) as f64),
            population: 1_000,
        })
        .collect();

    c.bench_function("rank_3000", |b| {
        b.iter(|| rank(black_box(DVec2::new(30.0, 25.0)), black_box(candidates.clone())))
    });
}

fn bench_select(c: &mut Criterion) {
    let (catalog, shapes) = grid();
    let map = ProjectedMap::build(&shapes, Viewport::new(960, 600));
    let engine = SelectionEngine::new(&catalog, &map);
    let anchor = RegionId::normalize(10_000 + (ROWS / 2 * COLS + COLS / 2) as u64).unwrap();

    c.bench_function("select_nyc_target", |b| {
        b.iter(|| engine.select(black_box(&anchor), black_box(8_336_817)))
    });
}

fn bench_project(c: &mut Criterion) {
    let (_, shapes) = grid();

    c.bench_function("project_3000", |b| {
        b.iter(|| ProjectedMap::build(black_box(&shapes), Viewport::new(960, 600)))
    });
}

criterion_group!(benches, bench_rank, bench_select, bench_project);
criterion_main!(benches);
