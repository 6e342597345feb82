//! Benchmarks for CC4 surface evaluation and contour extraction.
//!
//! Run:
//! - cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use policy_surface::core::contour::{default_levels, iso_lines};
use policy_surface::core::grid::Mesh;
use policy_surface::core::surface::{C4Limits, Surface};

const GRID_STEPS: [f64; 3] = [0.05, 0.02, 0.01];
const CC3: f64 = 4.8;

fn bench_surface_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_compute");
    group.sample_size(20);

    for &step in &GRID_STEPS {
        let mesh = Mesh::square(3.6, 8.0, 0.2, step);
        let id = BenchmarkId::new("step", format!("{step}"));
        group.bench_with_input(id, &mesh, |b, mesh| {
            b.iter(|| black_box(Surface::compute(mesh, CC3, C4Limits::default())));
        });
    }

    group.finish();
}

fn bench_iso_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("iso_lines");
    group.sample_size(20);
    let levels = default_levels();

    for &step in &GRID_STEPS {
        let mesh = Mesh::square(3.6, 8.0, 0.2, step);
        let surface = Surface::compute(&mesh, CC3, C4Limits::default());
        let id = BenchmarkId::new("step", format!("{step}"));
        group.bench_with_input(id, &surface, |b, surface| {
            b.iter(|| black_box(iso_lines(surface, &levels)));
        });
    }

    group.finish();
}

criterion_group!(surface_grid, bench_surface_compute, bench_iso_lines);
criterion_main!(surface_grid);
