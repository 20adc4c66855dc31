use std::hint::black_box;
use std::time::Instant;

use backdrop_common::BackdropConfig;
use backdrop_mesh::GridMesh;

fn bench_displace(cols: u32, rows: u32, iterations: usize) {
    let mut config = BackdropConfig::default();
    config.mesh.cols = cols;
    config.mesh.rows = rows;
    let mut mesh = GridMesh::new(&config.mesh, &config.palette);

    let start = Instant::now();
    let mut phase = 0.0f32;
    for _ in 0..iterations {
        phase += config.wave.phase_increment;
        mesh.displace(black_box(phase), &config.wave);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  displace ({}x{} grid, {iterations} iters): {per_iter:?}/frame, total {elapsed:?}",
        cols, rows
    );
}

fn bench_normals(cols: u32, rows: u32, iterations: usize) {
    let mut config = BackdropConfig::default();
    config.mesh.cols = cols;
    config.mesh.rows = rows;
    let mut mesh = GridMesh::new(&config.mesh, &config.palette);
    mesh.displace(1.0, &config.wave);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(&mut mesh).recompute_normals();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  normals ({}x{} grid, {iterations} iters): {per_iter:?}/frame, total {elapsed:?}",
        cols, rows
    );
}

fn main() {
    println!("grid mesh per-frame cost:");
    for &(cols, rows) in &[(120u32, 120u32), (160, 140), (160, 160)] {
        bench_displace(cols, rows, 200);
        bench_normals(cols, rows, 50);
    }
}
