use std::hint::black_box;
use std::time::{Duration, Instant};

use glam::DVec2;
use gridcast_common::{GridMap, Pose};
use gridcast_raycast::RaycastEngine;

/// Cast `frames` frames while turning in place; returns the engine (for its
/// last stats) and the mean time per frame.
fn time_casts(map: &GridMap, pose: Pose, columns: usize, frames: usize) -> (RaycastEngine, Duration) {
    let mut engine = RaycastEngine::with_columns(columns).unwrap();
    let start = Instant::now();
    for i in 0..frames {
        let p = pose.rotated(i as f64 * 0.01);
        let _ = black_box(engine.cast(black_box(&p), black_box(map)));
    }
    let per_frame = start.elapsed() / frames as u32;
    (engine, per_frame)
}

fn bench_cast(columns: usize, size: usize, frames: usize) {
    let map = GridMap::arena(size);
    let centre = size as f64 * 0.5 + 0.5;
    let pose = Pose::from_angle(DVec2::new(centre, centre - 1.0), 0.0, 66f64.to_radians());

    let (engine, per_frame) = time_casts(&map, pose, columns, frames);
    println!(
        "  cast ({columns} columns, {size}x{size} map, {frames} frames): {per_frame:?}/frame, mean steps {:.1}",
        engine.stats().mean_steps()
    );
}

fn bench_open_map(columns: usize, size: usize, frames: usize) {
    // No walls at all: every column runs to the map edge.
    let map = GridMap::new(size, size, vec![0; size * size]).unwrap();
    let centre = size as f64 * 0.5;
    let pose = Pose::from_angle(DVec2::new(centre, centre), 0.3, 66f64.to_radians());

    let (engine, per_frame) = time_casts(&map, pose, columns, frames);
    println!(
        "  open map ({columns} columns, {size}x{size}, {frames} frames): {per_frame:?}/frame, max steps {}",
        engine.stats().max_steps
    );
}

fn main() {
    println!("=== Raycast Benchmarks ===\n");

    println!("Pillared arena:");
    bench_cast(320, 32, 2000);
    bench_cast(640, 64, 1000);
    bench_cast(1920, 256, 200);

    println!("\nWall-free map (worst case walk length):");
    bench_open_map(320, 64, 1000);
    bench_open_map(1920, 512, 100);

    println!("\n=== Done ===");
}
