//! Sanitizer Benchmarks
//!
//! Performance benchmarks for record collection and the full cleanup pipeline
//! on synthetic scenes.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::Vec3;
use naos_core::{MeshGeometry, SceneGraph, Transform};
use naos_sanitize::{SanitizeConfig, cleanup, collect_records};

fn cube(size: f32) -> MeshGeometry {
    let h = size * 0.5;
    let positions = vec![
        Vec3::new(-h, -h, -h),
        Vec3::new(h, -h, -h),
        Vec3::new(h, h, -h),
        Vec3::new(-h, h, -h),
        Vec3::new(-h, -h, h),
        Vec3::new(h, -h, h),
        Vec3::new(h, h, h),
        Vec3::new(-h, h, h),
    ];
    let indices = vec![
        0, 1, 2, 0, 2, 3, 4, 6, 5, 4, 7, 6, 0, 4, 5, 0, 5, 1, 3, 2, 6, 3, 6, 7, 0, 3, 7, 0, 7, 4,
        1, 5, 6, 1, 6, 2,
    ];
    MeshGeometry::new(positions, indices)
}

/// Model meshes near the origin plus a sprinkling of artifacts
fn synthetic_scene(mesh_count: usize) -> SceneGraph {
    let mut scene = SceneGraph::new();
    for i in 0..mesh_count {
        let angle = i as f32 * 0.7;
        let radius = 10.0 + (i % 7) as f32 * 4.0;
        let id = scene.add_mesh("part", cube(15.0));
        scene.get_mut(id).unwrap().local_transform = Transform::from_position(Vec3::new(
            radius * angle.cos(),
            (i % 5) as f32 * 3.0,
            radius * angle.sin(),
        ));
    }
    // One artifact per sixteen meshes
    for i in 0..(mesh_count / 16).max(1) {
        let id = scene.add_mesh("speck", cube(0.4));
        scene.get_mut(id).unwrap().local_transform =
            Transform::from_position(Vec3::new(20.0 + i as f32, 0.0, -15.0));
    }
    scene.update_transforms();
    scene
}

fn bench_collect_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("collect_records");

    for count in [100, 1000, 5000].iter() {
        let scene = synthetic_scene(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| black_box(collect_records(&scene)));
        });
    }

    group.finish();
}

fn bench_cleanup(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleanup");
    let config = SanitizeConfig::default();

    for count in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter_batched(
                || synthetic_scene(count),
                |mut scene| {
                    black_box(cleanup(&mut scene, 100.0, &config));
                    scene
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_collect_records, bench_cleanup);
criterion_main!(benches);
