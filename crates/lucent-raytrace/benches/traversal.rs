//! Build and traversal benchmarks over a random sphere scene.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lucent_math::Point3;
use lucent_raytrace::{
    Bvh, BvhSettings, GeometricPrimitive, Primitive, Ray, RayHit, Sphere, SplitMethod,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_point(rng: &mut StdRng, extent: f64) -> Point3 {
    Point3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
    )
}

fn sphere_scene(count: usize) -> Vec<GeometricPrimitive<Sphere>> {
    let mut rng = StdRng::seed_from_u64(0xb7);

    (0..count)
        .map(|i| {
            let center = random_point(&mut rng, 50.0);
            let radius = rng.gen_range(0.05..0.5);
            GeometricPrimitive::with_id(Sphere::new(center, radius), i as u32)
        })
        .collect()
}

/// Rays from a shell around the scene aimed at random points inside it.
fn inward_rays(count: usize) -> Vec<Ray> {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    (0..count)
        .map(|_| {
            let dir = random_point(&mut rng, 1.0).coords;
            let origin = Point3::from(dir.normalize() * 120.0);
            let target = random_point(&mut rng, 40.0);
            Ray::new(origin, target - origin)
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for count in [1_000, 10_000] {
        let scene = sphere_scene(count);
        let prims: Vec<&dyn Primitive> = scene.iter().map(|p| p as &dyn Primitive).collect();

        for split_method in [SplitMethod::Sah, SplitMethod::Middle, SplitMethod::EqualCounts] {
            let settings = BvhSettings {
                split_method,
                ..Default::default()
            };

            group.bench_with_input(
                BenchmarkId::new(format!("{split_method:?}"), count),
                &prims,
                |b, prims| b.iter(|| Bvh::with_settings(black_box(prims.clone()), &settings)),
            );
        }
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let scene = sphere_scene(10_000);
    let prims: Vec<&dyn Primitive> = scene.iter().map(|p| p as &dyn Primitive).collect();
    let rays = inward_rays(4096);

    let mut group = c.benchmark_group("traversal");

    for leaf_max_size in [1, 4, 8] {
        let Ok(bvh) = Bvh::new(prims.clone(), leaf_max_size) else {
            continue;
        };

        group.bench_function(BenchmarkId::new("intersect", leaf_max_size), |b| {
            let mut rays_it = rays.iter().cycle();
            b.iter(|| {
                let mut ray = *rays_it.next().unwrap_or(&rays[0]);
                let mut hit = RayHit::default();
                black_box(bvh.intersect(&mut ray, &mut hit));
            })
        });

        group.bench_function(BenchmarkId::new("does_intersect", leaf_max_size), |b| {
            let mut rays_it = rays.iter().cycle();
            b.iter(|| {
                let ray = rays_it.next().unwrap_or(&rays[0]);
                black_box(bvh.does_intersect(ray));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_traversal);
criterion_main!(benches);
