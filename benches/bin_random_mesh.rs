use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{Rng as _, SeedableRng as _, rngs::SmallRng};
use spatialsplit::{
    BinAccumulator, BinMapping, PrimInfo, SplitSettings, TriangleMesh, find_spatial_split,
    geometry::{Triangle, WorldPoint, WorldVector},
};

/// Mesh of small randomly oriented triangles scattered in a unit cube.
fn random_mesh(triangle_count: usize) -> TriangleMesh {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    let mut random_point = |scale: f32| {
        WorldPoint::new(rng.random::<f32>(), rng.random::<f32>(), rng.random::<f32>()) * scale
    };

    let mut vertices = Vec::with_capacity(3 * triangle_count);
    let mut triangles = Vec::with_capacity(triangle_count);
    for i in 0..triangle_count {
        let center = random_point(1.0);
        for _ in 0..3 {
            vertices.push(center + random_point(0.05).coords - WorldVector::repeat(0.025));
        }
        triangles.push(Triangle::new(3 * i, 3 * i + 1, 3 * i + 2));
    }

    TriangleMesh::new(vertices, triangles).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let mesh = random_mesh(100_000);
    let prims = mesh.prim_refs();
    let info = PrimInfo::from_prims(&prims);

    let mut group = c.benchmark_group("bin_random_mesh");
    group.bench_function(BenchmarkId::new("serial", 32), |b| {
        let mapping = BinMapping::<32>::new(&info.geometry_bounds);
        b.iter(|| {
            let mut accumulator = BinAccumulator::new();
            accumulator.bin(&mesh, &prims, &mapping);
            accumulator.best(&mapping, 0)
        })
    });

    let settings = SplitSettings::default();
    group.bench_function(BenchmarkId::new("parallel", 16), |b| {
        b.iter(|| find_spatial_split::<_, 16>(&mesh, &prims, &settings))
    });
    group.bench_function(BenchmarkId::new("parallel", 32), |b| {
        b.iter(|| find_spatial_split::<_, 32>(&mesh, &prims, &settings))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
