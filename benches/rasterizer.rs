use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softengine::bench::{FrameBuffer, Rasterizer, ScanlineRasterizer, ShadedVertex, Triangle};
use softengine::colors::Color4;
use softengine::math::vec3::Vec3;
use softengine::prelude::{Camera, Engine, Mesh, RenderMode};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn triangle(points: [(f32, f32); 3], intensities: [f32; 3]) -> Triangle {
    let mut vertices = [ShadedVertex::new(Vec3::ZERO, 0.0); 3];
    for ((slot, (x, y)), intensity) in vertices.iter_mut().zip(points).zip(intensities) {
        *slot = ShadedVertex::new(Vec3::new(x, y, 0.5), intensity);
    }
    Triangle::new(vertices, Color4::RED)
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let scanline = ScanlineRasterizer::new();
    let small = [(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)];
    let medium = [(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)];
    let large = [(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)];

    for (name, points) in [("small", small), ("medium", medium), ("large", large)] {
        let flat = triangle(points, [0.8; 3]);
        let smooth = triangle(points, [0.1, 0.6, 1.0]);

        for (shading, tri) in [("flat", flat), ("gouraud", smooth)] {
            group.bench_with_input(BenchmarkId::new(shading, name), &tri, |b, tri| {
                let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
                b.iter(|| {
                    fb.clear(0, 0, 0, 255);
                    scanline.fill_triangle(black_box(tri), &mut fb, None);
                });
            });
        }
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let scanline = ScanlineRasterizer::new();

    // Grid of small triangles
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)], [1.0; 3])
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear(0, 0, 0, 255);
            for tri in &triangles {
                scanline.fill_triangle(black_box(tri), &mut fb, None);
            }
        });
    });

    group.finish();
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_frame");

    let camera = Camera::default();
    let meshes = vec![Mesh::cube()];

    for mode in [RenderMode::Points, RenderMode::Wireframe, RenderMode::Filled] {
        group.bench_function(mode.to_string(), |b| {
            let mut engine = Engine::new(640, 480);
            engine.set_render_mode(mode);
            b.iter(|| {
                engine.clear(0, 0, 0, 255);
                engine.render(&camera, black_box(&meshes));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles, benchmark_cube_frame);
criterion_main!(benches);
