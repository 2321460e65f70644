use common::shapes::{Point, Rectangle};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quadtree::{QuadTree, QueryWindow};
use rand::prelude::*;

const WORLD_WIDTH: f32 = 1600.0;
const WORLD_HEIGHT: f32 = 900.0;
const ENTITY_SIZE: f32 = 8.0;

fn world() -> Rectangle {
    Rectangle::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT)
}

fn random_boxes(count: usize) -> Vec<Rectangle> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            Rectangle::new(
                rng.gen_range(0.0..WORLD_WIDTH - ENTITY_SIZE),
                rng.gen_range(0.0..WORLD_HEIGHT - ENTITY_SIZE),
                ENTITY_SIZE,
                ENTITY_SIZE,
            )
        })
        .collect()
}

fn rebuild(quadtree: &mut QuadTree, boxes: &[Rectangle]) {
    quadtree.reset(world());
    for (value, rect) in boxes.iter().enumerate() {
        quadtree.insert_point(value as u32, rect.center());
    }
}

fn rebuild_benchmark(c: &mut Criterion) {
    let boxes = random_boxes(2_000);
    let mut quadtree = QuadTree::new(world());

    c.bench_function("quadtree_rebuild_2000", |b| {
        b.iter(|| rebuild(&mut quadtree, black_box(&boxes)))
    });
}

fn query_benchmark(c: &mut Criterion) {
    let boxes = random_boxes(2_000);
    let mut quadtree = QuadTree::new(world());
    rebuild(&mut quadtree, &boxes);
    let window = QueryWindow::default();
    let center = Point::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0);

    c.bench_function("quadtree_query_window", |b| {
        let mut candidates: Vec<u32> = Vec::new();
        b.iter(|| {
            candidates.clear();
            quadtree.query_entities(black_box(&window.around(center)), &mut candidates);
        })
    });
}

// Candidate pairs for every entity: quadtree window lookups vs comparing all pairs
fn detection_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_detection");
    let window = QueryWindow::default();
    for count in [250usize, 1_000, 4_000] {
        let boxes = random_boxes(count);
        let mut quadtree = QuadTree::new(world());

        group.bench_with_input(BenchmarkId::new("quadtree", count), &boxes, |b, boxes| {
            let mut candidates: Vec<u32> = Vec::new();
            b.iter(|| {
                rebuild(&mut quadtree, boxes);
                let mut hits = 0usize;
                for (i, rect) in boxes.iter().enumerate() {
                    candidates.clear();
                    quadtree.query_entities(&window.around(rect.center()), &mut candidates);
                    hits += candidates
                        .iter()
                        .filter(|&&j| j as usize != i && rect.intersects(&boxes[j as usize]))
                        .count();
                }
                black_box(hits)
            })
        });

        group.bench_with_input(BenchmarkId::new("brute_force", count), &boxes, |b, boxes| {
            b.iter(|| {
                let mut hits = 0usize;
                for (i, a) in boxes.iter().enumerate() {
                    for (j, other) in boxes.iter().enumerate() {
                        if i != j && a.intersects(other) {
                            hits += 1;
                        }
                    }
                }
                black_box(hits)
            })
        });
    }
    group.finish();
}

criterion_group!(
    quadtree_benchmarks,
    rebuild_benchmark,
    query_benchmark,
    detection_benchmark
);
criterion_main!(quadtree_benchmarks);
