//! Recommend using with
//! `RUSTFLAGS="-C target-cpu=x86-64-v2" cargo bench`
//! and trying `--features rayon` for the subdivision benchmarks, which are
//! the only ones with work to spread across threads.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geomotion::{
    animation::{animate, ChannelLayout, Motion, Skeleton, SkeletonBuilder},
    curve::{sample_uniform, BezierCurve, DEFAULT_STEPS},
    mesh::{subdivide, subdivide_n, QuadMesh},
    options::{Boundary, PlaybackOptions, SubdivideOptions},
    rotation::{self, Axis, RotationOrder},
};
use nalgebra_glm as glm;

const COUNT: usize = 100;
const MUL: f32 = 1.0_f32 / (COUNT as f32);

fn slerp(c: &mut Criterion) {
    let q1 = black_box(rotation::axis_angle(&Axis::X.unit(), 30.0));
    let q2 = black_box(rotation::axis_angle(&glm::vec3(1.0, 1.0, 0.0), 120.0));
    c.bench_function(
        "slerp", //
        |b| {
            b.iter(|| {
                for i in 0..=COUNT {
                    let _ = rotation::slerp(&q1, &q2, (i as f32) * MUL);
                }
            })
        },
    );
}

/// A chain of joints, each bending a little every frame
fn chain(links: usize) -> (Skeleton, Motion) {
    let mut b = SkeletonBuilder::new();
    let layout = ChannelLayout::new([3, 4, 5], RotationOrder::UNITY).with_position([0, 1, 2]);
    let mut parent = b.root("root", glm::Vec3::zeros(), layout).unwrap();
    for i in 0..links {
        let first = b.next_channel();
        let layout = ChannelLayout::new([first, first + 1, first + 2], RotationOrder::UNITY);
        parent = b
            .joint(parent, &format!("link{i}"), glm::vec3(0.0, 2.0, 0.0), layout)
            .unwrap();
    }
    b.end_site(parent, "tip", glm::vec3(0.0, 2.0, 0.0)).unwrap();
    let skeleton = b.build().unwrap();
    let frames = (0..30)
        .map(|f| {
            (0..skeleton.channel_count())
                .map(|c| ((f * 7 + c) % 45) as f32)
                .collect()
        })
        .collect();
    (skeleton, Motion::new(1.0 / 30.0, frames).unwrap())
}

fn pose(c: &mut Criterion) {
    let (skeleton, motion) = chain(24);
    let opts = PlaybackOptions {
        interpolate: true,
        ..Default::default()
    };
    c.bench_function(
        "animate", //
        |b| b.iter(|| animate(&skeleton, &motion, black_box(0.41), &opts)),
    );
}

fn arc_length(c: &mut Criterion) {
    let curve = black_box(BezierCurve::default());
    c.bench_function(
        "arc length table", //
        |b| b.iter(|| curve.arc_length_table(DEFAULT_STEPS)),
    );
    let table = curve.arc_length_table(DEFAULT_STEPS);
    c.bench_function(
        "uniform samples", //
        |b| b.iter(|| sample_uniform(&curve, &table, 0.05)),
    );
}

fn subdivision(c: &mut Criterion) {
    let cube = QuadMesh::cube(2.0);
    let dense = subdivide_n(
        &cube,
        &SubdivideOptions {
            levels: 3,
            ..Default::default()
        },
    )
    .unwrap();
    c.bench_function(
        "subdivide cube", //
        |b| b.iter(|| subdivide(black_box(&cube), Boundary::Average)),
    );
    c.bench_function(
        "subdivide 384 quads", //
        |b| b.iter(|| subdivide(black_box(&dense), Boundary::Average)),
    );
}

criterion_group!(benches, slerp, pose, arc_length, subdivision);
criterion_main!(benches);
