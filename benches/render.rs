// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use image_rs::{Rgba, RgbaImage};
use lens_edit::domain::editing::ExportQuality;
use lens_edit::editor::{TransformPatch, TransformState};
use lens_edit::media::{compositor, export, ExportFormat, RenderOptions, SourceImage};
use std::hint::black_box;

fn sample_source() -> SourceImage {
    let image = RgbaImage::from_fn(800, 600, |x, y| {
        #[allow(clippy::cast_possible_truncation)]
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    SourceImage::from_dynamic(&image_rs::DynamicImage::ImageRgba8(image)).unwrap()
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let source = sample_source();

    let identity = TransformState::default();
    let rotated = identity.apply(&TransformPatch::rotation(30.0).with_scale(1.5));
    let graded = identity.apply(
        &TransformPatch::brightness(120.0)
            .with_contrast(80.0)
            .with_saturation(150.0),
    );

    group.bench_function("identity_800x600", |b| {
        b.iter(|| black_box(compositor::render(&source, &identity, &RenderOptions::default()).unwrap()));
    });
    group.bench_function("rotate_scale_800x600", |b| {
        b.iter(|| black_box(compositor::render(&source, &rotated, &RenderOptions::default()).unwrap()));
    });
    group.bench_function("color_filter_800x600", |b| {
        b.iter(|| black_box(compositor::render(&source, &graded, &RenderOptions::default()).unwrap()));
    });

    group.finish();
}

fn encode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let raster =
        compositor::render(&sample_source(), &TransformState::default(), &RenderOptions::default())
            .unwrap();

    for format in ExportFormat::all() {
        group.bench_function(format.extension(), |b| {
            b.iter(|| black_box(export::encode(&raster, *format, ExportQuality::default()).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, render_benchmark, encode_benchmark);
criterion_main!(benches);
