use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mechviz_test_fixtures::logs;
use mechviz_viewer_core::{parse_log_json, Config, Inputs, RecordingBackend, Viewer};

fn bench_tick(c: &mut Criterion) {
    let json = logs::json("cart").expect("cart fixture");
    let log = parse_log_json(&json).expect("parse");

    let mut backend = RecordingBackend::new();
    let mut viewer = Viewer::new(Config::default());
    viewer.init(&mut backend);
    viewer
        .load_animation(log, &mut backend)
        .expect("cart log should load");

    c.bench_function("tick_16ms", |b| {
        b.iter(|| {
            let out = viewer.tick(black_box(0.016), Inputs::default(), &mut backend);
            black_box(out.events.len());
        })
    });
}

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve_frame_index", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            let mut t = -5.0f32;
            while t < 10.0 {
                acc += mechviz_viewer_core::resolve_frame_index(0.0, 2.0, 0.25, black_box(t));
                t += 0.013;
            }
            black_box(acc);
        })
    });
}

criterion_group!(benches, bench_tick, bench_resolve);
criterion_main!(benches);
