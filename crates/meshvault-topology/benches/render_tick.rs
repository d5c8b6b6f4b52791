//! Benchmarks for the topology renderer

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use meshvault_topology::{
    edge_stroke, node_opacity, AnimationClock, Edge, Node, Palette, RecordingSurface, Topology,
    TopologyRenderer,
};

fn bench_sample_tick(c: &mut Criterion) {
    let mut renderer = TopologyRenderer::new();
    renderer.bind(Topology::sample(), RecordingSurface::new(500, 400));

    c.bench_function("render_tick_sample", |b| {
        b.iter(|| {
            renderer.tick();
            black_box(renderer.clock())
        })
    });
}

fn bench_ring_tick(c: &mut Criterion) {
    // 200-node ring to see per-element cost
    let count = 200;
    let nodes: Vec<Node> = (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * std::f64::consts::TAU;
            Node::new(format!("node-{i}"), 250.0 + 180.0 * angle.cos(), 200.0 + 180.0 * angle.sin())
                .with_files(i as u32)
                .with_active(i % 7 != 0)
        })
        .collect();
    let edges: Vec<Edge> = (0..count)
        .map(|i| {
            Edge::new(format!("node-{i}"), format!("node-{}", (i + 1) % count))
                .with_active(i % 5 != 0)
        })
        .collect();

    let mut renderer = TopologyRenderer::new();
    renderer
        .initialize(nodes, edges, RecordingSurface::new(500, 400))
        .expect("ring topology is valid");

    c.bench_function("render_tick_ring_200", |b| {
        b.iter(|| {
            renderer.tick();
            black_box(renderer.stats().last_frame_draw_calls)
        })
    });
}

fn bench_style_functions(c: &mut Criterion) {
    let palette = Palette::default();
    let edge = Edge::new("node-1", "node-2");
    let from = meshvault_core::Point::new(150.0, 100.0);
    let to = meshvault_core::Point::new(350.0, 180.0);

    c.bench_function("style_edge_and_opacity", |b| {
        let mut frame = 0u64;
        b.iter(|| {
            frame += 1;
            let clock = AnimationClock::at(frame);
            black_box(edge_stroke(&edge, from, to, clock, &palette));
            black_box(node_opacity(clock))
        })
    });
}

criterion_group!(benches, bench_sample_tick, bench_ring_tick, bench_style_functions);
criterion_main!(benches);
