use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use egui::Vec2;
use egui_graph_manager::{GraphEdge, GraphModel, GraphNode, RadialGraphView, ZoomEvent};
use std::hint::black_box;
use std::time::Duration;

/// Balanced tree with `branching` children per node, `depth` levels below the root.
fn make_model(branching: usize, depth: usize) -> GraphModel {
    let mut nodes = vec![GraphNode::top("0", "root")];
    let mut edges = Vec::new();
    let mut level = vec!["0".to_string()];
    let mut next_id = 1usize;
    for _ in 0..depth {
        let mut next = Vec::with_capacity(level.len() * branching);
        for parent in &level {
            for _ in 0..branching {
                let id = next_id.to_string();
                next_id += 1;
                nodes.push(GraphNode::new(id.clone(), format!("node with a long name {id}")));
                edges.push(GraphEdge::new(parent.clone(), id.clone()));
                next.push(id);
            }
        }
        level = next;
    }
    GraphModel::new(nodes, edges)
}

fn bench_radial(c: &mut Criterion) {
    let viewport = Vec2::new(1200.0, 800.0);
    let mut group = c.benchmark_group("radial_tree");
    group.sample_size(10);
    group.measurement_time(Duration::from_millis(600));
    group.warm_up_time(Duration::from_millis(200));

    group.bench_function("b4_d4_initial_render", |b| {
        b.iter_batched(
            || make_model(4, 4),
            |model| {
                let view = RadialGraphView::new(viewport, &model);
                black_box(view.scene().nodes.len());
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("b3_d6_zoom_rebuild", |b| {
        b.iter_batched(
            || {
                let model = make_model(3, 6);
                let view = RadialGraphView::new(viewport, &model);
                (model, view)
            },
            |(model, mut view)| {
                view.redraw(
                    Some(ZoomEvent {
                        scale: Some(1.5),
                        translate: None,
                    }),
                    false,
                );
                black_box(view.scene().links.len());
                black_box(model);
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().configure_from_args();
    targets = bench_radial
}
criterion_main!(benches);
