//! Benchmarks for the stack panel pipeline.
//!
//! Run with: cargo bench -p dockpanel-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use dockpanel_layout::{
    Child, ChildId, ItemId, Orientation, SizeConstraints, Size, SplitterId, StackPanel,
    distribute,
};
use std::hint::black_box;

/// `n` children separated by splitters, every third one with a minimum width.
fn make_panel(n: usize) -> StackPanel {
    let mut panel = StackPanel::new(Orientation::Horizontal);
    for i in 0..n {
        if i > 0 {
            panel.add_splitter().expect("splitter");
        }
        let child = if i % 3 == 0 {
            Child::new().with_constraints(SizeConstraints::UNCONSTRAINED.width(20.0, f64::INFINITY))
        } else {
            Child::new()
        };
        panel.add_child(child).expect("child");
    }
    panel
}

fn first_splitter(panel: &StackPanel) -> SplitterId {
    panel
        .item_ids()
        .iter()
        .find_map(|id| match id {
            ItemId::Splitter(id) => Some(*id),
            ItemId::Child(_) => None,
        })
        .expect("panel has a splitter")
}

fn bench_distribute(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_panel/distribute");

    for n in [3, 10, 50, 200] {
        let proportions = vec![1.0 / n as f64; n];
        group.bench_with_input(BenchmarkId::new("equal", n), &proportions, |b, p| {
            b.iter(|| black_box(distribute(1917.0, p.iter().copied())))
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_panel/layout");
    let size = Size::new(1920.0, 1080.0);

    for n in [3, 10, 50] {
        // Steady state: proportions already normalized.
        let mut panel = make_panel(n);
        panel.layout(size);
        group.bench_with_input(BenchmarkId::new("steady", n), &n, |b, _| {
            b.iter(|| black_box(panel.layout(black_box(size))))
        });

        // First pass: every child still unassigned.
        group.bench_with_input(BenchmarkId::new("first_pass", n), &n, |b, &n| {
            b.iter_batched(
                || make_panel(n),
                |mut panel| black_box(panel.layout(size)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_collapse_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_panel/collapse");
    let size = Size::new(1920.0, 1080.0);

    let mut panel = make_panel(10);
    panel.layout(size);
    let ids: Vec<ChildId> = panel.children().map(|(id, _)| id).collect();

    group.bench_function("toggle_and_layout_10", |b| {
        b.iter(|| {
            for id in &ids {
                panel.toggle_collapsed(*id).expect("known child");
                black_box(panel.layout(size));
                panel.toggle_collapsed(*id).expect("known child");
            }
            black_box(panel.layout(size))
        })
    });

    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_panel/drag");
    let size = Size::new(1920.0, 1080.0);

    let mut panel = make_panel(10);
    panel.layout(size);
    let splitter = first_splitter(&panel);

    group.bench_function("session_60_updates", |b| {
        b.iter(|| {
            let mut drag = panel.begin_drag(splitter).expect("drag");
            for step in 0..60 {
                let delta = f64::from(step) * 2.0 - 40.0;
                black_box(panel.update_drag(&mut drag, delta).expect("update"));
            }
            panel.cancel_drag(drag).expect("cancel");
        })
    });

    group.bench_function("drag_then_layout", |b| {
        b.iter(|| {
            panel.drag_splitter(splitter, 3.0).expect("drag");
            black_box(panel.layout(size));
            panel.drag_splitter(splitter, -3.0).expect("drag");
            black_box(panel.layout(size))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_distribute,
    bench_layout,
    bench_collapse_cycle,
    bench_drag,
);

criterion_main!(benches);
