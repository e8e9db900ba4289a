//! Benchmarks for filtering, flattening, and window computation.
//!
//! Run with: cargo bench -p regtree-engine

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use regtree_engine::config::ViewConfig;
use regtree_engine::filter::{FilterOptions, apply_filters};
use regtree_engine::flatten::flatten;
use regtree_engine::search::visible_ids;
use regtree_engine::window::Window;
use regtree_model::{NodeData, NodeId, SolutionIndex, StepData, TreeNode};
use std::collections::HashSet;
use std::hint::black_box;

/// Forest of `assemblies` assemblies, each with 4 types of `steps_per_type`
/// steps. Every third step is hidden.
fn build_forest(assemblies: usize, steps_per_type: usize) -> Vec<TreeNode> {
    (0..assemblies)
        .map(|a| {
            let types: Vec<TreeNode> = (0..4)
                .map(|t| {
                    let steps: Vec<TreeNode> = (0..steps_per_type)
                        .map(|s| {
                            TreeNode::new(
                                format!("s-{a}-{t}-{s}"),
                                format!("Step{a}_{t}_{s}"),
                                NodeData::Step(StepData {
                                    enabled: true,
                                    hidden: s % 3 == 0,
                                    ..StepData::default()
                                }),
                            )
                        })
                        .collect();
                    TreeNode::new(
                        format!("t-{a}-{t}"),
                        format!("Handler{a}_{t}"),
                        NodeData::PluginType,
                    )
                    .with_children(steps)
                })
                .collect();
            TreeNode::new(format!("a-{a}"), format!("Assembly{a}"), NodeData::assembly())
                .with_children(types)
        })
        .collect()
}

fn all_ids(roots: &[TreeNode]) -> HashSet<NodeId> {
    fn walk(node: &TreeNode, out: &mut HashSet<NodeId>) {
        out.insert(node.id().clone());
        for child in node.children() {
            walk(child, out);
        }
    }
    let mut out = HashSet::new();
    for root in roots {
        walk(root, &mut out);
    }
    out
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/filter");
    let config = ViewConfig::default();
    let index = SolutionIndex::new();

    for (assemblies, steps) in [(10, 25), (50, 50), (100, 125)] {
        let roots = build_forest(assemblies, steps);
        let total = roots.iter().map(TreeNode::subtree_len).sum::<usize>();
        let options = FilterOptions {
            hide_hidden_steps: true,
            hide_vendor_assemblies: true,
            solution: None,
        };

        group.bench_with_input(BenchmarkId::new("hidden+vendor", total), &(), |b, _| {
            b.iter(|| black_box(apply_filters(&roots, &options, &index, &config)))
        });
    }
    group.finish();
}

fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/flatten");

    for (assemblies, steps) in [(10, 25), (100, 125)] {
        let roots = build_forest(assemblies, steps);
        let expanded = all_ids(&roots);
        let total = roots.iter().map(TreeNode::subtree_len).sum::<usize>();

        group.bench_with_input(BenchmarkId::new("expanded", total), &(), |b, _| {
            b.iter(|| black_box(flatten(&roots, &expanded).len()))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/search");
    let roots = build_forest(100, 125);

    group.bench_function("substring_50k", |b| {
        b.iter(|| black_box(visible_ids(&roots, "step9")))
    });
    group.finish();
}

fn bench_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/window");
    let config = ViewConfig::default();

    group.bench_function("compute", |b| {
        b.iter(|| {
            for scroll in [0u32, 3_000, 30_000, 300_000] {
                black_box(Window::compute(scroll, 600, 50_000, &config));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_filters, bench_flatten, bench_search, bench_window);
criterion_main!(benches);
