use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use two_sat_solver::sat::generator::{GeneratorConfig, generate, generate_batch};
use two_sat_solver::sat::graph::ImplicationGraph;
use two_sat_solver::sat::instance::Instance;
use two_sat_solver::sat::scc::kosaraju;
use two_sat_solver::sat::solver::TwoSat;

/// Clause/variable ratio near the 2-SAT phase transition.
const CRITICAL_RATIO: f64 = 1.0;

fn instance(num_vars: usize, ratio: f64, planted: bool, seed: u64) -> Instance {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let num_clauses = (num_vars as f64 * ratio) as usize;
    let config = GeneratorConfig::new(num_vars, num_clauses).planted(planted);
    generate(&config, &mut fastrand::Rng::with_seed(seed), 1)
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve - planted");
    group.measurement_time(Duration::from_secs(10));

    for num_vars in [1_000, 10_000, 100_000] {
        let inst = instance(num_vars, 2.0, true, 42);
        group.bench_with_input(BenchmarkId::from_parameter(num_vars), &inst, |b, inst| {
            b.iter(|| {
                let solver = TwoSat::from_instance(inst).unwrap();
                black_box(solver.solve());
            });
        });
    }
    group.finish();

    let mut group = c.benchmark_group("solve - critical ratio");
    for num_vars in [1_000, 10_000, 100_000] {
        let inst = instance(num_vars, CRITICAL_RATIO, false, 7);
        group.bench_with_input(BenchmarkId::from_parameter(num_vars), &inst, |b, inst| {
            b.iter(|| {
                let solver = TwoSat::from_instance(inst).unwrap();
                black_box(solver.solve());
            });
        });
    }
    group.finish();
}

fn bench_phases(c: &mut Criterion) {
    let inst = instance(50_000, 2.0, true, 3);

    c.bench_function("graph construction", |b| {
        b.iter(|| {
            let mut graph = ImplicationGraph::new(inst.num_vars);
            for clause in &inst.clauses {
                graph.insert(*clause).unwrap();
            }
            black_box(graph);
        });
    });

    let solver = TwoSat::from_instance(&inst).unwrap();
    c.bench_function("kosaraju", |b| {
        b.iter(|| black_box(kosaraju(solver.graph())));
    });
}

fn bench_batch(c: &mut Criterion) {
    let config = GeneratorConfig::new(100, 100);
    let instances = generate_batch(&config, &mut fastrand::Rng::with_seed(11), 200);

    c.bench_function("batch - 200 small instances", |b| {
        b.iter(|| {
            for inst in &instances {
                black_box(TwoSat::from_instance(inst).unwrap().solve());
            }
        });
    });
}

criterion_group!(benches, bench_solve, bench_phases, bench_batch);
criterion_main!(benches);
