#[macro_use]
extern crate criterion;

use criterion::Criterion;
use monte_carlo_engine::compiler;
use monte_carlo_engine::context::Context;
use monte_carlo_engine::interpreter;
use monte_carlo_engine::registry::FunctionRegistry;

const RECIPE: &str = r#"{
    "simulation_config": {"num_trials": 1},
    "output_variable": "npv",
    "pre_trial_steps": [
        {"type": "literal_assignment", "result": "rate", "value": 0.08},
        {"type": "literal_assignment", "result": "base", "value": 1000000},
        {"type": "execution_assignment", "result": "cashflows", "function": "grow_series", "args": [
            {"type": "variable_index", "value": "base"},
            {"type": "scalar_literal", "value": 0.05},
            {"type": "scalar_literal", "value": 10}
        ]}
    ],
    "per_trial_steps": [
        {"type": "execution_assignment", "result": "shock", "function": "Normal", "args": [
            {"type": "scalar_literal", "value": 0},
            {"type": "scalar_literal", "value": 0.01}
        ]},
        {"type": "execution_assignment", "result": "adjusted_rate", "function": "add", "args": [
            {"type": "variable_index", "value": "rate"},
            {"type": "variable_index", "value": "shock"}
        ]},
        {"type": "execution_assignment", "result": "npv", "function": "npv", "args": [
            {"type": "variable_index", "value": "adjusted_rate"},
            {"type": "variable_index", "value": "cashflows"}
        ]}
    ]
}"#;

fn bench_compile(c: &mut Criterion) {
    let functions = FunctionRegistry::with_builtins();
    c.bench_function("compile_recipe", |b| {
        b.iter(|| {
            let raw = compiler::parse_recipe(RECIPE).unwrap();
            compiler::compile(raw, &functions).unwrap()
        })
    });
}

fn bench_per_trial_interpretation(c: &mut Criterion) {
    let functions = FunctionRegistry::with_builtins();
    let raw = compiler::parse_recipe(RECIPE).unwrap();
    let (program, _) = compiler::compile(raw, &functions).unwrap();
    let mut snapshot = Context::new(program.context_len);
    interpreter::run_steps(&program.pre_trial_steps, &mut snapshot).unwrap();

    c.bench_function("per_trial_interpretation", |b| {
        b.iter(|| {
            let mut trial_context = snapshot.clone();
            interpreter::run_steps(&program.per_trial_steps, &mut trial_context).unwrap();
        })
    });
}

criterion_group!(benches, bench_compile, bench_per_trial_interpretation);
criterion_main!(benches);
