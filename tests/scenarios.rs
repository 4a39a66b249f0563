use std::io::Write;

use monte_carlo_engine::compiler;
use monte_carlo_engine::context::Context;
use monte_carlo_engine::interpreter;
use monte_carlo_engine::io;
use monte_carlo_engine::registry::FunctionRegistry;
use monte_carlo_engine::scheduler;
use monte_carlo_engine::value::Value;
use monte_carlo_engine::ErrorKind;

fn prepare(json: &str) -> (monte_carlo_engine::program::Program, Context) {
    let raw = compiler::parse_recipe(json).unwrap();
    let functions = FunctionRegistry::with_builtins();
    let (program, _) = compiler::compile(raw, &functions).unwrap();
    let mut snapshot = Context::new(program.context_len);
    interpreter::run_steps(&program.pre_trial_steps, &mut snapshot).unwrap();
    (program, snapshot)
}

#[test]
fn arithmetic_fold_computes_a_left_to_right_sum() {
    let (program, snapshot) = prepare(
        r#"{
            "simulation_config": {"num_trials": 5},
            "output_variable": "total",
            "per_trial_steps": [
                {"type": "execution_assignment", "result": "total", "function": "add", "args": [
                    {"type": "scalar_literal", "value": 1},
                    {"type": "scalar_literal", "value": 2},
                    {"type": "scalar_literal", "value": 3},
                    {"type": "scalar_literal", "value": 4}
                ]}
            ]
        }"#,
    );
    let results = scheduler::run(&program, &snapshot, std::sync::Arc::new(())).unwrap();
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|v| *v == Value::Scalar(10.0)));
}

#[test]
fn scalar_broadcasts_over_a_vector_literal() {
    let (program, snapshot) = prepare(
        r#"{
            "simulation_config": {"num_trials": 1},
            "output_variable": "scaled",
            "per_trial_steps": [
                {"type": "execution_assignment", "result": "scaled", "function": "multiply", "args": [
                    {"type": "vector_literal", "value": [1, 2, 3]},
                    {"type": "scalar_literal", "value": 10}
                ]}
            ]
        }"#,
    );
    let results = scheduler::run(&program, &snapshot, std::sync::Arc::new(())).unwrap();
    assert_eq!(results[0], Value::Vector(vec![10.0, 20.0, 30.0]));
}

#[test]
fn nested_call_failure_reports_the_innermost_line_and_kind() {
    let (program, snapshot) = prepare(
        r#"{
            "simulation_config": {"num_trials": 1},
            "output_variable": "y",
            "per_trial_steps": [
                {"type": "execution_assignment", "result": "y", "function": "add", "line": 10, "args": [
                    {"type": "scalar_literal", "value": 1},
                    {"type": "execution_assignment", "function": "divide", "line": 11, "args": [
                        {"type": "scalar_literal", "value": 5},
                        {"type": "scalar_literal", "value": 0}
                    ]}
                ]}
            ]
        }"#,
    );
    let err = scheduler::run(&program, &snapshot, std::sync::Arc::new(())).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DivisionByZero);
    assert_eq!(err.line, Some(11));
    assert!(err.message.contains("L11"));
    assert!(err.message.contains("In nested function 'divide'"));
    assert!(err.message.contains("In function 'add'"));
}

#[test]
fn uniform_samples_converge_toward_the_midpoint_of_their_range() {
    let (program, snapshot) = prepare(
        r#"{
            "simulation_config": {"num_trials": 4000},
            "output_variable": "draw",
            "per_trial_steps": [
                {"type": "execution_assignment", "result": "draw", "function": "Uniform", "args": [
                    {"type": "scalar_literal", "value": 0},
                    {"type": "scalar_literal", "value": 10}
                ]}
            ]
        }"#,
    );
    let results = scheduler::run(&program, &snapshot, std::sync::Arc::new(())).unwrap();
    let sum: f64 = results.iter().map(|v| v.as_scalar().unwrap()).sum();
    let mean = sum / results.len() as f64;
    assert!((mean - 5.0).abs() < 0.5, "sample mean {mean} drifted too far from the expected midpoint");
}

#[test]
fn sir_model_shows_growing_infection_in_its_second_period() {
    let (program, snapshot) = prepare(
        r#"{
            "simulation_config": {"num_trials": 1},
            "output_variable": "infected",
            "per_trial_steps": [
                {"type": "execution_assignment", "result": ["susceptible", "infected", "recovered"], "function": "SirModel", "args": [
                    {"type": "scalar_literal", "value": 990},
                    {"type": "scalar_literal", "value": 10},
                    {"type": "scalar_literal", "value": 0},
                    {"type": "scalar_literal", "value": 0.3},
                    {"type": "scalar_literal", "value": 0.1},
                    {"type": "scalar_literal", "value": 5},
                    {"type": "scalar_literal", "value": 1}
                ]}
            ]
        }"#,
    );
    let results = scheduler::run(&program, &snapshot, std::sync::Arc::new(())).unwrap();
    let infected = results[0].as_vector().unwrap();
    assert!(infected[1] > infected[0]);
}

#[test]
fn preview_mode_reports_a_four_decimal_rounded_mean() {
    let (program, snapshot) = prepare(
        r#"{
            "simulation_config": {"num_trials": 3},
            "output_variable": "third",
            "per_trial_steps": [
                {"type": "execution_assignment", "result": "third", "function": "divide", "args": [
                    {"type": "scalar_literal", "value": 1},
                    {"type": "scalar_literal", "value": 3}
                ]}
            ]
        }"#,
    );
    let results = scheduler::run(&program, &snapshot, std::sync::Arc::new(())).unwrap();
    let summary = io::summarize(&results);
    assert_eq!(summary["type"], "scalar");
    assert_eq!(summary["value"], serde_json::json!(0.3333));
}

#[test]
fn legacy_index_addressed_recipe_round_trips_through_a_file() {
    let mut path = std::env::temp_dir();
    path.push("engine_scenarios_legacy_recipe.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(
        br#"{
            "simulation_config": {"num_trials": 1},
            "output_variable_index": 1,
            "variable_registry": ["base", "y"],
            "per_trial_steps": [
                {"type": "literal_assignment", "result": 0, "value": 21},
                {"type": "execution_assignment", "result": 1, "function": "multiply", "args": [
                    {"type": "variable_index", "value": 0},
                    {"type": "scalar_literal", "value": 2}
                ]}
            ]
        }"#,
    )
    .unwrap();

    let raw = io::read_recipe(&path).unwrap();
    let functions = FunctionRegistry::with_builtins();
    let (program, _) = compiler::compile(raw, &functions).unwrap();
    let mut snapshot = Context::new(program.context_len);
    interpreter::run_steps(&program.pre_trial_steps, &mut snapshot).unwrap();
    let results = scheduler::run(&program, &snapshot, std::sync::Arc::new(())).unwrap();
    assert_eq!(results[0], Value::Scalar(42.0));

    std::fs::remove_file(path).ok();
}
