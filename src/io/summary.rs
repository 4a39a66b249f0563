use log::warn;

use crate::value::Value;

/// human-readable statistics printed to stdout after a non-preview run.
pub fn print_statistics(results: &[Value]) {
    let Some(first) = results.first() else {
        println!("No simulation data to analyze.");
        return;
    };

    match first {
        Value::Scalar(_) => print_scalar_statistics(results),
        Value::Vector(v) => print_vector_statistics(results, v.len()),
        Value::Bool(_) | Value::String(_) => {
            println!("\n--- Simulation Statistics ---");
            println!("Trials: {}", results.len());
            println!("(statistical summary is only computed for scalar and vector outputs)");
        }
    }
}

fn print_scalar_statistics(results: &[Value]) {
    let data: Vec<f64> = results.iter().filter_map(|v| v.as_scalar().ok()).collect();
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();
    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    println!("\n--- SCALAR Simulation Statistics ---");
    println!("Trials:     {}", data.len());
    println!("Mean:       {mean}");
    println!("Std. Dev:   {stddev}");
    println!("Min Value:  {min}");
    println!("Max Value:  {max}");
}

fn print_vector_statistics(results: &[Value], num_periods: usize) {
    println!("\n--- VECTOR Simulation Statistics ---");
    if num_periods == 0 {
        println!("Result vectors are empty.");
        return;
    }

    let mut mean = vec![0.0; num_periods];
    let mut counted = 0usize;
    for result in results {
        let Ok(vec) = result.as_vector() else { continue };
        if vec.len() != num_periods {
            warn!("inconsistent vector size in results, skipping trial");
            continue;
        }
        for (slot, value) in mean.iter_mut().zip(vec) {
            *slot += value;
        }
        counted += 1;
    }
    for slot in mean.iter_mut() {
        *slot /= counted as f64;
    }

    let mut stddev = vec![0.0; num_periods];
    for result in results {
        let Ok(vec) = result.as_vector() else { continue };
        if vec.len() != num_periods {
            continue;
        }
        for ((slot, value), m) in stddev.iter_mut().zip(vec).zip(&mean) {
            *slot += (value - m).powi(2);
        }
    }
    for slot in stddev.iter_mut() {
        *slot = (*slot / counted as f64).sqrt();
    }

    println!("Trials: {}, Periods per trial: {num_periods}", results.len());
    for (i, (m, s)) in mean.iter().zip(&stddev).enumerate() {
        println!("  Period {}: Mean = {m}, Std. Dev = {s}", i + 1);
    }
}
