use serde_json::json;
use serde_json::Value as Json;

use crate::value::Value;

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// summarises a completed run as the single-line JSON object the `--preview`
/// CLI mode prints: `{"status":"success","type":...,"value":...}`.
///
/// for a scalar output the value reported is the *mean across all trials*,
/// not just the first trial -- a preview run exists to give a quick sense of
/// where the distribution sits, and the mean is cheap to compute from
/// results already in hand. vector/boolean/string outputs report only the
/// first trial's value, since those results don't collapse to a single
/// representative number.
pub fn summarize(results: &[Value]) -> Json {
    let Some(first) = results.first() else {
        return json!({ "status": "error", "message": "no results were generated" });
    };

    match first {
        Value::Scalar(_) => {
            let sum: f64 = results.iter().filter_map(|v| v.as_scalar().ok()).sum();
            let mean = sum / results.len() as f64;
            json!({ "status": "success", "type": "scalar", "value": round4(mean) })
        }
        Value::Vector(v) => {
            let rounded: Vec<f64> = v.iter().map(|x| round4(*x)).collect();
            json!({ "status": "success", "type": "vector", "value": rounded })
        }
        Value::Bool(b) => json!({ "status": "success", "type": "boolean", "value": b }),
        Value::String(s) => json!({ "status": "success", "type": "string", "value": s }),
    }
}
