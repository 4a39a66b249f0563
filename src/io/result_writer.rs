use std::io::Write;
use std::path::Path;

use log::warn;

use crate::error::EngineError;
use crate::error::ErrorKind;
use crate::value::Value;

/// writes trial results to a CSV file, shaped by the type of the first
/// trial's value: scalar/boolean get a single `Result` column, vectors get
/// one `Period_N` column per element. rows whose vector length disagrees
/// with the first trial's are skipped with a warning, matching how the
/// engine already tolerates a handful of malformed trials rather than
/// failing the whole write.
pub fn write_results_csv(path: &Path, results: &[Value]) -> Result<(), EngineError> {
    let Some(first) = results.first() else {
        return Ok(());
    };

    let mut file = std::fs::File::create(path).map_err(|e| {
        EngineError::new(ErrorKind::OutputFileWriteFailed, format!("could not open output file '{}' for writing: {e}", path.display()))
    })?;

    let write_err = |e: std::io::Error| {
        EngineError::new(ErrorKind::OutputFileWriteFailed, format!("failed writing to '{}': {e}", path.display()))
    };

    match first {
        Value::Scalar(_) => {
            writeln!(file, "Result").map_err(write_err)?;
            for result in results {
                let v = result.as_scalar().map_err(|_| {
                    EngineError::new(ErrorKind::MismatchedArgumentType, "inconsistent result types across trials")
                })?;
                writeln!(file, "{v}").map_err(write_err)?;
            }
        }
        Value::Bool(_) => {
            writeln!(file, "Result").map_err(write_err)?;
            for result in results {
                let v = result.as_bool().map_err(|_| {
                    EngineError::new(ErrorKind::MismatchedArgumentType, "inconsistent result types across trials")
                })?;
                writeln!(file, "{}", if v { "true" } else { "false" }).map_err(write_err)?;
            }
        }
        Value::String(_) => {
            writeln!(file, "Result").map_err(write_err)?;
            for result in results {
                let v = result.as_string().map_err(|_| {
                    EngineError::new(ErrorKind::MismatchedArgumentType, "inconsistent result types across trials")
                })?;
                writeln!(file, "{v}").map_err(write_err)?;
            }
        }
        Value::Vector(first_vec) => {
            if first_vec.is_empty() {
                return Ok(());
            }
            let header: Vec<String> = (1..=first_vec.len()).map(|i| format!("Period_{i}")).collect();
            writeln!(file, "{}", header.join(",")).map_err(write_err)?;
            for result in results {
                let Ok(vec) = result.as_vector() else {
                    warn!("skipping trial with non-vector result while writing vector output");
                    continue;
                };
                if vec.len() != first_vec.len() {
                    warn!("skipping trial with {} periods, expected {}", vec.len(), first_vec.len());
                    continue;
                }
                let row: Vec<String> = vec.iter().map(|v| v.to_string()).collect();
                writeln!(file, "{}", row.join(",")).map_err(write_err)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        path
    }

    #[test]
    fn scalar_results_get_a_single_column() {
        let path = temp_path("engine_result_writer_scalar.csv");
        write_results_csv(&path, &[Value::Scalar(1.0), Value::Scalar(2.5)]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Result\n1\n2.5\n");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn vector_results_get_period_columns_and_skip_mismatched_rows() {
        let path = temp_path("engine_result_writer_vector.csv");
        write_results_csv(
            &path,
            &[Value::Vector(vec![1.0, 2.0]), Value::Vector(vec![3.0, 4.0]), Value::Vector(vec![5.0])],
        )
        .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Period_1,Period_2\n1,2\n3,4\n");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn empty_results_write_nothing() {
        let path = temp_path("engine_result_writer_empty.csv");
        write_results_csv(&path, &[]).unwrap();
        assert!(!path.exists());
    }
}
