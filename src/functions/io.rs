use crate::csv_cache;
use crate::error::EngineError;
use crate::error::EngineResult;
use crate::error::ErrorKind;
use crate::executable::single;
use crate::executable::Executable;
use crate::registry::FunctionRegistry;
use crate::value::Value;

pub fn register(registry: &mut FunctionRegistry) {
    registry.register("read_csv_vector", || Box::new(ReadCsvVector));
    registry.register("read_csv_scalar", || Box::new(ReadCsvScalar));
}

struct ReadCsvVector;

impl Executable for ReadCsvVector {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        if args.len() != 2 {
            return Err(EngineError::new(
                ErrorKind::IncorrectArgumentCount,
                "'read_csv_vector' requires 2 arguments",
            ));
        }
        let path = args[0].as_string()?;
        let column = args[1].as_string()?;
        let table = csv_cache::get_or_load(path)?;
        let values = table.column(path, column)?;
        Ok(single(Value::Vector(values)))
    }
}

struct ReadCsvScalar;

impl Executable for ReadCsvScalar {
    fn execute(&self, args: &[Value]) -> EngineResult<Vec<Value>> {
        if args.len() != 3 {
            return Err(EngineError::new(
                ErrorKind::IncorrectArgumentCount,
                "'read_csv_scalar' requires 3 arguments",
            ));
        }
        let path = args[0].as_string()?;
        let column = args[1].as_string()?;
        let row_index = args[2].as_scalar()? as usize;
        let table = csv_cache::get_or_load(path)?;
        let value = table.cell(path, column, row_index)?;
        Ok(single(Value::Scalar(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_full_column_as_vector() {
        let path = write_temp_csv("engine_io_test_vector.csv", "price\n10\n20\n30\n");
        let path_str = path.to_str().unwrap().to_string();
        let out = ReadCsvVector
            .execute(&[Value::String(path_str), Value::String("price".into())])
            .unwrap();
        assert_eq!(out, vec![Value::Vector(vec![10.0, 20.0, 30.0])]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn reads_single_cell_as_scalar() {
        let path = write_temp_csv("engine_io_test_scalar.csv", "price\n10\n20\n");
        let path_str = path.to_str().unwrap().to_string();
        let out = ReadCsvScalar
            .execute(&[Value::String(path_str), Value::String("price".into()), Value::Scalar(1.0)])
            .unwrap();
        assert_eq!(out, vec![Value::Scalar(20.0)]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ReadCsvVector
            .execute(&[Value::String("/nonexistent/path.csv".into()), Value::String("x".into())])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::CsvFileNotFound);
    }
}
