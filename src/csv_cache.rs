use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::OnceLock;

use crate::error::EngineError;
use crate::error::ErrorKind;

/// a CSV file loaded once and indexed by column name.
///
/// rows keep their raw string cells; numeric conversion happens lazily at
/// read time so a file can be shared between a vector read and a scalar
/// read without committing to a single target type up front.
pub struct CachedCsv {
    pub header: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl CachedCsv {
    fn load(path: &str) -> Result<Self, EngineError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            EngineError::new(ErrorKind::CsvFileNotFound, format!("failed to read CSV file '{path}': {e}"))
        })?;
        let header: Vec<String> = reader
            .headers()
            .map_err(|e| EngineError::new(ErrorKind::CsvFileNotFound, format!("failed to read CSV file '{path}': {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| {
                EngineError::new(ErrorKind::CsvFileNotFound, format!("failed to parse CSV file '{path}': {e}"))
            })?;
            let mut row = HashMap::with_capacity(header.len());
            for (name, cell) in header.iter().zip(record.iter()) {
                row.insert(name.clone(), cell.to_string());
            }
            rows.push(row);
        }
        Ok(Self { header, rows })
    }

    pub fn column(&self, path: &str, column: &str) -> Result<Vec<f64>, EngineError> {
        if !self.header.iter().any(|h| h == column) {
            return Err(EngineError::new(
                ErrorKind::CsvColumnNotFound,
                format!("column '{column}' not found in file '{path}'"),
            ));
        }
        self.rows
            .iter()
            .map(|row| {
                row.get(column).unwrap().trim().parse::<f64>().map_err(|e| {
                    EngineError::new(
                        ErrorKind::CsvConversionError,
                        format!("error converting data to number in column '{column}' from file '{path}': {e}"),
                    )
                })
            })
            .collect()
    }

    pub fn cell(&self, path: &str, column: &str, row_index: usize) -> Result<f64, EngineError> {
        let row = self.rows.get(row_index).ok_or_else(|| {
            EngineError::new(
                ErrorKind::CsvRowIndexOutOfBounds,
                format!(
                    "row index {row_index} is out of bounds for file '{path}' (file has {} data rows)",
                    self.rows.len()
                ),
            )
        })?;
        let cell = row.get(column).ok_or_else(|| {
            EngineError::new(ErrorKind::CsvColumnNotFound, format!("column '{column}' not found in file '{path}'"))
        })?;
        cell.trim()
            .parse::<f64>()
            .map_err(|e| {
                EngineError::new(
                    ErrorKind::CsvConversionError,
                    format!("error converting data to number at row {row_index}, column '{column}' in file '{path}': {e}"),
                )
            })
    }
}

/// process-wide path -> parsed table cache, append-only for the process's
/// lifetime. the pre-trial phase is currently single-threaded but the mutex
/// keeps this sound if that ever changes.
static CACHE: OnceLock<Mutex<HashMap<String, std::sync::Arc<CachedCsv>>>> = OnceLock::new();

fn cache() -> &'static Mutex<HashMap<String, std::sync::Arc<CachedCsv>>> {
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

pub fn get_or_load(path: &str) -> Result<std::sync::Arc<CachedCsv>, EngineError> {
    let mut guard = cache().lock().expect("csv cache mutex poisoned");
    if let Some(table) = guard.get(path) {
        return Ok(table.clone());
    }
    let table = std::sync::Arc::new(CachedCsv::load(path)?);
    guard.insert(path.to_string(), table.clone());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("engine_csv_cache_test_{:?}.csv", std::thread::current().id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_and_caches_by_path() {
        let path = write_temp_csv("a,b\n1,2\n3,4\n");
        let path_str = path.to_str().unwrap();
        let first = get_or_load(path_str).unwrap();
        let second = get_or_load(path_str).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(first.column(path_str, "a").unwrap(), vec![1.0, 3.0]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_column_is_reported() {
        let path = write_temp_csv("a,b\n1,2\n");
        let path_str = path.to_str().unwrap();
        let table = get_or_load(path_str).unwrap();
        let err = table.column(path_str, "c").unwrap_err();
        assert_eq!(err.kind, ErrorKind::CsvColumnNotFound);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn row_out_of_bounds_is_reported() {
        let path = write_temp_csv("a\n1\n");
        let path_str = path.to_str().unwrap();
        let table = get_or_load(path_str).unwrap();
        let err = table.cell(path_str, "a", 5).unwrap_err();
        assert_eq!(err.kind, ErrorKind::CsvRowIndexOutOfBounds);
        std::fs::remove_file(path).ok();
    }
}
