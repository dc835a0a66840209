//! CSV persistence shared by the profile, food and log stores.
//!
//! Every write replaces the whole file: rows go to a temp file in the same
//! directory, which is synced and then renamed over the target.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::{Result, TrackerError};

pub const PROFILE_FILE: &str = "user_profile.csv";
pub const FOOD_FILE: &str = "food_data.csv";
pub const LOG_FILE: &str = "food_log.csv";

/// Locations of the three stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub profile: PathBuf,
    pub foods: PathBuf,
    pub log: PathBuf,
}

impl DataPaths {
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            profile: dir.join(PROFILE_FILE),
            foods: dir.join(FOOD_FILE),
            log: dir.join(LOG_FILE),
        }
    }
}

/// Storage error for the data row at `index`, reported by file line number.
pub(crate) fn bad_row(path: &Path, index: usize, reason: impl std::fmt::Display) -> TrackerError {
    TrackerError::storage(path, format!("bad row {}: {reason}", index + 2))
}

/// Read every data row, checking the header matches `columns` exactly.
pub(crate) fn read_rows<T: DeserializeOwned>(path: &Path, columns: &[&str]) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| TrackerError::storage(path, e))?;
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = rdr
        .headers()
        .map_err(|e| TrackerError::storage(path, format!("failed to read header: {e}")))?
        .clone();
    if headers.len() != columns.len() || headers.iter().zip(columns).any(|(h, c)| h != *c) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(TrackerError::storage(
            path,
            format!(
                "unexpected columns [{}], expected [{}]",
                found.join(", "),
                columns.join(", ")
            ),
        ));
    }

    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize().enumerate() {
        let row: T = result.map_err(|e| bad_row(path, index, e))?;
        rows.push(row);
    }
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded store");
    Ok(rows)
}

/// Atomically replace `path` with a header row followed by `rows`.
pub(crate) fn write_rows<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| TrackerError::storage(path, e))?;

    {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file_mut());
        wtr.write_record(columns)
            .map_err(|e| TrackerError::storage(path, e))?;
        for row in rows {
            wtr.serialize(row)
                .map_err(|e| TrackerError::storage(path, e))?;
        }
        wtr.flush().map_err(|e| TrackerError::storage(path, e))?;
    }

    tmp.as_file_mut()
        .flush()
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| TrackerError::storage(path, e))?;
    tmp.persist(path)
        .map_err(|e| TrackerError::storage(path, e.error))?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "saved store");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        name: String,
        value: f64,
    }

    const COLUMNS: &[&str] = &["name", "value"];

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let rows = vec![
            Row {
                name: "a".to_string(),
                value: 1.5,
            },
            Row {
                name: "b, with comma".to_string(),
                value: 0.0,
            },
        ];
        write_rows(&path, COLUMNS, &rows).unwrap();

        let loaded: Vec<Row> = read_rows(&path, COLUMNS).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_empty_store_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        write_rows::<Row>(&path, COLUMNS, &[]).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.trim(), "name,value");
        let loaded: Vec<Row> = read_rows(&path, COLUMNS).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        write_rows::<Row>(&path, COLUMNS, &[]).unwrap();
        write_rows(
            &path,
            COLUMNS,
            &[Row {
                name: "x".to_string(),
                value: 2.0,
            }],
        )
        .unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_wrong_header_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "title,amount\nx,1\n").unwrap();
        let err = read_rows::<Row>(&path, COLUMNS).unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("unexpected columns"));
    }

    #[test]
    fn test_corrupt_row_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        std::fs::write(&path, "name,value\nx,not-a-number\n").unwrap();
        let err = read_rows::<Row>(&path, COLUMNS).unwrap_err();
        assert!(err.is_storage());
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_missing_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rows::<Row>(&dir.path().join("nope.csv"), COLUMNS).unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_data_paths_in_dir() {
        let paths = DataPaths::in_dir(Path::new("/tmp/chow"));
        assert_eq!(paths.profile, Path::new("/tmp/chow/user_profile.csv"));
        assert_eq!(paths.foods, Path::new("/tmp/chow/food_data.csv"));
        assert_eq!(paths.log, Path::new("/tmp/chow/food_log.csv"));
    }
}
