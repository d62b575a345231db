use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use glob::glob;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::InputError;

/// Values read from one input file, named after the file stem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Reads one numeric column from a CSV file with a header row.
///
/// `column` is zero-based; `None` takes the last column of each row. Rows whose
/// cell is missing, unparsable or not finite are skipped, as are lines that
/// are not valid UTF-8.
pub fn load_values(path: &Path, column: Option<usize>) -> Result<Vec<f64>, InputError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut values = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                debug!(path = %path.display(), line = index + 1, "skipping row that is not valid UTF-8");
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if index == 0 {
            continue; // header
        }
        let parts: Vec<&str> = line.split(',').collect();
        let cell = match column {
            Some(c) => parts.get(c),
            None => parts.last(),
        };
        match cell.map(|c| c.trim().parse::<f64>()) {
            Some(Ok(v)) if v.is_finite() => values.push(v),
            _ => debug!(path = %path.display(), line = index + 1, "skipping row without a numeric value"),
        }
    }
    Ok(values)
}

/// Loads every file matching `pattern`, in path order.
///
/// Files that cannot be read are logged and skipped. Fails when nothing could
/// be loaded at all.
pub fn load_glob(pattern: &str, column: Option<usize>) -> Result<Vec<Series>, InputError> {
    let mut series = Vec::new();

    for entry in glob(pattern)? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                continue;
            }
        };

        match load_values(&path, column) {
            Ok(values) => {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                debug!(name = %name, count = values.len(), "loaded series");
                series.push(Series { name, values });
            }
            Err(e) => warn!("Skipping {} because of read error: {}", path.display(), e),
        }
    }

    if series.is_empty() {
        return Err(InputError::NoInput {
            pattern: pattern.to_string(),
        });
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_last_column_and_skips_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, "date,open,close\n2024-01-01,1.0,2.5\n2024-01-02,1.5,3.5\n").unwrap();

        assert_eq!(load_values(&path, None).unwrap(), vec![2.5, 3.5]);
        assert_eq!(load_values(&path, Some(1)).unwrap(), vec![1.0, 1.5]);
    }

    #[test]
    fn skips_rows_without_a_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("values.csv");
        fs::write(&path, "value\n1\n\nn/a\n NaN\n2.5 \ninf\n-4\n").unwrap();

        assert_eq!(load_values(&path, None).unwrap(), vec![1.0, 2.5, -4.0]);
    }

    #[test]
    fn missing_column_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.csv");
        fs::write(&path, "a,b\n1,2\n3\n").unwrap();

        assert_eq!(load_values(&path, Some(1)).unwrap(), vec![2.0]);
    }

    #[test]
    fn skips_lines_that_are_not_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.csv");
        fs::write(&path, b"v\n1\n\xff\n2\n").unwrap();

        assert_eq!(load_values(&path, None).unwrap(), vec![1.0, 2.0]);

        let pattern = format!("{}/*.csv", dir.path().display());
        let series = load_glob(&pattern, None).unwrap();
        assert_eq!(series[0].values, vec![1.0, 2.0]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = load_values(&dir.path().join("absent.csv"), None).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }

    #[test]
    fn glob_loads_each_file_in_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "v\n3\n4\n").unwrap();
        fs::write(dir.path().join("a.csv"), "v\n1\n2\n").unwrap();
        fs::write(dir.path().join("ignored.txt"), "v\n9\n").unwrap();

        let pattern = format!("{}/*.csv", dir.path().display());
        let series = load_glob(&pattern, None).unwrap();
        assert_eq!(
            series,
            vec![
                Series { name: "a".into(), values: vec![1.0, 2.0] },
                Series { name: "b".into(), values: vec![3.0, 4.0] },
            ]
        );
    }

    #[test]
    fn glob_without_matches_is_no_input() {
        let dir = tempdir().unwrap();
        let pattern = format!("{}/*.csv", dir.path().display());
        assert!(matches!(
            load_glob(&pattern, None),
            Err(InputError::NoInput { .. })
        ));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        assert!(matches!(load_glob("[", None), Err(InputError::Pattern(_))));
    }
}
