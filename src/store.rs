//! File-backed JSON stores.
//!
//! The raw corpus is read once per run; the derived store is serialized
//! fully in memory and written in a single call, so either the whole store
//! lands on disk or the run fails with the offending path in the error.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::domain::GroupedRecords;
use crate::error::{ExtractorError, Result};

fn read_json(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path).map_err(|source| ExtractorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| ExtractorError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the raw corpus: an ordered array of per-paper entries.
pub fn load_raw_store(path: &Path) -> Result<Vec<Value>> {
    match read_json(path)? {
        Value::Array(entries) => {
            info!("loaded raw store path={} entries={}", path.display(), entries.len());
            Ok(entries)
        }
        _ => Err(ExtractorError::Store(format!(
            "{} is not an array of records",
            path.display()
        ))),
    }
}

/// Writes the grouped derived store.
pub fn write_derived_store(path: &Path, grouped: &GroupedRecords) -> Result<()> {
    write_json_artifact(path, grouped)
}

/// Re-reads the grouped derived store for a chart run.
pub fn load_derived_store(path: &Path) -> Result<GroupedRecords> {
    let value = read_json(path)?;
    serde_json::from_value(value).map_err(|source| ExtractorError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes any artifact to pretty-printed JSON in one write.
pub fn write_json_artifact<T: Serialize>(path: &Path, artifact: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(artifact)?;
    fs::write(path, body).map_err(|source| ExtractorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote artifact path={}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AlloyCategory, FieldValue, FlatRecord};
    use serde_json::json;

    #[test]
    fn derived_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("derived.json");

        let mut grouped = GroupedRecords::new();
        grouped.entry(AlloyCategory::Titanium).or_default().push(FlatRecord {
            serial: FieldValue::Number(1.0),
            heat_input: FieldValue::Number(11.0),
            uts_waam: FieldValue::Text("not reported".into()),
            ..FlatRecord::default()
        });

        write_derived_store(&path, &grouped).unwrap();
        let reloaded = load_derived_store(&path).unwrap();
        assert_eq!(reloaded, grouped);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_raw_store(Path::new("does-not-exist.json")).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.json"));
    }

    #[test]
    fn non_array_raw_store_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.json");
        std::fs::write(&path, json!({"Serial No.": 1}).to_string()).unwrap();
        assert!(matches!(
            load_raw_store(&path),
            Err(ExtractorError::Store(_))
        ));
    }
}
