//! Secondary extraction: authors' institutes per paper serial number.
//!
//! A few corpus entries carry the institute directly instead of inside the
//! "Data" list; both shapes are walked.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::domain::FieldValue;
use crate::store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstituteRecord {
    #[serde(rename = "Serial No.")]
    pub serial: FieldValue,
    #[serde(rename = "Authors Institute")]
    pub institute: String,
}

/// Collects every non-empty institute field, keeping corpus order.
pub fn extract_institutes(entries: &[Value]) -> Vec<InstituteRecord> {
    let mut records = Vec::new();

    for entry in entries {
        let serial = entry
            .get("Serial No.")
            .map(FieldValue::from_raw)
            .unwrap_or(FieldValue::Missing);

        match entry.get("Data").and_then(|d| d.as_array()) {
            Some(items) => {
                for item in items {
                    if let Some(institute) = institute_of(item) {
                        records.push(InstituteRecord {
                            serial: serial.clone(),
                            institute,
                        });
                    }
                }
            }
            // Institute carried directly on the entry.
            None => {
                if let Some(institute) = institute_of(entry) {
                    records.push(InstituteRecord { serial, institute });
                }
            }
        }
    }

    records
}

fn institute_of(item: &Value) -> Option<String> {
    item.get("Authors Institute")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Full authors run: load the raw corpus, extract, write the artifact, and
/// preview the first few entries.
pub fn run_authors(raw_path: &Path, output_path: &Path) -> Result<()> {
    let entries = store::load_raw_store(raw_path)
        .with_context(|| format!("failed to load raw store {}", raw_path.display()))?;

    let records = extract_institutes(&entries);
    store::write_json_artifact(output_path, &records)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    println!("Successfully extracted {} entries", records.len());
    println!("Data saved to: {}", output_path.display());

    println!("\nFirst 5 entries:");
    for (index, record) in records.iter().take(5).enumerate() {
        println!("{}. Serial No.: {}", index + 1, record.serial);
        println!("   Authors Institute: {}", record.institute);
        println!();
    }

    info!("authors extraction finished records={}", records.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_institutes_from_both_shapes() {
        let entries = vec![
            json!({
                "Serial No.": 1,
                "Data": [
                    {"Authors Institute": "Cranfield University"},
                    {"Authors Institute": ""},
                    {"Welding Parameters": {}}
                ]
            }),
            json!({"Serial No.": 2, "Authors Institute": "IIT Bombay"}),
            json!({"Serial No.": 3, "Data": []}),
        ];

        let records = extract_institutes(&entries);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].institute, "Cranfield University");
        assert_eq!(records[0].serial, FieldValue::Number(1.0));
        assert_eq!(records[1].institute, "IIT Bombay");
    }
}
