//! Flattens the nested per-paper corpus into one record per experimental
//! data point.
//!
//! Raw entries are navigated as loose JSON: the corpus is hand-curated and
//! inconsistently shaped, so every lookup tolerates an absent or oddly-typed
//! field and falls back to the missing marker.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info};

use crate::classify::classify_alloy;
use crate::domain::{AlloyCategory, FieldValue, FlatRecord, GroupedRecords};
use crate::extract::{extract_field, extract_numeric_value};

static UTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)UTS[:\s]*([0-9.\-]+)").unwrap());
static ELONGATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)elongation[:\s]*([0-9.\-]+)").unwrap());

/// UTS and elongation readings pulled out of the two free-text strength
/// blocks of a data item.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthReadings {
    pub uts_waam: FieldValue,
    pub uts_bm: FieldValue,
    pub elong_waam: FieldValue,
    pub elong_bm: FieldValue,
}

/// Locates a labeled numeric token (marker, optional punctuation, number)
/// inside a strength block and cleans the captured token.
fn labeled_number(marker: &Regex, block: Option<&str>) -> FieldValue {
    let Some(text) = block else {
        return FieldValue::Missing;
    };
    marker
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|token| extract_numeric_value(token.as_str()))
        .unwrap_or(FieldValue::Missing)
}

pub fn extract_strength(strength: &Value) -> StrengthReadings {
    let waam = block_text(strength.get("At WAAM Deposition"));
    let base = block_text(strength.get("At Base Material"));

    StrengthReadings {
        uts_waam: labeled_number(&UTS_RE, waam.as_deref()),
        uts_bm: labeled_number(&UTS_RE, base.as_deref()),
        elong_waam: labeled_number(&ELONGATION_RE, waam.as_deref()),
        elong_bm: labeled_number(&ELONGATION_RE, base.as_deref()),
    }
}

/// A strength block is usually a string but occasionally another JSON shape;
/// non-string blocks are searched through their serialized form.
fn block_text(block: Option<&Value>) -> Option<String> {
    match block {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Produces exactly one flat record for one data item, together with the
/// category its material identity classifies into.
pub fn flatten_item(serial: FieldValue, item: &Value) -> (AlloyCategory, FlatRecord) {
    let material_info = item.get("WAAM wise Material");
    let material = text_of(material_info.and_then(|m| m.get("Material")));
    let composition = text_of(material_info.and_then(|m| m.get("Composition")));
    let category = classify_alloy(&material, &composition);

    let params = item.get("Welding Parameters");
    let param = |key: &str| {
        params
            .and_then(|p| p.get(key))
            .map(extract_field)
            .unwrap_or(FieldValue::Missing)
    };

    let geometry = |key: &str| {
        item.get(key)
            .map(extract_field)
            .unwrap_or(FieldValue::Missing)
    };

    let strength = extract_strength(item.get("Strength").unwrap_or(&Value::Null));

    let record = FlatRecord {
        serial,
        heat_input: param("Heat Input (kJ/mm)"),
        power: param("Power(kW)"),
        travel_speed: param("Travel Speed (mm/s)"),
        wire_diameter: param("Wire Diameter (mm)"),
        uts_waam: strength.uts_waam,
        uts_bm: strength.uts_bm,
        elong_waam: strength.elong_waam,
        elong_bm: strength.elong_bm,
        bead_width: geometry("Bead Width"),
        bead_height: geometry("Bead Height"),
        overlap: geometry("Overlap (%)"),
    };

    (category, record)
}

/// Walks every raw entry and groups the flattened records under their
/// category label, preserving first-seen order within each category.
pub fn flatten_corpus(entries: &[Value]) -> GroupedRecords {
    let mut grouped = GroupedRecords::new();
    let mut total = 0usize;

    for entry in entries {
        let serial = entry
            .get("Serial No.")
            .map(FieldValue::from_raw)
            .unwrap_or(FieldValue::Missing);

        let Some(items) = entry.get("Data").and_then(|d| d.as_array()) else {
            debug!("entry without a Data list skipped serial={serial:?}");
            continue;
        };

        for item in items {
            let (category, record) = flatten_item(serial.clone(), item);
            grouped.entry(category).or_default().push(record);
            total += 1;
        }
    }

    info!(
        "flattened corpus entries={} records={} categories={}",
        entries.len(),
        total,
        grouped.len()
    );
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titanium_item() -> Value {
        json!({
            "WAAM wise Material": {
                "Material": "Ti-6Al-4V",
                "Composition": "Ti 90, Al 6, V 4"
            },
            "Welding Parameters": {
                "Heat Input (kJ/mm)": "10-12",
                "Power(kW)": "5",
                "Travel Speed (mm/s)": 8.5,
                "Wire Diameter (mm)": "1.2"
            },
            "Strength": {
                "At WAAM Deposition": "UTS: 450, Elongation: 12",
                "At Base Material": "UTS 900 MPa; elongation: 14%"
            },
            "Bead Height": "2.1",
            "Bead Width": "6.3-6.7",
            "Overlap (%)": ""
        })
    }

    #[test]
    fn flattens_one_record_per_data_item() {
        let (category, record) = flatten_item(FieldValue::Number(1.0), &titanium_item());
        assert_eq!(category, AlloyCategory::Titanium);
        assert_eq!(record.heat_input, FieldValue::Number(11.0));
        assert_eq!(record.power, FieldValue::Number(5.0));
        assert_eq!(record.travel_speed, FieldValue::Number(8.5));
        assert_eq!(record.wire_diameter, FieldValue::Number(1.2));
        assert_eq!(record.bead_height, FieldValue::Number(2.1));
        assert_eq!(record.bead_width, FieldValue::Number(6.5));
        assert_eq!(record.overlap, FieldValue::Missing);
    }

    #[test]
    fn strength_blocks_yield_labeled_readings() {
        let strength = extract_strength(&json!({
            "At WAAM Deposition": "UTS: 450, Elongation: 12",
            "At Base Material": "UTS 900 MPa; elongation: 14%"
        }));
        assert_eq!(strength.uts_waam, FieldValue::Number(450.0));
        assert_eq!(strength.elong_waam, FieldValue::Number(12.0));
        assert_eq!(strength.uts_bm, FieldValue::Number(900.0));
        assert_eq!(strength.elong_bm, FieldValue::Number(14.0));
    }

    #[test]
    fn absent_strength_markers_stay_missing() {
        let strength = extract_strength(&json!({
            "At WAAM Deposition": "comparable to wrought material",
            "At Base Material": ""
        }));
        assert_eq!(strength.uts_waam, FieldValue::Missing);
        assert_eq!(strength.elong_bm, FieldValue::Missing);
    }

    #[test]
    fn strength_range_token_collapses_to_midpoint() {
        let strength = extract_strength(&json!({
            "At WAAM Deposition": "UTS: 450-500"
        }));
        assert_eq!(strength.uts_waam, FieldValue::Number(475.0));
    }

    #[test]
    fn corpus_grouping_preserves_first_seen_order() {
        let entries = vec![
            json!({"Serial No.": 1, "Data": [titanium_item()]}),
            json!({"Serial No.": 2, "Data": [
                {"WAAM wise Material": {"Material": "Mild Steel", "Composition": ""}},
                titanium_item(),
            ]}),
            json!({"Serial No.": 3}),
        ];

        let grouped = flatten_corpus(&entries);
        let titanium = &grouped[&AlloyCategory::Titanium];
        assert_eq!(titanium.len(), 2);
        assert_eq!(titanium[0].serial, FieldValue::Number(1.0));
        assert_eq!(titanium[1].serial, FieldValue::Number(2.0));

        let steel = &grouped[&AlloyCategory::Steel];
        assert_eq!(steel.len(), 1);
        assert_eq!(steel[0].heat_input, FieldValue::Missing);
    }
}
