use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The fixed set of alloy categories a data item can be classified into.
///
/// Exactly one label is assigned per data item, and never recomputed
/// afterward; the label strings double as the derived-store keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlloyCategory {
    #[serde(rename = "Titanium Alloys")]
    Titanium,
    #[serde(rename = "Steel Alloys")]
    Steel,
    #[serde(rename = "Aluminum Alloys")]
    Aluminum,
    #[serde(rename = "Tin Alloys")]
    Tin,
    #[serde(rename = "Nickel Alloys")]
    Nickel,
    #[serde(rename = "Copper Alloys")]
    Copper,
    #[serde(rename = "Magnesium Alloys")]
    Magnesium,
    #[serde(rename = "Intermetallic Alloys")]
    Intermetallic,
    #[serde(rename = "Other Alloys")]
    Other,
}

impl AlloyCategory {
    pub const ALL: [AlloyCategory; 9] = [
        AlloyCategory::Titanium,
        AlloyCategory::Steel,
        AlloyCategory::Aluminum,
        AlloyCategory::Tin,
        AlloyCategory::Nickel,
        AlloyCategory::Copper,
        AlloyCategory::Magnesium,
        AlloyCategory::Intermetallic,
        AlloyCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AlloyCategory::Titanium => "Titanium Alloys",
            AlloyCategory::Steel => "Steel Alloys",
            AlloyCategory::Aluminum => "Aluminum Alloys",
            AlloyCategory::Tin => "Tin Alloys",
            AlloyCategory::Nickel => "Nickel Alloys",
            AlloyCategory::Copper => "Copper Alloys",
            AlloyCategory::Magnesium => "Magnesium Alloys",
            AlloyCategory::Intermetallic => "Intermetallic Alloys",
            AlloyCategory::Other => "Other Alloys",
        }
    }
}

impl fmt::Display for AlloyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A cleaned field: either a finite number, the original text when no numeric
/// interpretation was possible, or an explicit absent marker.
///
/// Downstream numeric consumers must handle all three variants; `Text` is
/// treated the same as `Missing` wherever a number is required.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Raw pass-through conversion, with no extraction heuristics applied.
    /// Used for identity fields like serial numbers.
    pub fn from_raw(value: &serde_json::Value) -> FieldValue {
        match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Text(n.to_string()),
            },
            serde_json::Value::String(s) if s.is_empty() => FieldValue::Missing,
            serde_json::Value::String(s) => FieldValue::Text(s.clone()),
            serde_json::Value::Null => FieldValue::Missing,
            other => FieldValue::Text(other.to_string()),
        }
    }
}

// The store format writes numbers as numbers, unparsed text verbatim, and
// absent fields as the empty string, so a serialized record is exactly the
// row shape the charts re-read.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Text(t) => serializer.serialize_str(t),
            FieldValue::Missing => serializer.serialize_str(""),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .ok_or_else(|| de::Error::custom("number does not fit in an f64")),
            serde_json::Value::String(s) if s.is_empty() => Ok(FieldValue::Missing),
            serde_json::Value::String(s) => Ok(FieldValue::Text(s)),
            serde_json::Value::Null => Ok(FieldValue::Missing),
            other => Err(de::Error::custom(format!(
                "expected a number or string field, got {other}"
            ))),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(t) => f.write_str(t),
            FieldValue::Missing => Ok(()),
        }
    }
}

/// One flat row per experimental data item. Field names reproduce the
/// column headers of the derived store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatRecord {
    #[serde(rename = "Serial No.", default)]
    pub serial: FieldValue,
    #[serde(rename = "Heat Input (kJ/mm)", default)]
    pub heat_input: FieldValue,
    #[serde(rename = "Power(kW)", default)]
    pub power: FieldValue,
    #[serde(rename = "Travel Speed (mm/s)", default)]
    pub travel_speed: FieldValue,
    #[serde(rename = "Wire Diameter (mm)", default)]
    pub wire_diameter: FieldValue,
    #[serde(rename = "UTS(WAAM)(MPa)", default)]
    pub uts_waam: FieldValue,
    #[serde(rename = "UTS(BM)(MPa)", default)]
    pub uts_bm: FieldValue,
    #[serde(rename = "Elong(WAAM)(%)", default)]
    pub elong_waam: FieldValue,
    #[serde(rename = "Elong(BM)(%)", default)]
    pub elong_bm: FieldValue,
    #[serde(rename = "Bead Width(mm)", default)]
    pub bead_width: FieldValue,
    #[serde(rename = "Bead Height(mm)", default)]
    pub bead_height: FieldValue,
    #[serde(rename = "Overlap(%)", default)]
    pub overlap: FieldValue,
}

/// Flat records grouped under their alloy-category label, in first-seen
/// order within each category. A BTreeMap keeps the serialized store
/// identical run to run.
pub type GroupedRecords = BTreeMap<AlloyCategory, Vec<FlatRecord>>;

/// The numeric columns a chart can draw or filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    HeatInput,
    Power,
    TravelSpeed,
    WireDiameter,
    UtsWaam,
    UtsBm,
    ElongWaam,
    ElongBm,
    BeadWidth,
    BeadHeight,
    Overlap,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::HeatInput => "Heat Input",
            Metric::Power => "Power",
            Metric::TravelSpeed => "Travel Speed",
            Metric::WireDiameter => "Wire Diameter",
            Metric::UtsWaam => "UTS (WAAM)",
            Metric::UtsBm => "UTS (BM)",
            Metric::ElongWaam => "Elongation (WAAM)",
            Metric::ElongBm => "Elongation (BM)",
            Metric::BeadWidth => "Bead Width",
            Metric::BeadHeight => "Bead Height",
            Metric::Overlap => "Overlap",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::HeatInput => "kJ/mm",
            Metric::Power => "kW",
            Metric::TravelSpeed => "mm/s",
            Metric::WireDiameter => "mm",
            Metric::UtsWaam | Metric::UtsBm => "MPa",
            Metric::ElongWaam | Metric::ElongBm => "%",
            Metric::BeadWidth | Metric::BeadHeight => "mm",
            Metric::Overlap => "%",
        }
    }

    pub fn axis_label(&self) -> String {
        format!("{} ({})", self.label(), self.unit())
    }

    pub fn value<'a>(&self, record: &'a FlatRecord) -> &'a FieldValue {
        match self {
            Metric::HeatInput => &record.heat_input,
            Metric::Power => &record.power,
            Metric::TravelSpeed => &record.travel_speed,
            Metric::WireDiameter => &record.wire_diameter,
            Metric::UtsWaam => &record.uts_waam,
            Metric::UtsBm => &record.uts_bm,
            Metric::ElongWaam => &record.elong_waam,
            Metric::ElongBm => &record.elong_bm,
            Metric::BeadWidth => &record.bead_width,
            Metric::BeadHeight => &record.bead_height,
            Metric::Overlap => &record.overlap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_value_round_trips_through_store_format() {
        let number = serde_json::to_value(FieldValue::Number(11.0)).unwrap();
        assert_eq!(number, json!(11.0));
        let text = serde_json::to_value(FieldValue::Text("Peak: n/a".into())).unwrap();
        assert_eq!(text, json!("Peak: n/a"));
        let missing = serde_json::to_value(FieldValue::Missing).unwrap();
        assert_eq!(missing, json!(""));

        assert_eq!(
            serde_json::from_value::<FieldValue>(json!(11.0)).unwrap(),
            FieldValue::Number(11.0)
        );
        assert_eq!(
            serde_json::from_value::<FieldValue>(json!("")).unwrap(),
            FieldValue::Missing
        );
        assert_eq!(
            serde_json::from_value::<FieldValue>(json!("Peak: n/a")).unwrap(),
            FieldValue::Text("Peak: n/a".into())
        );
    }

    #[test]
    fn category_labels_are_store_keys() {
        assert_eq!(AlloyCategory::Titanium.label(), "Titanium Alloys");
        assert_eq!(
            serde_json::to_value(AlloyCategory::Other).unwrap(),
            json!("Other Alloys")
        );
        let back: AlloyCategory = serde_json::from_value(json!("Steel Alloys")).unwrap();
        assert_eq!(back, AlloyCategory::Steel);
    }

    #[test]
    fn flat_record_uses_original_column_names() {
        let record = FlatRecord {
            serial: FieldValue::Number(3.0),
            heat_input: FieldValue::Number(11.0),
            ..FlatRecord::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Serial No."], json!(3.0));
        assert_eq!(value["Heat Input (kJ/mm)"], json!(11.0));
        assert_eq!(value["Power(kW)"], json!(""));
    }
}
