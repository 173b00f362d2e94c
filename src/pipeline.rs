//! Orchestration of the two batch runs: extraction (raw store -> derived
//! store) and chart rendering (derived store -> PNG + stdout diagnostics).
//!
//! Each run is independent and idempotent; re-running with unchanged input
//! produces identical output.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::charts::ChartSpec;
use crate::domain::GroupedRecords;
use crate::filter;
use crate::flatten;
use crate::plot;
use crate::report;
use crate::store;

/// Outcome of an extraction run, for the CLI summary.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub raw_entries: usize,
    pub total_records: usize,
    pub categories: usize,
}

/// Flattens the raw corpus and writes the derived store. Either the whole
/// store is written or the run fails.
pub fn run_extraction(raw_path: &Path, derived_path: &Path) -> Result<ExtractionOutcome> {
    let entries = store::load_raw_store(raw_path)
        .with_context(|| format!("failed to load raw store {}", raw_path.display()))?;
    println!("Loaded {} with {} entries", raw_path.display(), entries.len());

    let grouped = flatten::flatten_corpus(&entries);
    store::write_derived_store(derived_path, &grouped)
        .with_context(|| format!("failed to write derived store {}", derived_path.display()))?;

    let outcome = ExtractionOutcome {
        raw_entries: entries.len(),
        total_records: grouped.values().map(Vec::len).sum(),
        categories: grouped.len(),
    };

    println!("\nSuccessfully extracted alloy-wise data");
    println!("Output saved to: {}", derived_path.display());
    report::print_extraction_summary(&grouped);

    info!(
        "extraction finished entries={} records={}",
        outcome.raw_entries, outcome.total_records
    );
    Ok(outcome)
}

/// Runs one chart: load, project, filter, report, render.
pub fn run_chart(spec: &ChartSpec, derived_path: &Path, output_dir: &Path) -> Result<()> {
    let grouped = load_for_chart(spec, derived_path)?;

    let points = filter::chart_points(&grouped, spec);
    println!(
        "Loaded {} data points with valid {} and {} values",
        points.len(),
        spec.y.label(),
        spec.x.label()
    );

    println!("\nHandling outliers...");
    let (survivors, filter_report) = filter::apply(points, spec);
    report::print_filter_report(spec, &filter_report);

    let ys: Vec<f64> = survivors.iter().map(|p| p.y).collect();
    let xs: Vec<f64> = survivors.iter().map(|p| p.x).collect();
    report::print_metric_stats(spec.y, &ys);
    report::print_metric_stats(spec.x, &xs);

    report::print_category_summary(spec, &survivors);

    let output = output_dir.join(spec.output_file);
    plot::render_scatter(spec, &survivors, &output)
        .with_context(|| format!("failed to render {}", output.display()))?;

    if !survivors.is_empty() {
        println!("\nPlot saved as '{}'", output.display());
    }
    Ok(())
}

fn load_for_chart(spec: &ChartSpec, derived_path: &Path) -> Result<GroupedRecords> {
    println!(
        "Loading WAAM alloy data for {} vs {}...",
        spec.y.label(),
        spec.x.label()
    );
    store::load_derived_store(derived_path)
        .with_context(|| format!("failed to load derived store {}", derived_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts;
    use serde_json::json;

    #[test]
    fn extraction_then_chart_run_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("WAAM.json");
        let derived = dir.path().join("WAAM_alloy_data.json");

        let corpus = json!([{
            "Serial No.": 1,
            "Data": [{
                "WAAM wise Material": {"Material": "Ti-6Al-4V", "Composition": ""},
                "Welding Parameters": {
                    "Heat Input (kJ/mm)": "10-12",
                    "Power(kW)": "5",
                    "Travel Speed (mm/s)": "8"
                },
                "Bead Height": "2.0"
            }]
        }]);
        std::fs::write(&raw, corpus.to_string()).unwrap();

        run_extraction(&raw, &derived).unwrap();
        let first = std::fs::read_to_string(&derived).unwrap();
        run_extraction(&raw, &derived).unwrap();
        let second = std::fs::read_to_string(&derived).unwrap();
        assert_eq!(first, second);

        run_chart(&charts::HEAT_INPUT_VS_BEAD_HEIGHT, &derived, dir.path()).unwrap();
        assert!(dir.path().join("heat_input_vs_bead_height_plot.png").exists());
    }

    #[test]
    fn missing_raw_store_is_fatal_with_cause() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_extraction(
            &dir.path().join("absent.json"),
            &dir.path().join("out.json"),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }
}
