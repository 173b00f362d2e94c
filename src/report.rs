//! Human-facing diagnostics on stdout.
//!
//! Everything here is presentation over already-computed data; a reporting
//! line can never change what was filtered or extracted.

use crate::charts::ChartSpec;
use crate::domain::{AlloyCategory, GroupedRecords, Metric};
use crate::filter::{DataPoint, FilterReport};
use crate::stats;

/// Stage-by-stage shape of the filtered dataset plus per-column outlier
/// diagnostics.
pub fn print_filter_report(spec: &ChartSpec, report: &FilterReport) {
    println!("Original data shape: {} rows", report.input_rows);
    println!(
        "After manual filtering: {} points",
        report.after_manual
    );
    for column in &report.columns {
        println!(
            "{} outliers (IQR method): {} (bounds {:.2} to {:.2})",
            column.column, column.iqr_outliers, column.bounds.lower, column.bounds.upper
        );
        println!(
            "{} outliers (Z-score method, threshold {:.1}): {}",
            column.column, spec.z_threshold, column.z_outliers
        );
    }
    println!("Data shape after outlier removal: {} rows", report.after_statistical);
}

/// Min/max/mean of one metric over the surviving rows.
pub fn print_metric_stats(metric: Metric, values: &[f64]) {
    println!("\n{} statistics:", metric.label());
    match (stats::min(values), stats::max(values), stats::mean(values)) {
        (Some(min), Some(max), Some(mean)) => {
            println!("Min: {:.2} {}", min, metric.unit());
            println!("Max: {:.2} {}", max, metric.unit());
            println!("Mean: {:.2} {}", mean, metric.unit());
        }
        _ => println!("no data"),
    }
}

/// Per-category counts, ranges, means, and (for the WAAM/BM pairs) the
/// ratio of means. Categories are listed in first-seen order of the
/// surviving rows.
pub fn print_category_summary(spec: &ChartSpec, points: &[DataPoint]) {
    println!("\n{}", "=".repeat(60));
    println!("DATA SUMMARY BY ALLOY TYPE");
    println!("{}", "=".repeat(60));

    if points.is_empty() {
        println!("no data");
        return;
    }

    let mut seen: Vec<AlloyCategory> = Vec::new();
    for point in points {
        if !seen.contains(&point.category) {
            seen.push(point.category);
        }
    }

    for category in seen {
        let xs: Vec<f64> = points
            .iter()
            .filter(|p| p.category == category)
            .map(|p| p.x)
            .collect();
        let ys: Vec<f64> = points
            .iter()
            .filter(|p| p.category == category)
            .map(|p| p.y)
            .collect();

        println!("\n{category}:");
        println!("  Number of data points: {}", xs.len());
        print_range_line(spec.y, &ys);
        print_range_line(spec.x, &xs);
        print_mean_line(spec.y, &ys);
        print_mean_line(spec.x, &xs);

        if let Some(label) = spec.mean_ratio_label {
            if let (Some(y_mean), Some(x_mean)) = (stats::mean(&ys), stats::mean(&xs)) {
                if x_mean > 0.0 {
                    println!("  {}: {:.3}", label, y_mean / x_mean);
                }
            }
        }
    }
}

fn print_range_line(metric: Metric, values: &[f64]) {
    match (stats::min(values), stats::max(values)) {
        (Some(min), Some(max)) => println!(
            "  {} range: {:.2} - {:.2} {}",
            metric.label(),
            min,
            max,
            metric.unit()
        ),
        _ => println!("  {} range: no data", metric.label()),
    }
}

fn print_mean_line(metric: Metric, values: &[f64]) {
    match stats::mean(values) {
        Some(mean) => println!(
            "  Mean {}: {:.2} {}",
            metric.label(),
            mean,
            metric.unit()
        ),
        None => println!("  Mean {}: no data", metric.label()),
    }
}

/// Corpus-wide field availability, printed after an extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySummary {
    pub total_records: usize,
    pub with_heat_input: usize,
    pub with_power: usize,
    pub with_travel_speed: usize,
    pub with_uts_waam: usize,
}

pub fn availability(grouped: &GroupedRecords) -> AvailabilitySummary {
    let records = || grouped.values().flatten();
    AvailabilitySummary {
        total_records: records().count(),
        with_heat_input: records().filter(|r| !r.heat_input.is_missing()).count(),
        with_power: records().filter(|r| !r.power.is_missing()).count(),
        with_travel_speed: records().filter(|r| !r.travel_speed.is_missing()).count(),
        with_uts_waam: records().filter(|r| !r.uts_waam.is_missing()).count(),
    }
}

pub fn print_extraction_summary(grouped: &GroupedRecords) {
    println!("\nSummary by Alloy Type:");
    for (category, records) in grouped {
        println!("  {}: {} entries", category, records.len());
    }

    let summary = availability(grouped);
    println!("\nData Availability:");
    println!("  Total entries: {}", summary.total_records);
    println!("  Entries with Heat Input: {}", summary.with_heat_input);
    println!("  Entries with Power: {}", summary.with_power);
    println!("  Entries with Travel Speed: {}", summary.with_travel_speed);
    println!("  Entries with UTS(WAAM): {}", summary.with_uts_waam);
}
