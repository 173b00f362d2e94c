//! Two-stage outlier removal for one chart's pair of columns.
//!
//! Stage one drops rows outside the chart's hard domain bounds. Stage two
//! computes IQR acceptance intervals over the bound-filtered rows and drops
//! rows whose gated columns fall outside. Z-score counts are computed over
//! the same rows for the report, and only for the report.

use serde::Serialize;
use tracing::info;

use crate::charts::{ChartSpec, GatedColumns};
use crate::domain::{AlloyCategory, GroupedRecords};
use crate::stats::{iqr_bounds, zscore_outlier_count, IqrBounds};

/// One plottable row: both chart columns resolved to numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub category: AlloyCategory,
    pub x: f64,
    pub y: f64,
}

/// Projects the grouped store onto a chart's two columns, keeping only rows
/// where both resolve to numbers. Text fallbacks count as missing here.
pub fn chart_points(grouped: &GroupedRecords, spec: &ChartSpec) -> Vec<DataPoint> {
    let mut points = Vec::new();
    for (category, records) in grouped {
        for record in records {
            let (Some(x), Some(y)) = (
                spec.x.value(record).as_number(),
                spec.y.value(record).as_number(),
            ) else {
                continue;
            };
            points.push(DataPoint {
                category: *category,
                x,
                y,
            });
        }
    }
    points
}

/// Outlier diagnostics for one gated column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnOutlierReport {
    pub column: &'static str,
    pub bounds: IqrBounds,
    pub iqr_outliers: usize,
    pub z_outliers: usize,
}

/// What each filtering stage did, for diagnostics only.
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub input_rows: usize,
    pub after_manual: usize,
    pub after_statistical: usize,
    pub columns: Vec<ColumnOutlierReport>,
}

/// Applies both stages. The returned set is always a subset of the
/// manually bound-filtered set, which is a subset of the input.
pub fn apply(points: Vec<DataPoint>, spec: &ChartSpec) -> (Vec<DataPoint>, FilterReport) {
    let input_rows = points.len();

    let manual: Vec<DataPoint> = points
        .into_iter()
        .filter(|point| spec.x_bound.admits(point.x) && spec.y_bound.admits(point.y))
        .collect();
    let after_manual = manual.len();

    let mut columns = Vec::new();

    let y_values: Vec<f64> = manual.iter().map(|p| p.y).collect();
    let y_bounds = column_report(&mut columns, spec, spec.y.label(), &y_values);

    let x_bounds = match spec.gated {
        GatedColumns::Both => {
            let x_values: Vec<f64> = manual.iter().map(|p| p.x).collect();
            column_report(&mut columns, spec, spec.x.label(), &x_values)
        }
        GatedColumns::YOnly => None,
    };

    let survivors: Vec<DataPoint> = manual
        .into_iter()
        .filter(|point| {
            y_bounds.map_or(true, |bounds| bounds.contains(point.y))
                && x_bounds.map_or(true, |bounds| bounds.contains(point.x))
        })
        .collect();

    let report = FilterReport {
        input_rows,
        after_manual,
        after_statistical: survivors.len(),
        columns,
    };

    info!(
        "filter chart={} rows={}/{}/{}",
        spec.name, report.input_rows, report.after_manual, report.after_statistical
    );

    (survivors, report)
}

fn column_report(
    columns: &mut Vec<ColumnOutlierReport>,
    spec: &ChartSpec,
    label: &'static str,
    values: &[f64],
) -> Option<IqrBounds> {
    let bounds = iqr_bounds(values, spec.iqr_k)?;
    columns.push(ColumnOutlierReport {
        column: label,
        bounds,
        iqr_outliers: values.iter().filter(|v| !bounds.contains(**v)).count(),
        z_outliers: zscore_outlier_count(values, spec.z_threshold),
    });
    Some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ELONG_WAAM_VS_ELONG_BM, HEAT_INPUT_VS_BEAD_HEIGHT, HEAT_INPUT_VS_TRAVEL_SPEED};

    fn point(x: f64, y: f64) -> DataPoint {
        DataPoint {
            category: AlloyCategory::Steel,
            x,
            y,
        }
    }

    #[test]
    fn manual_bound_drops_unconditionally() {
        // One absurd heat input: far outside the <= 2000 manual bound for
        // the bead-height chart, dropped before any statistics run.
        let mut points: Vec<DataPoint> = (0..10).map(|i| point(2.0 + i as f64 * 0.1, 100.0)).collect();
        points.push(point(2.5, 5000.0));

        let (survivors, report) = apply(points, &HEAT_INPUT_VS_BEAD_HEIGHT);
        assert_eq!(report.input_rows, 11);
        assert_eq!(report.after_manual, 10);
        assert_eq!(survivors.len(), 10);
        assert!(survivors.iter().all(|p| p.y <= 2000.0));
    }

    #[test]
    fn filtering_is_monotone() {
        let points: Vec<DataPoint> = (0..30)
            .map(|i| point(2.0 + (i % 7) as f64, 10.0 + (i % 5) as f64))
            .chain([point(0.5, 10.0), point(3.0, 9000.0), point(4.0, 140.0)])
            .collect();

        let (survivors, report) = apply(points, &HEAT_INPUT_VS_TRAVEL_SPEED);
        assert!(report.after_manual <= report.input_rows);
        assert!(report.after_statistical <= report.after_manual);
        assert_eq!(survivors.len(), report.after_statistical);
    }

    #[test]
    fn y_only_gating_preserves_x_spread() {
        // A wild but in-bounds x value survives when only y is gated.
        let mut points: Vec<DataPoint> = (0..20).map(|i| point(10.0, 10.0 + (i % 3) as f64)).collect();
        points.push(point(49.0, 11.0));

        let (survivors, report) = apply(points, &ELONG_WAAM_VS_ELONG_BM);
        assert_eq!(report.columns.len(), 1);
        assert!(survivors.iter().any(|p| p.x == 49.0));
    }

    #[test]
    fn z_scores_never_remove_rows() {
        // Tight cluster plus one in-IQR-bounds point: the Z count may flag
        // rows, the removal count must follow IQR bounds alone.
        let points: Vec<DataPoint> = (0..40)
            .map(|i| point(5.0 + (i % 4) as f64, 20.0 + (i % 4) as f64))
            .collect();
        let (survivors, report) = apply(points.clone(), &HEAT_INPUT_VS_TRAVEL_SPEED);

        let iqr_removed: usize = report.after_manual - report.after_statistical;
        let iqr_flagged: usize = report.columns.iter().map(|c| c.iqr_outliers).sum();
        assert!(iqr_removed <= iqr_flagged);
        assert_eq!(survivors.len() + iqr_removed, report.after_manual);
    }

    #[test]
    fn empty_input_produces_an_empty_report() {
        let (survivors, report) = apply(Vec::new(), &HEAT_INPUT_VS_TRAVEL_SPEED);
        assert!(survivors.is_empty());
        assert_eq!(report.after_statistical, 0);
        assert!(report.columns.is_empty());
    }
}
