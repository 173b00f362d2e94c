//! The fixed catalog of chart configurations.
//!
//! Each spec names its axes, the hard domain bounds applied before any
//! statistics, the IQR multiplier and which columns it gates, and the
//! informational Z-score threshold. These values are part of the tool's
//! contract with its dataset and are not runtime-configurable.

use crate::domain::Metric;

/// Hard acceptable range for one column, applied before the statistical
/// stage. Rows outside are dropped unconditionally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainBound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl DomainBound {
    pub const NONE: DomainBound = DomainBound { min: None, max: None };

    pub const fn at_most(max: f64) -> DomainBound {
        DomainBound { min: None, max: Some(max) }
    }

    pub const fn at_least(min: f64) -> DomainBound {
        DomainBound { min: Some(min), max: None }
    }

    pub const fn between(min: f64, max: f64) -> DomainBound {
        DomainBound { min: Some(min), max: Some(max) }
    }

    pub fn admits(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Which of the two displayed columns the IQR stage gates. When only the
/// y column is gated the full spread of the x column is preserved past the
/// manual bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedColumns {
    Both,
    YOnly,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    /// CLI name of the chart.
    pub name: &'static str,
    pub title: &'static str,
    pub x: Metric,
    pub y: Metric,
    pub x_bound: DomainBound,
    pub y_bound: DomainBound,
    pub iqr_k: f64,
    pub gated: GatedColumns,
    /// Z-score threshold: the count is reported but never removes rows.
    pub z_threshold: f64,
    /// Dashed y = x reference line (same-unit axes only).
    pub identity_line: bool,
    /// One shared min/max range for both axes, for same-unit comparisons.
    pub shared_axis_range: bool,
    /// Label for the y-mean / x-mean ratio line in the per-category
    /// summary, when meaningful.
    pub mean_ratio_label: Option<&'static str>,
    pub output_file: &'static str,
}

pub static HEAT_INPUT_VS_TRAVEL_SPEED: ChartSpec = ChartSpec {
    name: "heat-input-vs-travel-speed",
    title: "Heat Input vs Travel Speed for Different WAAM Alloy Types",
    x: Metric::TravelSpeed,
    y: Metric::HeatInput,
    x_bound: DomainBound::at_least(1.5),
    y_bound: DomainBound::at_most(150.0),
    iqr_k: 1.2,
    gated: GatedColumns::Both,
    z_threshold: 2.5,
    identity_line: false,
    shared_axis_range: false,
    mean_ratio_label: None,
    output_file: "heat_input_vs_travel_speed_plot.png",
};

pub static POWER_VS_TRAVEL_SPEED: ChartSpec = ChartSpec {
    name: "power-vs-travel-speed",
    title: "Power vs Travel Speed for Different WAAM Alloy Types",
    x: Metric::TravelSpeed,
    y: Metric::Power,
    x_bound: DomainBound::NONE,
    y_bound: DomainBound::NONE,
    iqr_k: 1.5,
    gated: GatedColumns::Both,
    z_threshold: 3.0,
    identity_line: false,
    shared_axis_range: false,
    mean_ratio_label: None,
    output_file: "power_vs_travel_speed_plot.png",
};

pub static HEAT_INPUT_VS_BEAD_HEIGHT: ChartSpec = ChartSpec {
    name: "heat-input-vs-bead-height",
    title: "Heat Input vs Bead Height for Different WAAM Alloy Types",
    x: Metric::BeadHeight,
    y: Metric::HeatInput,
    x_bound: DomainBound::between(0.01, 50.0),
    y_bound: DomainBound::at_most(2000.0),
    iqr_k: 1.5,
    gated: GatedColumns::YOnly,
    z_threshold: 4.0,
    identity_line: false,
    shared_axis_range: false,
    mean_ratio_label: None,
    output_file: "heat_input_vs_bead_height_plot.png",
};

pub static UTS_WAAM_VS_UTS_BM: ChartSpec = ChartSpec {
    name: "uts-waam-vs-uts-bm",
    title: "UTS (WAAM) vs UTS (BM) for Different WAAM Alloy Types",
    x: Metric::UtsBm,
    y: Metric::UtsWaam,
    x_bound: DomainBound::between(0.0, 2000.0),
    y_bound: DomainBound::between(0.0, 2000.0),
    iqr_k: 1.5,
    gated: GatedColumns::YOnly,
    z_threshold: 3.0,
    identity_line: true,
    shared_axis_range: true,
    mean_ratio_label: Some("Strength ratio (WAAM/BM)"),
    output_file: "uts_waam_vs_uts_bm_plot.png",
};

pub static ELONG_WAAM_VS_ELONG_BM: ChartSpec = ChartSpec {
    name: "elong-waam-vs-elong-bm",
    title: "Elongation (WAAM) vs Elongation (BM) for Different WAAM Alloy Types",
    x: Metric::ElongBm,
    y: Metric::ElongWaam,
    x_bound: DomainBound::between(0.0, 50.0),
    y_bound: DomainBound::between(0.0, 50.0),
    iqr_k: 1.5,
    gated: GatedColumns::YOnly,
    z_threshold: 3.0,
    identity_line: true,
    shared_axis_range: true,
    mean_ratio_label: Some("Elongation ratio (WAAM/BM)"),
    output_file: "elong_waam_vs_elong_bm_plot.png",
};

pub static CHARTS: [&ChartSpec; 5] = [
    &HEAT_INPUT_VS_TRAVEL_SPEED,
    &POWER_VS_TRAVEL_SPEED,
    &HEAT_INPUT_VS_BEAD_HEIGHT,
    &UTS_WAAM_VS_UTS_BM,
    &ELONG_WAAM_VS_ELONG_BM,
];

pub fn chart_by_name(name: &str) -> Option<&'static ChartSpec> {
    CHARTS.iter().copied().find(|spec| spec.name == name)
}
