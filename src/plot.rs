//! Scatter rendering sink.
//!
//! Rendering is presentation only: it consumes already-filtered rows and a
//! fixed per-category style table, and a failure here surfaces as an error
//! from the chart run without touching the stores.

use std::path::Path;

use anyhow::Result;
use plotters::element::Polygon;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use tracing::{info, warn};

use crate::charts::ChartSpec;
use crate::domain::AlloyCategory;
use crate::filter::DataPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    Diamond,
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryStyle {
    pub color: RGBColor,
    pub marker: MarkerShape,
    pub size: i32,
}

/// Fixed category encoding shared by every chart. Categories without an
/// entry fall back to small black circles.
static STYLES: &[(AlloyCategory, CategoryStyle)] = &[
    (
        AlloyCategory::Titanium,
        CategoryStyle { color: RGBColor(255, 107, 107), marker: MarkerShape::Circle, size: 6 },
    ),
    (
        AlloyCategory::Steel,
        CategoryStyle { color: RGBColor(78, 205, 196), marker: MarkerShape::Square, size: 5 },
    ),
    (
        AlloyCategory::Aluminum,
        CategoryStyle { color: RGBColor(69, 183, 209), marker: MarkerShape::TriangleUp, size: 6 },
    ),
    (
        AlloyCategory::Other,
        CategoryStyle { color: RGBColor(150, 206, 180), marker: MarkerShape::Diamond, size: 6 },
    ),
    (
        AlloyCategory::Tin,
        CategoryStyle { color: RGBColor(255, 234, 167), marker: MarkerShape::TriangleDown, size: 6 },
    ),
];

const FALLBACK_STYLE: CategoryStyle = CategoryStyle {
    color: RGBColor(0, 0, 0),
    marker: MarkerShape::Circle,
    size: 5,
};

pub fn style_for(category: AlloyCategory) -> CategoryStyle {
    STYLES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, style)| *style)
        .unwrap_or(FALLBACK_STYLE)
}

/// Renders one chart to a PNG at `output`. Empty input is a no-op: there is
/// nothing to draw and no artifact is produced.
pub fn render_scatter(spec: &ChartSpec, points: &[DataPoint], output: &Path) -> Result<()> {
    if points.is_empty() {
        warn!("chart={} has no rows after filtering; skipping render", spec.name);
        println!("No data points survived filtering; no plot written.");
        return Ok(());
    }

    let (x_range, y_range) = axis_ranges(spec, points);

    let root = BitMapBackend::new(output, (1400, 1000)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(spec.x.axis_label())
        .y_desc(spec.y.axis_label())
        .draw()?;

    if spec.identity_line {
        let lo = points
            .iter()
            .flat_map(|p| [p.x, p.y])
            .fold(f64::INFINITY, f64::min);
        let hi = points
            .iter()
            .flat_map(|p| [p.x, p.y])
            .fold(f64::NEG_INFINITY, f64::max);
        chart
            .draw_series(DashedLineSeries::new(
                [(lo, lo), (hi, hi)],
                8,
                4,
                ShapeStyle::from(&BLACK.mix(0.5)).stroke_width(1),
            ))?
            .label("WAAM = BM")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLACK.mix(0.5)));
    }

    for category in categories_in_order(points) {
        let group: Vec<&DataPoint> = points.iter().filter(|p| p.category == category).collect();
        let style = style_for(category);
        let color = style.color;
        let size = style.size;

        let series = match style.marker {
            MarkerShape::Circle => chart.draw_series(group.iter().map(|p| {
                EmptyElement::at((p.x, p.y)) + Circle::new((0, 0), size, color.filled())
            }))?,
            MarkerShape::Square => chart.draw_series(group.iter().map(|p| {
                EmptyElement::at((p.x, p.y))
                    + Rectangle::new([(-size, -size), (size, size)], color.filled())
            }))?,
            MarkerShape::TriangleUp => chart.draw_series(group.iter().map(|p| {
                EmptyElement::at((p.x, p.y))
                    + Polygon::new(vec![(0, -size), (size, size), (-size, size)], color.filled())
            }))?,
            MarkerShape::TriangleDown => chart.draw_series(group.iter().map(|p| {
                EmptyElement::at((p.x, p.y))
                    + Polygon::new(vec![(0, size), (size, -size), (-size, -size)], color.filled())
            }))?,
            MarkerShape::Diamond => chart.draw_series(group.iter().map(|p| {
                EmptyElement::at((p.x, p.y))
                    + Polygon::new(
                        vec![(0, -size), (size, 0), (0, size), (-size, 0)],
                        color.filled(),
                    )
            }))?,
        };

        series
            .label(format!("{} (n={})", category, group.len()))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    info!("chart={} rendered points={} output={}", spec.name, points.len(), output.display());
    Ok(())
}

fn categories_in_order(points: &[DataPoint]) -> Vec<AlloyCategory> {
    let mut seen = Vec::new();
    for point in points {
        if !seen.contains(&point.category) {
            seen.push(point.category);
        }
    }
    seen
}

fn axis_ranges(
    spec: &ChartSpec,
    points: &[DataPoint],
) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let xs = points.iter().map(|p| p.x);
    let ys = points.iter().map(|p| p.y);

    if spec.shared_axis_range {
        let all: Vec<f64> = xs.chain(ys).collect();
        let range = padded_range(&all);
        (range.clone(), range)
    } else {
        (
            padded_range(&xs.collect::<Vec<f64>>()),
            padded_range(&ys.collect::<Vec<f64>>()),
        )
    }
}

fn padded_range(values: &[f64]) -> std::ops::Range<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let pad = if span == 0.0 { 1.0 } else { span * 0.05 };
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_table_covers_the_plotted_categories() {
        assert_eq!(style_for(AlloyCategory::Titanium).marker, MarkerShape::Circle);
        assert_eq!(style_for(AlloyCategory::Steel).marker, MarkerShape::Square);
        assert_eq!(style_for(AlloyCategory::Tin).marker, MarkerShape::TriangleDown);
        // Unlisted categories fall back to black circles.
        let fallback = style_for(AlloyCategory::Magnesium);
        assert_eq!(fallback.marker, MarkerShape::Circle);
        assert_eq!(fallback.color, RGBColor(0, 0, 0));
    }

    #[test]
    fn padded_range_handles_degenerate_spans() {
        let range = padded_range(&[5.0]);
        assert!(range.start < 5.0 && range.end > 5.0);
    }

    #[test]
    fn empty_input_skips_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("empty.png");
        render_scatter(&crate::charts::UTS_WAAM_VS_UTS_BM, &[], &output).unwrap();
        assert!(!output.exists());
    }
}
